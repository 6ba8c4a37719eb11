//! TradePulse trading assistant - Entry Point
//!
//! Maintains the live alert notification view over the assistant
//! server's push channel and routes transcript lines (stdin) to voice
//! commands.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// TradePulse trading assistant
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PULSE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize TLS crypto provider (must be before any WS connections)
    pulse_ws::init_crypto();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    pulse_telemetry::init_logging()?;

    info!("Starting TradePulse v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > PULSE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("PULSE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");

    let config = if std::path::Path::new(&config_path).exists() {
        pulse_app::AppConfig::from_file(&config_path)?
    } else {
        info!(path = %config_path, "Config file not found, using defaults");
        pulse_app::AppConfig::default()
    };
    info!(origin = %config.server_origin, user_id = config.user_id, "Configuration loaded");

    // Create and run the application
    let mut app = pulse_app::Application::new(config)?;
    app.run().await?;

    Ok(())
}
