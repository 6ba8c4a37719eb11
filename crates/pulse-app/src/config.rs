//! Application configuration.

use crate::error::{AppError, AppResult};
use pulse_ws::{PushChannelConfig, ReconnectPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reconnect strategy selector for the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconnectMode {
    /// Exponential backoff with jitter.
    #[default]
    Backoff,
    /// Stay disconnected after a drop (the original dashboard behavior).
    None,
}

/// Push channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default)]
    pub reconnect: ReconnectMode,
    /// Base delay for exponential backoff.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Maximum delay for exponential backoff.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Maximum reconnection attempts (0 = infinite).
    #[serde(default)]
    pub max_attempts: u32,
}

fn default_base_delay_ms() -> u64 {
    1_000
}

fn default_max_delay_ms() -> u64 {
    60_000
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            reconnect: ReconnectMode::default(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_attempts: 0,
        }
    }
}

/// Voice routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Similarity threshold for fuzzy wildcard commands.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
}

fn default_fuzzy_threshold() -> f64 {
    0.7
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

/// Internal channel capacities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    #[serde(default = "default_toast_buffer")]
    pub toast_buffer: usize,
}

fn default_event_buffer() -> usize {
    100
}

fn default_toast_buffer() -> usize {
    32
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
            toast_buffer: default_toast_buffer(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Assistant server origin (e.g., "http://localhost:5000").
    #[serde(default = "default_origin")]
    pub server_origin: String,
    /// User id for push channel authentication.
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    #[serde(default)]
    pub push: PushConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub channels: ChannelConfig,
}

fn default_origin() -> String {
    "http://localhost:5000".to_string()
}

fn default_user_id() -> i64 {
    1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_origin: default_origin(),
            user_id: default_user_id(),
            push: PushConfig::default(),
            voice: VoiceConfig::default(),
            channels: ChannelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("PULSE_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Reconnect policy for the push channel.
    pub fn reconnect_policy(&self) -> ReconnectPolicy {
        match self.push.reconnect {
            ReconnectMode::None => ReconnectPolicy::None,
            ReconnectMode::Backoff => ReconnectPolicy::Backoff {
                base_delay_ms: self.push.base_delay_ms,
                max_delay_ms: self.push.max_delay_ms,
                max_attempts: self.push.max_attempts,
            },
        }
    }

    /// Full push channel configuration.
    pub fn push_channel_config(&self) -> PushChannelConfig {
        PushChannelConfig {
            origin: self.server_origin.clone(),
            user_id: self.user_id,
            reconnect: self.reconnect_policy(),
        }
    }
}
