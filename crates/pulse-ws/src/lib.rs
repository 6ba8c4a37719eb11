//! WebSocket push-channel client for the TradePulse assistant.
//!
//! Provides:
//! - Endpoint derivation from the page/server origin (https -> wss)
//! - Typed push frames with tolerant parsing (unknown kinds ignored,
//!   malformed payloads logged and skipped)
//! - Connection lifecycle with an authentication frame on open and a
//!   configurable reconnect policy

pub mod connection;
pub mod endpoint;
pub mod error;
pub mod frame;

pub use connection::{ConnectionState, PushChannel, PushChannelConfig, ReconnectPolicy};
pub use endpoint::push_endpoint;
pub use error::{WsError, WsResult};
pub use frame::{parse_frame, AuthFrame, PushEvent};

use std::sync::Once;

static INIT_CRYPTO: Once = Once::new();

/// Initialize the TLS crypto provider.
/// Must be called before any WebSocket connections are made.
pub fn init_crypto() {
    INIT_CRYPTO.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
