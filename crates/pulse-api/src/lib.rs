//! REST client for the TradePulse assistant server.
//!
//! Covers the three endpoints the notification and voice subsystems use:
//! the historical notification fetch and the auto-trade config
//! list/toggle pair.

pub mod client;
pub mod error;

pub use client::AssistantClient;
pub use error::{ApiError, ApiResult};
