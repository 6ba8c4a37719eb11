//! Core domain types for the TradePulse trading assistant.
//!
//! This crate provides fundamental types used throughout the assistant:
//! - `AlertNotification`: A delivered or pending alert event
//! - `DeliveryStatus`, `DeliveryChannel`: Delivery metadata enums
//! - `AutoTradeConfig`: Auto-trade configuration as returned by the server
//! - `Route`, `CommandAction`: Voice-command navigation and effect targets

pub mod autotrade;
pub mod command;
pub mod error;
pub mod notification;

pub use autotrade::AutoTradeConfig;
pub use command::{CommandAction, Route};
pub use error::{CoreError, Result};
pub use notification::{AlertNotification, DeliveryChannel, DeliveryStatus};
