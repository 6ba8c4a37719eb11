//! Integration tests for pulse-app.
//!
//! These tests verify the push-channel lifecycle against a real
//! WebSocket server:
//! - Connection establishment and the authentication frame
//! - Alert frame delivery and malformed-frame tolerance
//! - Shutdown promptness and reconnect policies

pub mod common;
