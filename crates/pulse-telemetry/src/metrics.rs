//! Prometheus metrics for the TradePulse assistant.
//!
//! Covers the push channel, notification state and voice routing:
//! - Connection state and reconnect attempts
//! - Frames received / malformed
//! - Notifications delivered and current unread count
//! - Voice transcript matches and dispatch failures
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration
//! fails, it indicates a fatal configuration error (e.g., duplicate
//! metric names) that should crash at startup rather than fail silently.
//! These panics only occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_int_gauge, Counter,
    CounterVec, Gauge, IntGauge,
};

/// Push channel connection state (1 = connected, 0 = disconnected).
pub static WS_CONNECTED: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "pulse_ws_connected",
        "Push channel connection state (1=connected)"
    )
    .unwrap()
});

/// Total push channel reconnection attempts.
pub static WS_RECONNECT_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "pulse_ws_reconnect_total",
        "Total push channel reconnection attempts"
    )
    .unwrap()
});

/// Total push frames received by outcome.
/// Labels: outcome (alert/ignored/malformed)
pub static FRAMES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pulse_frames_total",
        "Total push frames received by outcome",
        &["outcome"]
    )
    .unwrap()
});

/// Total alert notifications delivered by source.
/// Labels: source (live/bulk)
pub static NOTIFICATIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pulse_notifications_total",
        "Total alert notifications delivered by source",
        &["source"]
    )
    .unwrap()
});

/// Current unread notification count.
pub static UNREAD_COUNT: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "pulse_unread_count",
        "Current unread notification count"
    )
    .unwrap()
});

/// Total voice transcripts processed by outcome.
/// Labels: outcome (matched/unmatched)
pub static VOICE_TRANSCRIPTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "pulse_voice_transcripts_total",
        "Total voice transcripts processed by outcome",
        &["outcome"]
    )
    .unwrap()
});
