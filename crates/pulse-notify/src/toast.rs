//! Transient toast notifications.
//!
//! Toasts are fire-and-forget UI hints (auto-dismissing in the frontend).
//! The sink trait decouples producers (push channel, voice dispatcher) from
//! whatever surface renders them.

use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A transient, auto-dismissing user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
}

impl Toast {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Sink for transient notifications.
///
/// Implementations must not block; a dropped toast is acceptable, a stalled
/// producer is not.
pub trait ToastSink: Send + Sync {
    fn toast(&self, toast: Toast);
}

/// Channel-backed sink feeding a UI consumer.
///
/// Uses `try_send` so a slow or absent consumer never blocks the event
/// path; overflow drops the toast with a warning.
pub struct ChannelToastSink {
    tx: mpsc::Sender<Toast>,
}

impl ChannelToastSink {
    pub fn new(tx: mpsc::Sender<Toast>) -> Self {
        Self { tx }
    }
}

impl ToastSink for ChannelToastSink {
    fn toast(&self, toast: Toast) {
        if let Err(e) = self.tx.try_send(toast) {
            warn!(error = %e, "Toast dropped (consumer slow or gone)");
        }
    }
}

/// Sink that logs toasts through tracing. Used headless and in tests.
pub struct LogToastSink;

impl ToastSink for LogToastSink {
    fn toast(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Info => info!(title = %toast.title, "{}", toast.message),
            ToastLevel::Success => info!(title = %toast.title, "{}", toast.message),
            ToastLevel::Error => error!(title = %toast.title, "{}", toast.message),
        }
    }
}
