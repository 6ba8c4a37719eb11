//! Notification state for the TradePulse assistant.
//!
//! Provides:
//! - `NotificationStore`: most-recent-first collection with read/unread state
//! - `NotificationReconciler`: merges the historical bulk fetch with live
//!   push events and surfaces load failures without blocking live delivery
//! - `Toast` / `ToastSink`: transient user-facing notifications

pub mod reconciler;
pub mod store;
pub mod toast;

pub use reconciler::{LoadState, NotificationReconciler};
pub use store::{NotificationStore, SharedStore};
pub use toast::{ChannelToastSink, LogToastSink, Toast, ToastLevel, ToastSink};
