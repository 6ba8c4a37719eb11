//! Reconciliation between the historical bulk fetch and the live stream.
//!
//! The reconciler owns the shared store and never blocks live delivery on
//! the bulk fetch: a live event arriving before (or instead of) the fetch
//! result is stored and announced immediately.

use std::sync::Arc;

use parking_lot::RwLock;
use pulse_core::AlertNotification;
use tracing::{info, warn};

use crate::store::{NotificationStore, SharedStore};
use crate::toast::{Toast, ToastSink};

/// Outcome of the historical bulk fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Fetch not yet resolved.
    Loading,
    /// Fetch succeeded and the collection was merged.
    Loaded,
    /// Fetch failed; live delivery continues regardless.
    Failed(String),
}

/// Merges the one-shot historical load with live push events.
pub struct NotificationReconciler {
    store: SharedStore,
    load_state: RwLock<LoadState>,
    toasts: Arc<dyn ToastSink>,
}

impl NotificationReconciler {
    pub fn new(toasts: Arc<dyn ToastSink>) -> Self {
        Self {
            store: Arc::new(RwLock::new(NotificationStore::new())),
            load_state: RwLock::new(LoadState::Loading),
            toasts,
        }
    }

    /// Shared store handle for UI readers.
    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.read().clone()
    }

    /// Apply a successful bulk fetch.
    pub fn on_bulk_loaded(&self, fetched: Vec<AlertNotification>) {
        info!(count = fetched.len(), "Historical notifications loaded");
        self.store.write().apply_bulk(fetched);
        *self.load_state.write() = LoadState::Loaded;
    }

    /// Record a bulk fetch failure. Already-received live events stay
    /// visible and future live events keep flowing.
    pub fn on_bulk_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(%reason, "Historical notification fetch failed");
        self.toasts.toast(Toast::error(
            "Notifications",
            "Failed to load alert notifications",
        ));
        *self.load_state.write() = LoadState::Failed(reason);
    }

    /// Apply one live push event and raise the delivery toast.
    ///
    /// Returns `true` if the event was fresh (not a duplicate).
    pub fn on_live_event(&self, notification: AlertNotification) -> bool {
        let symbol = notification.symbol.clone();
        let message = notification.message.clone();

        let inserted = self.store.write().push_live(notification);
        if inserted {
            self.toasts
                .toast(Toast::info(format!("Alert: {symbol}"), message));
        }
        inserted
    }

    pub fn mark_read(&self, id: i64) {
        self.store.write().mark_read(id);
    }

    pub fn mark_all_read(&self) {
        self.store.write().mark_all_read();
    }

    pub fn unread_count(&self) -> usize {
        self.store.read().unread_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;
    use pulse_core::{DeliveryChannel, DeliveryStatus};

    struct RecordingSink {
        toasts: Mutex<Vec<Toast>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                toasts: Mutex::new(Vec::new()),
            })
        }

        fn recorded(&self) -> Vec<Toast> {
            self.toasts.lock().clone()
        }
    }

    impl ToastSink for RecordingSink {
        fn toast(&self, toast: Toast) {
            self.toasts.lock().push(toast);
        }
    }

    fn notification(id: i64, symbol: &str) -> AlertNotification {
        AlertNotification {
            id,
            trigger_id: id,
            user_id: 1,
            symbol: symbol.to_string(),
            triggered_at: Utc::now(),
            trigger_value: "1.00".to_string(),
            message: format!("{symbol} moved"),
            status: DeliveryStatus::Delivered,
            channel: DeliveryChannel::App,
        }
    }

    #[test]
    fn test_live_event_toasts_symbol_and_message() {
        let sink = RecordingSink::new();
        let reconciler = NotificationReconciler::new(sink.clone());

        assert!(reconciler.on_live_event(notification(1, "RELIANCE")));

        let toasts = sink.recorded();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Alert: RELIANCE");
        assert_eq!(toasts[0].message, "RELIANCE moved");
    }

    #[test]
    fn test_duplicate_live_event_does_not_toast() {
        let sink = RecordingSink::new();
        let reconciler = NotificationReconciler::new(sink.clone());

        assert!(reconciler.on_live_event(notification(1, "TCS")));
        assert!(!reconciler.on_live_event(notification(1, "TCS")));

        assert_eq!(sink.recorded().len(), 1);
        assert_eq!(reconciler.unread_count(), 1);
    }

    #[test]
    fn test_bulk_failure_keeps_live_events_visible() {
        let sink = RecordingSink::new();
        let reconciler = NotificationReconciler::new(sink.clone());

        reconciler.on_live_event(notification(5, "INFY"));
        reconciler.on_bulk_failed("HTTP 500");

        assert_eq!(
            reconciler.load_state(),
            LoadState::Failed("HTTP 500".to_string())
        );
        assert_eq!(reconciler.store().read().ids(), vec![5]);

        // Live delivery still works after the failure.
        reconciler.on_live_event(notification(6, "WIPRO"));
        assert_eq!(reconciler.unread_count(), 2);
    }

    #[test]
    fn test_bulk_load_transitions_state_and_merges() {
        let sink = RecordingSink::new();
        let reconciler = NotificationReconciler::new(sink);
        assert_eq!(reconciler.load_state(), LoadState::Loading);

        reconciler.on_live_event(notification(2, "TCS"));
        reconciler.on_bulk_loaded(vec![notification(1, "RELIANCE")]);

        assert_eq!(reconciler.load_state(), LoadState::Loaded);
        assert_eq!(reconciler.store().read().ids(), vec![2, 1]);
        assert_eq!(reconciler.unread_count(), 2);
    }
}
