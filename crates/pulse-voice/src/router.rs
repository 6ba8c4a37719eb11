//! Transcript-to-command routing.

use std::sync::Arc;

use tracing::debug;

use crate::dispatch::CommandDispatcher;
use crate::table::CommandDispatchTable;

/// Routes utterances through the dispatch table to the dispatcher.
///
/// `handle_transcript` awaits the dispatched action's own work, but the
/// router holds no state across calls: callers that want overlapping
/// dispatches (a new utterance while a prior network call is in flight)
/// spawn each call as its own task.
pub struct VoiceCommandRouter {
    table: CommandDispatchTable,
    dispatcher: Arc<CommandDispatcher>,
}

impl VoiceCommandRouter {
    pub fn new(table: CommandDispatchTable, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { table, dispatcher }
    }

    pub fn dispatcher(&self) -> Arc<CommandDispatcher> {
        self.dispatcher.clone()
    }

    /// Match and dispatch one utterance.
    ///
    /// Returns `true` if a command fired. An unmatched transcript is not
    /// an error; to the user it is indistinguishable from silence.
    pub async fn handle_transcript(&self, transcript: &str) -> bool {
        let Some(matched) = self.table.match_transcript(transcript) else {
            debug!(%transcript, "No voice command matched");
            return false;
        };
        self.dispatcher
            .dispatch(matched.action, matched.capture)
            .await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{AutoTradeApi, BoxFuture, CaptureControl, Navigator};
    use crate::error::VoiceResult;
    use parking_lot::Mutex;
    use pulse_core::{AutoTradeConfig, Route};
    use pulse_notify::{Toast, ToastSink};

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().push(route);
        }
    }

    struct NullSink;
    impl ToastSink for NullSink {
        fn toast(&self, _toast: Toast) {}
    }

    struct NullCapture;
    impl CaptureControl for NullCapture {
        fn stop(&self) {}
    }

    struct EmptyApi;
    impl AutoTradeApi for EmptyApi {
        fn list_configs(&self) -> BoxFuture<'_, VoiceResult<Vec<AutoTradeConfig>>> {
            Box::pin(async { Ok(Vec::new()) })
        }
        fn toggle_config(&self, _id: i64, _enabled: bool) -> BoxFuture<'_, VoiceResult<()>> {
            Box::pin(async { Ok(()) })
        }
    }

    fn router(navigator: Arc<RecordingNavigator>) -> VoiceCommandRouter {
        let dispatcher = Arc::new(CommandDispatcher::new(
            navigator,
            Arc::new(NullSink),
            Arc::new(EmptyApi),
            Arc::new(NullCapture),
        ));
        VoiceCommandRouter::new(CommandDispatchTable::default(), dispatcher)
    }

    #[tokio::test]
    async fn test_matched_transcript_dispatches() {
        let navigator = Arc::new(RecordingNavigator::default());
        let router = router(navigator.clone());

        assert!(router.handle_transcript("go to alerts").await);
        assert_eq!(navigator.routes.lock().as_slice(), &[Route::Alerts]);
    }

    #[tokio::test]
    async fn test_unmatched_transcript_is_silent() {
        let navigator = Arc::new(RecordingNavigator::default());
        let router = router(navigator.clone());

        assert!(!router.handle_transcript("what is the weather").await);
        assert!(navigator.routes.lock().is_empty());
    }

    #[tokio::test]
    async fn test_fuzzy_command_end_to_end() {
        let navigator = Arc::new(RecordingNavigator::default());
        let router = router(navigator.clone());

        assert!(router.handle_transcript("analyze stock reliance").await);
        assert_eq!(navigator.routes.lock().as_slice(), &[Route::Analytics]);
    }
}
