//! Main application orchestration.
//!
//! Wires the subsystems together:
//! - Push channel -> reconciler -> notification store
//! - Historical bulk fetch (non-blocking for live delivery)
//! - Transcript lines (stdin stand-in for speech capture) -> voice router
//! - Toast feed -> log output

use std::sync::Arc;

use pulse_api::AssistantClient;
use pulse_notify::{ChannelToastSink, NotificationReconciler, Toast, ToastLevel};
use pulse_telemetry::metrics::{
    NOTIFICATIONS_TOTAL, UNREAD_COUNT, VOICE_TRANSCRIPTS_TOTAL, WS_CONNECTED, WS_RECONNECT_TOTAL,
};
use pulse_voice::{
    CaptureControl, CommandDispatchTable, CommandDispatcher, Navigator, VoiceCommandRouter,
};
use pulse_ws::{ConnectionState, PushChannel, PushEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Headless navigator: route changes become log lines for the frontend
/// to pick up.
struct RouteLogger;

impl Navigator for RouteLogger {
    fn navigate(&self, route: pulse_core::Route) {
        info!(path = route.path(), "Navigating");
    }
}

/// Capture switch for the stdin transcript feed.
struct TranscriptSwitch {
    token: CancellationToken,
}

impl CaptureControl for TranscriptSwitch {
    fn stop(&self) {
        info!("Transcript capture stopped by voice command");
        self.token.cancel();
    }
}

/// Main application.
pub struct Application {
    channel: Arc<PushChannel>,
    event_rx: mpsc::Receiver<PushEvent>,
    toast_rx: mpsc::Receiver<Toast>,
    reconciler: Arc<NotificationReconciler>,
    router: Arc<VoiceCommandRouter>,
    client: Arc<AssistantClient>,
    capture_token: CancellationToken,
}

impl Application {
    /// Create a new application from configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let (toast_tx, toast_rx) = mpsc::channel(config.channels.toast_buffer);
        let toasts = Arc::new(ChannelToastSink::new(toast_tx));

        let reconciler = Arc::new(NotificationReconciler::new(toasts.clone()));

        let (event_tx, event_rx) = mpsc::channel(config.channels.event_buffer);
        let channel = Arc::new(PushChannel::new(config.push_channel_config(), event_tx));

        let client = Arc::new(AssistantClient::new(&config.server_origin)?);

        let capture_token = CancellationToken::new();
        let dispatcher = Arc::new(CommandDispatcher::new(
            Arc::new(RouteLogger),
            toasts,
            client.clone(),
            Arc::new(TranscriptSwitch {
                token: capture_token.clone(),
            }),
        ));
        let router = Arc::new(VoiceCommandRouter::new(
            CommandDispatchTable::standard(config.voice.fuzzy_threshold),
            dispatcher,
        ));

        Ok(Self {
            channel,
            event_rx,
            toast_rx,
            reconciler,
            router,
            client,
            capture_token,
        })
    }

    /// Shared reconciler handle (exposed for tests and UI readers).
    pub fn reconciler(&self) -> Arc<NotificationReconciler> {
        self.reconciler.clone()
    }

    /// Run until Ctrl-C.
    pub async fn run(&mut self) -> AppResult<()> {
        // Push channel lifetime is scoped to this run: acquired here,
        // released via shutdown() on every exit path below.
        let channel = self.channel.clone();
        let connect_handle = tokio::spawn(async move {
            if let Err(e) = channel.connect().await {
                error!(?e, "Push channel terminated");
            }
        });

        // Bulk fetch runs concurrently; live events are never blocked on it.
        let reconciler = self.reconciler.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.fetch_notifications().await {
                Ok(notifications) => {
                    NOTIFICATIONS_TOTAL
                        .with_label_values(&["bulk"])
                        .inc_by(notifications.len() as f64);
                    reconciler.on_bulk_loaded(notifications);
                }
                Err(e) => reconciler.on_bulk_failed(e.to_string()),
            }
        });

        // Transcript feed: newline-delimited utterances on stdin, stopped
        // either by EOF or the "stop listening" command.
        let (transcript_tx, mut transcript_rx) = mpsc::channel::<String>(16);
        let capture_token = self.capture_token.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    () = capture_token.cancelled() => break,
                    line = lines.next_line() => match line {
                        Ok(Some(line)) => {
                            if transcript_tx.send(line).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) | Err(_) => break,
                    },
                }
            }
            info!("Transcript feed ended");
        });

        let mut voice_active = true;
        let mut seen_reconnects = 0u32;
        let mut health = tokio::time::interval(std::time::Duration::from_secs(5));

        loop {
            tokio::select! {
                _ = health.tick() => {
                    let connected = self.channel.state() == ConnectionState::Connected;
                    WS_CONNECTED.set(if connected { 1.0 } else { 0.0 });

                    // reconnect_count resets to zero on a successful open.
                    let reconnects = self.channel.reconnect_count();
                    if reconnects > seen_reconnects {
                        WS_RECONNECT_TOTAL.inc_by(f64::from(reconnects - seen_reconnects));
                    }
                    seen_reconnects = reconnects;
                }

                event = self.event_rx.recv() => {
                    match event {
                        Some(PushEvent::Alert(notification)) => {
                            if self.reconciler.on_live_event(notification) {
                                NOTIFICATIONS_TOTAL.with_label_values(&["live"]).inc();
                            }
                            UNREAD_COUNT.set(self.reconciler.unread_count() as i64);
                        }
                        None => {
                            warn!("Push event channel closed");
                            break;
                        }
                    }
                }

                toast = self.toast_rx.recv() => {
                    if let Some(toast) = toast {
                        match toast.level {
                            ToastLevel::Error => warn!(title = %toast.title, "{}", toast.message),
                            _ => info!(title = %toast.title, "{}", toast.message),
                        }
                    }
                }

                line = transcript_rx.recv(), if voice_active => {
                    match line {
                        Some(line) => {
                            let router = self.router.clone();
                            // Dispatches overlap: a new utterance may fire
                            // before a prior callback's network work ends.
                            tokio::spawn(async move {
                                let matched = router.handle_transcript(&line).await;
                                let outcome = if matched { "matched" } else { "unmatched" };
                                VOICE_TRANSCRIPTS_TOTAL.with_label_values(&[outcome]).inc();
                            });
                        }
                        None => voice_active = false,
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl-C received, shutting down");
                    break;
                }
            }
        }

        self.channel.shutdown();
        self.capture_token.cancel();
        let _ = connect_handle.await;
        WS_CONNECTED.set(0.0);
        info!("Application stopped");
        Ok(())
    }
}
