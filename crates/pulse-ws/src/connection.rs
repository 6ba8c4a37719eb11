//! Push-channel connection lifecycle.
//!
//! One channel per UI session. On open the channel authenticates with the
//! session's user id, then forwards parsed alert events over an mpsc
//! channel until shutdown or disconnect. Reconnection is an explicit,
//! configurable policy rather than an implicit behavior.

use crate::endpoint::push_endpoint;
use crate::error::{WsError, WsResult};
use crate::frame::{parse_frame, AuthFrame};
use crate::PushEvent;
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use pulse_telemetry::metrics::FRAMES_TOTAL;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async_tls_with_config, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Reconnection strategy after a close or error.
#[derive(Debug, Clone)]
pub enum ReconnectPolicy {
    /// Stay disconnected. Mirrors the assistant's original behavior where
    /// a dropped socket left the session without live alerts.
    None,
    /// Exponential backoff with jitter.
    Backoff {
        /// Base delay for the first retry.
        base_delay_ms: u64,
        /// Cap on the computed delay.
        max_delay_ms: u64,
        /// Maximum attempts (0 = infinite).
        max_attempts: u32,
    },
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        ReconnectPolicy::Backoff {
            base_delay_ms: 1000,
            max_delay_ms: 60000,
            max_attempts: 0,
        }
    }
}

/// Push channel configuration.
#[derive(Debug, Clone)]
pub struct PushChannelConfig {
    /// HTTP(S) origin of the assistant server; the socket lives at `/ws`
    /// on the same host, secure iff the origin is secure.
    pub origin: String,
    /// User id sent in the authentication frame.
    pub user_id: i64,
    /// Reconnect strategy.
    pub reconnect: ReconnectPolicy,
}

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
}

/// Push-channel client.
pub struct PushChannel {
    config: PushChannelConfig,
    state: Arc<RwLock<ConnectionState>>,
    event_tx: mpsc::Sender<PushEvent>,
    reconnect_count: Arc<RwLock<u32>>,
    /// Cancellation token for deterministic teardown.
    shutdown_token: CancellationToken,
}

impl PushChannel {
    /// Create a new push channel delivering events to `event_tx`.
    pub fn new(config: PushChannelConfig, event_tx: mpsc::Sender<PushEvent>) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            event_tx,
            reconnect_count: Arc::new(RwLock::new(0)),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Get current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Number of reconnect attempts since the last successful open.
    pub fn reconnect_count(&self) -> u32 {
        *self.reconnect_count.read()
    }

    /// Signal deterministic teardown.
    ///
    /// Cancels the shutdown token; the read loop sends a Close frame and
    /// exits promptly, including out of a backoff sleep.
    pub fn shutdown(&self) {
        info!("Push channel shutdown requested");
        self.shutdown_token.cancel();
    }

    /// Check if shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    /// Connect and run the read loop until shutdown or a terminal
    /// disconnect per the reconnect policy.
    pub async fn connect(&self) -> WsResult<()> {
        let url = push_endpoint(&self.config.origin)?;
        let mut attempt = 0u32;

        loop {
            if self.is_shutdown() {
                info!("Shutdown requested, exiting connect loop");
                *self.state.write() = ConnectionState::Disconnected;
                return Ok(());
            }

            *self.state.write() = ConnectionState::Connecting;

            let result = self.try_connect(&url).await;
            match &result {
                Ok(()) => info!("Push channel closed"),
                Err(e) => error!(?e, "Push channel error"),
            }

            if self.is_shutdown() {
                info!("Shutdown requested after disconnect, not reconnecting");
                *self.state.write() = ConnectionState::Disconnected;
                return Ok(());
            }

            let (base, max, max_attempts) = match self.config.reconnect {
                ReconnectPolicy::None => {
                    info!("Reconnect policy is None, staying disconnected");
                    *self.state.write() = ConnectionState::Disconnected;
                    return result;
                }
                ReconnectPolicy::Backoff {
                    base_delay_ms,
                    max_delay_ms,
                    max_attempts,
                } => (base_delay_ms, max_delay_ms, max_attempts),
            };

            // try_connect zeroes the shared counter on a successful open,
            // so max_attempts bounds consecutive failed dials, not the
            // total number of drops over the channel's lifetime.
            if *self.reconnect_count.read() == 0 {
                attempt = 0;
            }
            attempt += 1;
            *self.reconnect_count.write() = attempt;

            if max_attempts > 0 && attempt >= max_attempts {
                error!(attempt, "Max reconnection attempts reached");
                *self.state.write() = ConnectionState::Disconnected;
                return Err(WsError::ConnectionFailed(
                    "Max reconnection attempts reached".to_string(),
                ));
            }

            *self.state.write() = ConnectionState::Reconnecting;

            let delay = backoff_delay(base, max, attempt);
            warn!(attempt, delay_ms = delay.as_millis(), "Reconnecting");

            // Wait for the delay OR shutdown (cancellation-aware sleep).
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown requested during backoff, exiting");
                    *self.state.write() = ConnectionState::Disconnected;
                    return Ok(());
                }
            }
        }
    }

    async fn try_connect(&self, url: &str) -> WsResult<()> {
        info!(%url, "Connecting to push channel");

        let (ws_stream, _response) = connect_async_tls_with_config(url, None, true, None).await?;
        let (mut write, mut read) = ws_stream.split();

        // Authenticate immediately on open.
        let auth = serde_json::to_string(&AuthFrame::new(self.config.user_id))?;
        write.send(Message::Text(auth)).await?;

        *self.state.write() = ConnectionState::Connected;
        *self.reconnect_count.write() = 0;
        info!(user_id = self.config.user_id, "Push channel authenticated");

        loop {
            tokio::select! {
                () = self.shutdown_token.cancelled() => {
                    info!("Shutdown signal received in read loop");
                    if let Err(e) = write.send(Message::Close(None)).await {
                        warn!(?e, "Failed to send Close frame during shutdown");
                    }
                    *self.state.write() = ConnectionState::Disconnected;
                    return Ok(());
                }

                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_text_frame(&text).await;
                        }
                        Some(Ok(Message::Ping(data))) => {
                            debug!("Received ping, sending pong");
                            write.send(Message::Pong(data)).await?;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            let (code, reason) = frame
                                .map(|f| (f.code.into(), f.reason.to_string()))
                                .unwrap_or((1000, "Normal close".to_string()));
                            warn!(code, %reason, "Push channel closed by server");
                            return Err(WsError::ConnectionClosed { code, reason });
                        }
                        Some(Err(e)) => {
                            error!(?e, "Push channel read error");
                            return Err(e.into());
                        }
                        None => {
                            warn!("Push channel stream ended");
                            return Ok(());
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    /// Handle one text frame. Malformed payloads are logged and skipped;
    /// they never terminate the connection.
    async fn handle_text_frame(&self, text: &str) {
        match parse_frame(text) {
            Ok(Some(event)) => {
                FRAMES_TOTAL.with_label_values(&["alert"]).inc();
                if self.event_tx.send(event).await.is_err() {
                    warn!("Push event receiver dropped");
                }
            }
            Ok(None) => {
                FRAMES_TOTAL.with_label_values(&["ignored"]).inc();
            }
            Err(e) => {
                FRAMES_TOTAL.with_label_values(&["malformed"]).inc();
                warn!(error = %e, "Malformed push frame skipped");
            }
        }
    }
}

/// Exponential backoff: base * 2^(attempt-1), capped, plus 0-1000ms jitter.
fn backoff_delay(base_ms: u64, max_ms: u64, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(10);
    let delay = base_ms.saturating_mul(1u64 << exponent).min(max_ms);
    Duration::from_millis(delay + rand_jitter())
}

/// Generate random jitter (0-1000ms).
fn rand_jitter() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos % 1000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(reconnect: ReconnectPolicy) -> PushChannelConfig {
        PushChannelConfig {
            origin: "http://localhost:5000".to_string(),
            user_id: 1,
            reconnect,
        }
    }

    #[test]
    fn test_initial_state_is_disconnected() {
        let (tx, _rx) = mpsc::channel(8);
        let channel = PushChannel::new(test_config(ReconnectPolicy::None), tx);
        assert_eq!(channel.state(), ConnectionState::Disconnected);
        assert!(!channel.is_shutdown());
    }

    #[test]
    fn test_shutdown_flag() {
        let (tx, _rx) = mpsc::channel(8);
        let channel = PushChannel::new(test_config(ReconnectPolicy::None), tx);
        channel.shutdown();
        assert!(channel.is_shutdown());
    }

    #[test]
    fn test_backoff_delay_grows_and_caps() {
        let d1 = backoff_delay(1000, 60000, 1);
        let d3 = backoff_delay(1000, 60000, 3);
        let d20 = backoff_delay(1000, 60000, 20);

        // Jitter adds at most 1s on top of the deterministic part.
        assert!(d1 >= Duration::from_millis(1000) && d1 < Duration::from_millis(2001));
        assert!(d3 >= Duration::from_millis(4000) && d3 < Duration::from_millis(5001));
        assert!(d20 >= Duration::from_millis(60000) && d20 < Duration::from_millis(61001));
    }

    #[tokio::test]
    async fn test_connect_fails_fast_on_bad_origin() {
        let (tx, _rx) = mpsc::channel(8);
        let config = PushChannelConfig {
            origin: "nota-url".to_string(),
            user_id: 1,
            reconnect: ReconnectPolicy::None,
        };
        let channel = PushChannel::new(config, tx);
        assert!(matches!(
            channel.connect().await,
            Err(WsError::InvalidOrigin(_))
        ));
    }

    #[tokio::test]
    async fn test_handle_text_frame_tolerates_garbage_and_counts_outcomes() {
        let (tx, mut rx) = mpsc::channel(8);
        let channel = PushChannel::new(test_config(ReconnectPolicy::None), tx);

        let malformed_before = FRAMES_TOTAL.with_label_values(&["malformed"]).get();
        let ignored_before = FRAMES_TOTAL.with_label_values(&["ignored"]).get();

        channel.handle_text_frame("{{{{ not json").await;
        channel.handle_text_frame(r#"{"type":"mystery","data":{}}"#).await;
        assert!(rx.try_recv().is_err());

        let malformed = FRAMES_TOTAL.with_label_values(&["malformed"]).get();
        let ignored = FRAMES_TOTAL.with_label_values(&["ignored"]).get();
        assert_eq!(malformed - malformed_before, 1.0);
        assert_eq!(ignored - ignored_before, 1.0);
    }
}
