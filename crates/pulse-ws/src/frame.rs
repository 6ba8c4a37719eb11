//! Push-channel frame types and parsing.
//!
//! Frames are JSON text. Outbound: one authentication frame sent
//! immediately after the socket opens. Inbound: tagged by `type`;
//! `alert` carries a full notification payload, unknown kinds are
//! ignored without error.

use pulse_core::AlertNotification;
use serde::Serialize;
use tracing::debug;

use crate::error::{WsError, WsResult};

/// Outbound authentication frame: `{"type":"authenticate","userId":<id>}`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthFrame {
    #[serde(rename = "type")]
    frame_type: &'static str,
    #[serde(rename = "userId")]
    user_id: i64,
}

impl AuthFrame {
    pub fn new(user_id: i64) -> Self {
        Self {
            frame_type: "authenticate",
            user_id,
        }
    }
}

/// Recognized inbound push event.
#[derive(Debug, Clone)]
pub enum PushEvent {
    /// A newly triggered alert.
    Alert(AlertNotification),
}

/// Parse one inbound text frame.
///
/// Returns `Ok(None)` for frames with an unrecognized `type` (they are
/// not errors). Malformed JSON or a bad `alert` payload is an error;
/// the connection loop logs it and keeps the connection alive.
pub fn parse_frame(text: &str) -> WsResult<Option<PushEvent>> {
    let value: serde_json::Value = serde_json::from_str(text)?;

    let kind = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| WsError::ParseError("frame has no string `type` field".to_string()))?;

    match kind {
        "alert" => {
            let data = value
                .get("data")
                .ok_or_else(|| WsError::ParseError("alert frame has no `data`".to_string()))?;
            let notification: AlertNotification = serde_json::from_value(data.clone())
                .map_err(|e| WsError::ParseError(format!("invalid alert payload: {e}")))?;
            Ok(Some(PushEvent::Alert(notification)))
        }
        other => {
            debug!(kind = %other, "Ignoring unrecognized frame kind");
            Ok(None)
        }
    }
}
