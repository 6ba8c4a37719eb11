//! Alert notification types.
//!
//! Mirrors the wire shape served by `/api/alert-notifications` and carried
//! in `alert` push frames. Field names on the wire are camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery status of an alert notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered,
    Failed,
    Pending,
}

/// Channel an alert was (or will be) delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    App,
    Email,
    Sms,
    All,
}

/// One delivered or pending alert event.
///
/// Created either by the initial bulk fetch (historical) or by a push frame
/// (live). `id`, `trigger_id` and `triggered_at` are immutable after
/// creation; the session-local read flag lives outside this struct (see
/// `pulse-notify`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertNotification {
    /// Unique identifier within the session's notification set.
    pub id: i64,
    /// Originating trigger rule.
    pub trigger_id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Instrument symbol (e.g., "RELIANCE", "TCS").
    pub symbol: String,
    /// Time the trigger condition was satisfied.
    pub triggered_at: DateTime<Utc>,
    /// Value that caused the trigger. Kept as a string to preserve the
    /// server's original formatting and precision.
    pub trigger_value: String,
    /// Human-readable message.
    pub message: String,
    /// Delivery status.
    pub status: DeliveryStatus,
    /// Delivery channel.
    pub channel: DeliveryChannel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case_wire_shape() {
        let value = json!({
            "id": 42,
            "triggerId": 7,
            "userId": 3,
            "symbol": "RELIANCE",
            "triggeredAt": "2025-01-15T09:30:00Z",
            "triggerValue": "2450.50",
            "message": "RELIANCE crossed 2450",
            "status": "delivered",
            "channel": "app"
        });

        let n: AlertNotification = serde_json::from_value(value).unwrap();
        assert_eq!(n.id, 42);
        assert_eq!(n.trigger_id, 7);
        assert_eq!(n.symbol, "RELIANCE");
        assert_eq!(n.trigger_value, "2450.50");
        assert_eq!(n.status, DeliveryStatus::Delivered);
        assert_eq!(n.channel, DeliveryChannel::App);
    }

    #[test]
    fn test_trigger_value_preserves_formatting() {
        let value = json!({
            "id": 1,
            "triggerId": 1,
            "userId": 1,
            "symbol": "TCS",
            "triggeredAt": "2025-01-15T09:30:00Z",
            "triggerValue": "3100.00",
            "message": "TCS above 3100",
            "status": "pending",
            "channel": "all"
        });

        let n: AlertNotification = serde_json::from_value(value).unwrap();
        // Trailing zeros must survive; the value is never reparsed as a number.
        assert_eq!(n.trigger_value, "3100.00");
    }

    #[test]
    fn test_status_roundtrip_lowercase() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::Failed).unwrap(),
            r#""failed""#
        );
        assert_eq!(
            serde_json::to_string(&DeliveryChannel::Sms).unwrap(),
            r#""sms""#
        );
    }
}
