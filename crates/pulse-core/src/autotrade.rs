//! Auto-trade configuration wire types.

use serde::{Deserialize, Serialize};

/// One auto-trade configuration as returned by `/api/auto-trade/configs`.
///
/// Only `id` is guaranteed by the server; the remaining fields are
/// best-effort and default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTradeConfig {
    pub id: i64,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_config_only_id() {
        let c: AutoTradeConfig = serde_json::from_value(json!({"id": 5})).unwrap();
        assert_eq!(c.id, 5);
        assert!(c.symbol.is_none());
        assert!(!c.enabled);
    }

    #[test]
    fn test_full_config() {
        let c: AutoTradeConfig =
            serde_json::from_value(json!({"id": 2, "symbol": "INFY", "enabled": true})).unwrap();
        assert_eq!(c.symbol.as_deref(), Some("INFY"));
        assert!(c.enabled);
    }
}
