//! Push endpoint derivation.
//!
//! The push channel lives at `/ws` on the assistant server's own host,
//! secure iff the origin is secure.

use crate::error::{WsError, WsResult};

/// Derive the push-channel URL from an HTTP(S) origin.
///
/// `https://host[:port]` maps to `wss://host[:port]/ws`, `http://` to
/// `ws://`. Trailing slashes on the origin are tolerated.
pub fn push_endpoint(origin: &str) -> WsResult<String> {
    let origin = origin.trim_end_matches('/');

    let (scheme, rest) = if let Some(rest) = origin.strip_prefix("https://") {
        ("wss", rest)
    } else if let Some(rest) = origin.strip_prefix("http://") {
        ("ws", rest)
    } else {
        return Err(WsError::InvalidOrigin(format!(
            "origin must start with http:// or https://: {origin}"
        )));
    };

    if rest.is_empty() {
        return Err(WsError::InvalidOrigin("origin has no host".to_string()));
    }

    Ok(format!("{scheme}://{rest}/ws"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_origin_maps_to_wss() {
        assert_eq!(
            push_endpoint("https://desk.example.com").unwrap(),
            "wss://desk.example.com/ws"
        );
    }

    #[test]
    fn test_plain_origin_maps_to_ws() {
        assert_eq!(
            push_endpoint("http://localhost:5000").unwrap(),
            "ws://localhost:5000/ws"
        );
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        assert_eq!(
            push_endpoint("http://localhost:5000/").unwrap(),
            "ws://localhost:5000/ws"
        );
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        assert!(push_endpoint("ftp://example.com").is_err());
        assert!(push_endpoint("example.com").is_err());
    }

    #[test]
    fn test_empty_host_rejected() {
        assert!(push_endpoint("https://").is_err());
    }
}
