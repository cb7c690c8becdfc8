use crate::storage::StorageService;
use anyhow::{anyhow, Result};
use serde_json::Value;

/// Store key holding the decoder endpoint URL.
pub const BACKEND_URL_KEY: &str = "backendUrl";
/// Store key holding the overlay auto-dismiss delay in seconds.
pub const DISMISS_SECONDS_KEY: &str = "popupDismissSeconds";

/// Delay applied when no valid `popupDismissSeconds` is stored.
pub const DEFAULT_DISMISS_SECONDS: i64 = 15;
/// Largest accepted auto-dismiss delay.
pub const MAX_DISMISS_SECONDS: i64 = 90;

/// Resolve the backend endpoint. There is no built-in default; without a
/// configured URL nothing can be dispatched.
pub fn backend_url(store: &dyn StorageService) -> Result<String> {
    store
        .get(BACKEND_URL_KEY)
        .as_ref()
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no backend URL configured"))
}

/// The stored auto-dismiss delay, if one is set. Values of the wrong type
/// count as unset.
pub fn stored_dismiss_seconds(store: &dyn StorageService) -> Option<i64> {
    store
        .get(DISMISS_SECONDS_KEY)
        .as_ref()
        .and_then(Value::as_i64)
}

/// Effective auto-dismiss delay: the stored value when present, otherwise
/// [`DEFAULT_DISMISS_SECONDS`]. A stored zero is respected, not defaulted.
pub fn resolve_dismiss_seconds(stored: Option<i64>) -> i64 {
    stored.unwrap_or(DEFAULT_DISMISS_SECONDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults_when_unset() {
        assert_eq!(resolve_dismiss_seconds(None), 15);
    }

    #[test]
    fn resolve_keeps_stored_value() {
        assert_eq!(resolve_dismiss_seconds(Some(45)), 45);
    }

    #[test]
    fn resolve_keeps_zero() {
        assert_eq!(resolve_dismiss_seconds(Some(0)), 0);
    }
}
