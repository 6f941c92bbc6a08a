//! Retired AI-account wrappers kept for source compatibility.
//!
//! The standalone AI-account endpoints no longer exist; accounts are managed
//! through the trading-account and paper-account operations on `ArenaApi`.
//! The methods here are intentionally inert: each logs a warning, performs
//! no I/O, and resolves with an empty `LegacyPlaceholder`. They return the
//! placeholder directly rather than a `Result` because they cannot fail.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::api::ArenaApi;
use crate::transport::Transport;

/// Payload the retired endpoints accepted. Known keys are typed; anything
/// else is carried opaquely in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LegacyAiAccountPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_capital: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Empty result of a retired call. Serializes to `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyPlaceholder {}

/// Capability for the retired AI-account operations.
///
/// The provided implementations are the only ones: every method is a no-op.
#[async_trait]
pub trait LegacyAiAccounts: Sync {
    #[deprecated(note = "use `ArenaApi::create_trading_account` or `ArenaApi::create_account`")]
    async fn create_ai_account(&self, _payload: LegacyAiAccountPayload) -> LegacyPlaceholder {
        warn!(replacement = "create_trading_account", "create_ai_account is deprecated and does nothing");
        LegacyPlaceholder::default()
    }

    #[deprecated(note = "use `ArenaApi::update_trading_account` or `ArenaApi::update_account`")]
    async fn update_ai_account(&self, account_id: i64, _payload: LegacyAiAccountPayload) -> LegacyPlaceholder {
        warn!(account_id, replacement = "update_trading_account", "update_ai_account is deprecated and does nothing");
        LegacyPlaceholder::default()
    }

    #[deprecated(note = "use `ArenaApi::delete_trading_account`")]
    async fn delete_ai_account(&self, account_id: i64) -> LegacyPlaceholder {
        warn!(account_id, replacement = "delete_trading_account", "delete_ai_account is deprecated and does nothing");
        LegacyPlaceholder::default()
    }
}

impl<T: Transport> LegacyAiAccounts for ArenaApi<T> {}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Counts calls and fails every one of them.
    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn retired_calls_resolve_without_network() {
        let api = ArenaApi::with_transport(&ClientConfig::default(), CountingTransport::default());
        let payload = LegacyAiAccountPayload {
            name: Some("Old Bot".to_string()),
            ..LegacyAiAccountPayload::default()
        };

        assert_eq!(api.create_ai_account(payload.clone()).await, LegacyPlaceholder {});
        assert_eq!(api.update_ai_account(3, payload).await, LegacyPlaceholder {});
        assert_eq!(api.delete_ai_account(3).await, LegacyPlaceholder {});
        assert_eq!(api.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn placeholder_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&LegacyPlaceholder::default()).unwrap(), "{}");
    }

    #[test]
    fn payload_keeps_unknown_keys() {
        let payload: LegacyAiAccountPayload =
            serde_json::from_str(r#"{"name":"Bot","temperature":0.2}"#).unwrap();
        assert_eq!(payload.name.as_deref(), Some("Bot"));
        assert_eq!(payload.extra["temperature"], 0.2);
    }
}
