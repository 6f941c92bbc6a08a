//! Request and response DTOs for the arena backend.
//!
//! # Design
//! These are pass-through shapes with no local invariants beyond field
//! presence. They are defined independently from the mock-server crate;
//! the live-server integration tests catch schema drift between the two.
//! Payloads the backend treats as open-ended keep their known fields typed
//! and collect the rest in a flattened `extra` map.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequiredConfigStatus {
    pub has_required_configs: bool,
    #[serde(default)]
    pub missing_configs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Market data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoPrice {
    pub symbol: String,
    pub price: f64,
    pub market: String,
}

/// Market status for one symbol. Only the commonly present keys are typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularCrypto {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub market: String,
}

// ---------------------------------------------------------------------------
// AI decisions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOperation {
    Buy,
    Sell,
    Hold,
}

impl DecisionOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            DecisionOperation::Buy => "buy",
            DecisionOperation::Sell => "sell",
            DecisionOperation::Hold => "hold",
        }
    }
}

impl fmt::Display for DecisionOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged AI trading decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiDecision {
    pub id: i64,
    pub account_id: i64,
    pub decision_time: String,
    pub reason: String,
    pub operation: DecisionOperation,
    #[serde(default)]
    pub symbol: Option<String>,
    pub prev_portion: f64,
    pub target_portion: f64,
    pub total_balance: f64,
    pub executed: bool,
    #[serde(default)]
    pub order_id: Option<i64>,
}

/// Optional filters for listing AI decisions. Unset fields are left out of
/// the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiDecisionFilters {
    pub operation: Option<DecisionOperation>,
    pub symbol: Option<String>,
    pub executed: Option<bool>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    pub limit: Option<u32>,
}

impl AiDecisionFilters {
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiDecisionStats {
    pub period_days: u32,
    pub total_decisions: u64,
    pub executed_decisions: u64,
    pub buy_decisions: u64,
    pub sell_decisions: u64,
    pub hold_decisions: u64,
    pub execution_rate: f64,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAuthResponse {
    pub user: User,
    pub session_token: String,
    pub expires_at: String,
}

// ---------------------------------------------------------------------------
// Trading accounts (session-token scoped)
// ---------------------------------------------------------------------------

/// A user's trading account. `api_key` arrives masked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradingAccount {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub initial_capital: f64,
    pub current_cash: f64,
    pub frozen_cash: f64,
    pub account_type: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradingAccountCreate {
    pub name: String,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub initial_capital: f64,
    pub account_type: String,
}

impl TradingAccountCreate {
    /// An AI account with the backend's default model, endpoint and capital.
    pub fn new(name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: "gpt-4-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: api_key.into(),
            initial_capital: 10_000.0,
            account_type: "AI".to_string(),
        }
    }
}

/// Partial update; only the fields present are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TradingAccountUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Paper-trading accounts (single fixed user)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArenaAccount {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub account_type: String,
    pub initial_capital: f64,
    pub current_cash: f64,
    pub frozen_cash: f64,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArenaAccountCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_capital: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArenaAccountUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Overview of the default paper-trading account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountOverview {
    pub account: OverviewAccount,
    pub portfolio: Portfolio,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverviewAccount {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub current_cash: f64,
    pub frozen_cash: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    pub total_assets: f64,
    pub positions_value: f64,
    #[serde(default)]
    pub positions_count: u64,
    #[serde(default)]
    pub pending_orders: u64,
}

// ---------------------------------------------------------------------------
// LLM connectivity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmTestRequest {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmTestResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}
