//! Wire shapes of the mock backend.
//!
//! Defined independently from the client crate's DTOs; the client's
//! live-server tests catch drift between the two.

use serde::{Deserialize, Serialize};

// -- inputs -----------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

fn default_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_capital() -> f64 {
    10_000.0
}

fn default_account_type() -> String {
    "AI".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AccountCreateBody {
    pub name: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_capital")]
    pub initial_capital: f64,
    #[serde(default = "default_account_type")]
    pub account_type: String,
}

/// Shared by both update routes; only the fields present are applied.
#[derive(Debug, Default, Deserialize)]
pub struct AccountUpdateBody {
    pub name: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArenaAccountBody {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub initial_capital: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LlmTestBody {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionQuery {
    pub operation: Option<String>,
    pub symbol: Option<String>,
    pub executed: Option<bool>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub days: Option<u32>,
}

// -- outputs ----------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequiredConfigs {
    pub has_required_configs: bool,
    pub missing_configs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceOut {
    pub symbol: String,
    pub price: f64,
    pub market: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStatusOut {
    pub symbol: String,
    pub market: String,
    pub market_status: String,
    pub price: f64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularOut {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub market: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthOut {
    pub user: UserOut,
    pub session_token: String,
    pub expires_at: String,
}

/// Account as seen by its owner; `api_key` is masked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOut {
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

/// Account as listed on the paper-trading dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaAccountOut {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub account_type: String,
    pub initial_capital: f64,
    pub current_cash: f64,
    pub frozen_cash: f64,
    pub model: Option<String>,
    pub base_url: String,
    pub api_key: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewOut {
    pub account: OverviewAccountOut,
    pub portfolio: PortfolioOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewAccountOut {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub current_cash: f64,
    pub frozen_cash: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioOut {
    pub total_assets: f64,
    pub positions_value: f64,
    pub positions_count: u64,
    pub pending_orders: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageOut {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmTestOut {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionOut {
    pub id: i64,
    pub account_id: i64,
    pub decision_time: chrono::DateTime<chrono::Utc>,
    pub reason: String,
    pub operation: String,
    pub symbol: Option<String>,
    pub prev_portion: f64,
    pub target_portion: f64,
    pub total_balance: f64,
    pub executed: bool,
    pub order_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOut {
    pub period_days: u32,
    pub total_decisions: u64,
    pub executed_decisions: u64,
    pub buy_decisions: u64,
    pub sell_decisions: u64,
    pub hold_decisions: u64,
    pub execution_rate: f64,
}
