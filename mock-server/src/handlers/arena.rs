//! Paper-trading dashboard accounts. No session required.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::dto::{
    AccountUpdateBody, ArenaAccountBody, ArenaAccountOut, LlmTestBody, LlmTestOut,
    OverviewAccountOut, OverviewOut, PortfolioOut,
};
use crate::error::AppError;
use crate::state::AppState;

pub(crate) async fn list(State(state): State<AppState>) -> Json<Vec<ArenaAccountOut>> {
    let store = state.read().await;
    Json(
        store
            .active_accounts()
            .map(|account| store.arena_account(account))
            .collect(),
    )
}

pub(crate) async fn overview(State(state): State<AppState>) -> Result<Json<OverviewOut>, AppError> {
    let store = state.read().await;
    let account = store
        .active_accounts()
        .next()
        .ok_or_else(|| AppError::not_found("No active account found"))?;
    // The mock holds no positions, so assets are cash only.
    Ok(Json(OverviewOut {
        account: OverviewAccountOut {
            id: account.id,
            name: account.name.clone(),
            account_type: account.account_type.clone(),
            current_cash: account.current_cash,
            frozen_cash: account.frozen_cash,
        },
        portfolio: PortfolioOut {
            total_assets: account.current_cash,
            positions_value: 0.0,
            positions_count: 0,
            pending_orders: 0,
        },
    }))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Json(input): Json<ArenaAccountBody>,
) -> Result<Json<ArenaAccountOut>, AppError> {
    Ok(Json(state.write().await.create_arena_account(input)?))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Json(input): Json<AccountUpdateBody>,
) -> Result<Json<ArenaAccountOut>, AppError> {
    Ok(Json(state.write().await.update_arena_account(account_id, input)?))
}

/// Validates the inputs like the real backend but never dials out.
pub(crate) async fn test_llm(Json(input): Json<LlmTestBody>) -> Json<LlmTestOut> {
    let failure = |message: &str| LlmTestOut {
        success: false,
        message: message.to_string(),
        response: None,
    };
    if input.api_key.as_deref().is_none_or(str::is_empty) {
        return Json(failure("API key is required"));
    }
    if input.base_url.as_deref().is_none_or(str::is_empty) {
        return Json(failure("Base URL is required"));
    }
    let model = input.model.unwrap_or_else(|| "gpt-4-turbo".to_string());
    Json(LlmTestOut {
        success: true,
        message: format!("Connection to {model} successful"),
        response: Some("Connection test successful".to_string()),
    })
}
