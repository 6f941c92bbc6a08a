//! Trading accounts scoped to the caller's session.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::dto::{AccountCreateBody, AccountOut, AccountUpdateBody, MessageOut, SessionQuery};
use crate::error::AppError;
use crate::state::AppState;

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<AccountOut>>, AppError> {
    let store = state.read().await;
    let user_id = store.authenticate(&query.session_token)?;
    Ok(Json(store.accounts_of(user_id)))
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
    Json(input): Json<AccountCreateBody>,
) -> Result<Json<AccountOut>, AppError> {
    let mut store = state.write().await;
    let user_id = store.authenticate(&query.session_token)?;
    let account = store.create_account(user_id, input)?;
    info!(account_id = account.id, user_id, "trading account created");
    Ok(Json(account))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<AccountOut>, AppError> {
    let store = state.read().await;
    let user_id = store.authenticate(&query.session_token)?;
    Ok(Json(store.owned_account(user_id, account_id)?.to_masked()))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Query(query): Query<SessionQuery>,
    Json(input): Json<AccountUpdateBody>,
) -> Result<Json<AccountOut>, AppError> {
    let mut store = state.write().await;
    let user_id = store.authenticate(&query.session_token)?;
    Ok(Json(store.update_account(user_id, account_id, input)?))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<MessageOut>, AppError> {
    let mut store = state.write().await;
    let user_id = store.authenticate(&query.session_token)?;
    let name = store.deactivate_account(user_id, account_id)?;
    info!(account_id, "trading account deactivated");
    Ok(Json(MessageOut {
        message: format!("Account {name} deactivated successfully"),
    }))
}
