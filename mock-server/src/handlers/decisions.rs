use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::dto::{DecisionOut, DecisionQuery, StatsOut, StatsQuery};
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_STATS_DAYS: u32 = 30;

pub(crate) async fn list(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Query(query): Query<DecisionQuery>,
) -> Result<Json<Vec<DecisionOut>>, AppError> {
    Ok(Json(state.read().await.decisions(account_id, &query)?))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Path((account_id, decision_id)): Path<(i64, i64)>,
) -> Result<Json<DecisionOut>, AppError> {
    Ok(Json(state.read().await.decision(account_id, decision_id)?))
}

pub(crate) async fn stats(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsOut>, AppError> {
    let days = query.days.unwrap_or(DEFAULT_STATS_DAYS);
    Ok(Json(state.read().await.decision_stats(account_id, days)?))
}
