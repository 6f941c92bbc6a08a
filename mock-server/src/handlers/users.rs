use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use crate::dto::{AuthOut, LoginBody, SessionQuery, UserOut};
use crate::error::AppError;
use crate::state::AppState;

pub(crate) async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginBody>,
) -> Result<Json<AuthOut>, AppError> {
    let (user, session_token, expires_at) = state.write().await.login(&input.username)?;
    info!(user_id = user.id, "session issued");
    Ok(Json(AuthOut {
        user: user.to_out(),
        session_token,
        expires_at: expires_at.to_rfc3339(),
    }))
}

pub(crate) async fn profile(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<UserOut>, AppError> {
    let store = state.read().await;
    let user_id = store.authenticate(&query.session_token)?;
    let user = store.user(user_id).ok_or_else(|| AppError::not_found("No user found"))?;
    Ok(Json(user.to_out()))
}
