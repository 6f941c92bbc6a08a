//! In-process stand-in for the arena backend.
//!
//! Serves the same routes under `/api` that `arena-client` calls, backed by
//! an in-memory `Store`. Used by the client's live-server tests and runnable
//! on its own via the `mock-server` binary.

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;

pub mod dto;
pub mod error;
mod handlers;
pub mod state;

pub use error::AppError;
pub use state::{AppState, Store};

use handlers::{accounts, arena, config, crypto, decisions, users};

/// Router over a freshly seeded store.
pub fn app() -> Router {
    app_with_state(Store::seeded().into_shared())
}

pub fn app_with_state(state: AppState) -> Router {
    let api = Router::new()
        .route("/config/check-required", get(config::check_required))
        .route("/crypto/symbols", get(crypto::symbols))
        .route("/crypto/price/{symbol}", get(crypto::price))
        .route("/crypto/status/{symbol}", get(crypto::status))
        .route("/crypto/popular", get(crypto::popular))
        .route("/users/login", post(users::login))
        .route("/users/profile", get(users::profile))
        .route("/accounts/", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/{account_id}",
            get(accounts::get).put(accounts::update).delete(accounts::delete),
        )
        .route("/accounts/{account_id}/ai-decisions", get(decisions::list))
        .route("/accounts/{account_id}/ai-decisions/stats", get(decisions::stats))
        .route(
            "/accounts/{account_id}/ai-decisions/{decision_id}",
            get(decisions::get),
        )
        .route("/account/list", get(arena::list))
        .route("/account/overview", get(arena::overview))
        .route("/account/", post(arena::create))
        .route("/account/test-llm", post(arena::test_llm))
        .route("/account/{account_id}", put(arena::update));

    Router::new().nest("/api", api).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
