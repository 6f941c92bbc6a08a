use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::dto::{MarketStatusOut, PopularOut, PriceOut};
use crate::error::AppError;
use crate::state::{AppState, MARKET, POPULAR_SYMBOLS};

pub(crate) async fn symbols(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.read().await.symbols())
}

pub(crate) async fn price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<PriceOut>, AppError> {
    let price = state
        .read()
        .await
        .price(&symbol)
        .ok_or_else(|| AppError::not_found("symbol not found"))?;
    Ok(Json(PriceOut {
        symbol,
        price,
        market: MARKET.to_string(),
    }))
}

pub(crate) async fn status(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<MarketStatusOut>, AppError> {
    let price = state
        .read()
        .await
        .price(&symbol)
        .ok_or_else(|| AppError::not_found("symbol not found"))?;
    Ok(Json(MarketStatusOut {
        symbol,
        market: MARKET.to_string(),
        market_status: "OPEN".to_string(),
        price,
        timestamp: Utc::now().timestamp_millis(),
    }))
}

pub(crate) async fn popular(State(state): State<AppState>) -> Json<Vec<PopularOut>> {
    let store = state.read().await;
    let popular = POPULAR_SYMBOLS
        .iter()
        .filter_map(|symbol| {
            store.price(symbol).map(|price| PopularOut {
                symbol: symbol.to_string(),
                name: symbol.to_string(),
                price,
                market: MARKET.to_string(),
            })
        })
        .collect();
    Json(popular)
}
