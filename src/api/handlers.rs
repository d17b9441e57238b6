use super::models::{FundingResponse, HistoryResponse};
use crate::errors::ExchangeError;
use crate::service::FundingService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// GET /health — simple liveness check
pub async fn health() -> &'static str {
    "OK"
}

#[derive(Deserialize)]
pub struct RankQuery {
    pub top: Option<usize>,
}

fn error_status(exchange: &str, e: ExchangeError) -> StatusCode {
    match e {
        ExchangeError::UnknownExchange(_) => StatusCode::NOT_FOUND,
        e => {
            tracing::error!("[{exchange}] request failed: {e}");
            StatusCode::BAD_GATEWAY
        }
    }
}

/// GET /funding/{exchange} — ranked top-N funding rates for one exchange
pub async fn get_funding(
    State(service): State<Arc<FundingService>>,
    Path(exchange): Path<String>,
    Query(query): Query<RankQuery>,
) -> Result<Json<FundingResponse>, StatusCode> {
    let exchange = exchange.to_lowercase();

    let snap = service
        .ranked(&exchange, query.top)
        .await
        .map_err(|e| error_status(&exchange, e))?;

    Ok(Json(FundingResponse {
        exchange: snap.exchange.to_string(),
        fetched_ms: snap.fetched_ms,
        entries: snap.entries.into_iter().map(Into::into).collect(),
    }))
}

/// GET /funding/{exchange}/{symbol}/history — funding settlements, oldest first
pub async fn get_history(
    State(service): State<Arc<FundingService>>,
    Path((exchange, symbol)): Path<(String, String)>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    let exchange = exchange.to_lowercase();
    let symbol = symbol.to_uppercase();

    // an empty series is valid data and passes through as []
    let points = service
        .history(&exchange, &symbol)
        .await
        .map_err(|e| error_status(&exchange, e))?;

    Ok(Json(HistoryResponse {
        exchange,
        symbol,
        points: points.into_iter().map(Into::into).collect(),
    }))
}
