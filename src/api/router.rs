use super::handlers;
use crate::service::FundingService;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds and returns the full Axum router with all routes and shared state.
pub fn build(service: Arc<FundingService>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/funding/{exchange}", get(handlers::get_funding))
        .route(
            "/funding/{exchange}/{symbol}/history",
            get(handlers::get_history),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
