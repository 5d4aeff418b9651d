//! Router construction for the transactions API

use crate::transactions::handlers::{
    AppState, get_category_distribution, get_combined_data, get_price_range_data, get_statistics,
    initialize, list_transactions,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the transaction routes
///
/// - POST|GET /api/initialize - Re-seed the store from the remote feed
/// - GET /api/transactions - Filtered, paginated listing
/// - GET /api/statistics - Sale totals for a month
/// - GET /api/price-range - Price histogram for a month
/// - GET /api/category-distribution - Category counts for a month
/// - GET /api/combined - All three month reports
pub fn build_transaction_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/initialize", get(initialize).post(initialize))
        .route("/api/transactions", get(list_transactions))
        .route("/api/statistics", get(get_statistics))
        .route("/api/price-range", get(get_price_range_data))
        .route("/api/category-distribution", get(get_category_distribution))
        .route("/api/combined", get(get_combined_data))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}

/// Full application router with tracing and permissive CORS
///
/// The dashboard that consumes this API is served from another origin.
pub fn build_router(state: AppState) -> Router {
    health_routes().merge(build_transaction_routes(state)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
