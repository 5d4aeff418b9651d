//! HTTP handlers for transaction operations
//!
//! Handlers only extract parameters, call [`TransactionService`] and wrap
//! the result; every failure is an [`ApiError`](crate::core::ApiError) that
//! renders itself.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::core::query::{ApiQuery, MonthQuery, TransactionPage, TransactionQuery};
use crate::core::report::{CategoryDistribution, CombinedReport, PriceRangeHistogram, SaleStatistics};
use crate::core::ApiResult;
use crate::transactions::service::TransactionService;

/// Application state shared across handlers
pub type AppState = TransactionService;

/// Response for the initialize endpoint
#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub message: String,
    pub inserted: usize,
}

/// Re-seed the store from the remote feed
///
/// POST /api/initialize (GET is accepted too)
pub async fn initialize(
    State(service): State<AppState>,
) -> ApiResult<(StatusCode, Json<InitializeResponse>)> {
    let outcome = service.initialize().await?;

    Ok((
        StatusCode::CREATED,
        Json(InitializeResponse {
            message: "Database initialized successfully".to_string(),
            inserted: outcome.inserted,
        }),
    ))
}

/// List one page of transactions
///
/// GET /api/transactions?title=&description=&price=&month=March&page=1&limit=10
pub async fn list_transactions(
    State(service): State<AppState>,
    ApiQuery(query): ApiQuery<TransactionQuery>,
) -> ApiResult<Json<TransactionPage>> {
    let page = service.list_transactions(&query).await?;
    Ok(Json(page))
}

/// GET /api/statistics?month=March
pub async fn get_statistics(
    State(service): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<SaleStatistics>> {
    let month = query.month()?;
    Ok(Json(service.statistics(month).await?))
}

/// GET /api/price-range?month=March
pub async fn get_price_range_data(
    State(service): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<PriceRangeHistogram>> {
    let month = query.month()?;
    Ok(Json(service.price_ranges(month).await?))
}

/// GET /api/category-distribution?month=March
pub async fn get_category_distribution(
    State(service): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<CategoryDistribution>> {
    let month = query.month()?;
    Ok(Json(service.category_distribution(month).await?))
}

/// Statistics, price ranges and categories in one response
///
/// GET /api/combined?month=March
pub async fn get_combined_data(
    State(service): State<AppState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> ApiResult<Json<CombinedReport>> {
    let month = query.month()?;
    Ok(Json(service.combined(month).await?))
}
