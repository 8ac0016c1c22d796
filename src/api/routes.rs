//! API Routes
//!
//! HTTP adapters over the query service and seed loader. Handlers parse
//! query parameters, call one service method and serialize its result.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{require_month, TransactionFilter};
use crate::error::{AppError, AppResult};
use crate::query::{CategoryCount, CombinedData, PriceRangeCount, Statistics, TransactionPage};

use super::state::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

/// Raw query string for the transaction list
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub per_page: Option<String>,
}

impl TryFrom<TransactionsQuery> for TransactionFilter {
    type Error = AppError;

    fn try_from(query: TransactionsQuery) -> Result<Self, Self::Error> {
        Ok(TransactionFilter::from_params(
            query.month.as_deref(),
            query.search.as_deref(),
            query.page.as_deref(),
            query.per_page.as_deref(),
        )?)
    }
}

/// Query string carrying only a month
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InitializeResponse {
    pub message: String,
    pub count: u64,
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(initialize))
        .route("/products/transactions", get(list_transactions))
        .route("/products/statistics", get(get_statistics))
        .route(
            "/products/price-range-distribution",
            get(get_price_range_distribution),
        )
        .route(
            "/products/category-distribution",
            get(get_category_distribution),
        )
        .route("/products/combined-data", get(get_combined_data))
}

// =========================================================================
// POST /initialize
// =========================================================================

/// Replace all stored transactions with the remote seed feed
async fn initialize(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<InitializeResponse>)> {
    let outcome = state.seed.run().await?;

    Ok((
        StatusCode::CREATED,
        Json(InitializeResponse {
            message: "Database initialized with seed data".to_string(),
            count: outcome.count,
        }),
    ))
}

// =========================================================================
// GET /products/transactions
// =========================================================================

/// Paginated, filtered transaction list
async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<TransactionsQuery>, QueryRejection>,
) -> AppResult<Json<TransactionPage>> {
    let filter = TransactionFilter::try_from(query_params(query)?)?;
    let page = state.queries.list_transactions(&filter).await?;
    Ok(Json(page))
}

// =========================================================================
// GET /products/statistics
// =========================================================================

/// Sale totals for a month
async fn get_statistics(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> AppResult<Json<Statistics>> {
    let month = require_month(query_params(query)?.month.as_deref())?;
    Ok(Json(state.queries.statistics(month).await?))
}

// =========================================================================
// GET /products/price-range-distribution
// =========================================================================

/// Price histogram for a month
async fn get_price_range_distribution(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> AppResult<Json<Vec<PriceRangeCount>>> {
    let month = require_month(query_params(query)?.month.as_deref())?;
    Ok(Json(state.queries.price_range_distribution(month).await?))
}

// =========================================================================
// GET /products/category-distribution
// =========================================================================

/// Category histogram for a month
async fn get_category_distribution(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> AppResult<Json<Vec<CategoryCount>>> {
    let month = require_month(query_params(query)?.month.as_deref())?;
    Ok(Json(state.queries.category_distribution(month).await?))
}

// =========================================================================
// GET /products/combined-data
// =========================================================================

/// Statistics plus both distributions in one payload
async fn get_combined_data(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> AppResult<Json<CombinedData>> {
    let month = require_month(query_params(query)?.month.as_deref())?;
    Ok(Json(state.queries.combined(month).await?))
}
