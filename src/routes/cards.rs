//! Card routes: filtered listing, aggregate statistics and chart series.

use std::future::Future;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::models::pagination::Pagination;
use crate::services::cards::{self as card_service, CardFilters, CardPage};
use crate::services::charts::{self as chart_service, DashboardCharts};
use crate::services::stats::{self as stats_service, CardStats};
use crate::AppState;

/// GET /records — list cards with filters and pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<CardFilters>,
) -> Result<Json<CardPage>, AppError> {
    let page = bounded(
        state.config.query_timeout(),
        card_service::list(&state.db, &filters, &pagination),
    )
    .await?;
    Ok(Json(page))
}

/// GET /records/stats — the nine aggregations over the whole table.
pub async fn stats(State(state): State<AppState>) -> Result<Json<CardStats>, AppError> {
    let stats = bounded(state.config.query_timeout(), stats_service::get_stats(&state.db)).await?;
    Ok(Json(stats))
}

/// GET /records/stats/charts — chart-ready series built from the aggregations.
pub async fn charts(State(state): State<AppState>) -> Result<Json<DashboardCharts>, AppError> {
    let stats = bounded(state.config.query_timeout(), stats_service::get_stats(&state.db)).await?;
    Ok(Json(chart_service::build(&stats)))
}

/// Run a store call under `limit`. Dropping the future on expiry cancels its
/// in-flight queries and returns their connections to the pool.
async fn bounded<T>(
    limit: Duration,
    work: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    tokio::time::timeout(limit, work)
        .await
        .map_err(|_| AppError::Timeout(limit))?
}
