//! Cross-project reporting endpoints.

use axum::extract::{Query, State};
use axum::Json;

use beacon_core::error::AppError;
use beacon_entity::stats::{CountryCount, DayCount, EventTypeCount, PageCount};
use beacon_service::DashboardStats;

use crate::dto::request::{clamp_limit, DaysQuery, LimitQuery};
use crate::dto::response::{ApiResponse, ListResponse};
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;
const DEFAULT_DAYS: i64 = 7;
const MAX_DAYS: i64 = 365;

/// GET /api/v1/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let stats = state.analytics_service.dashboard().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/v1/analytics/events-by-day
pub async fn events_by_day(
    State(state): State<AppState>,
    Query(query): Query<DaysQuery>,
) -> Result<Json<ListResponse<DayCount>>, AppError> {
    let days = clamp_limit(query.days, DEFAULT_DAYS, MAX_DAYS);
    let counts = state.analytics_service.events_by_day(days).await?;
    Ok(Json(ListResponse::bare(counts).with_days(days)))
}

/// GET /api/v1/analytics/top-pages
pub async fn top_pages(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ListResponse<PageCount>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let pages = state.analytics_service.top_pages(limit).await?;
    Ok(Json(ListResponse::new(pages, limit)))
}

/// GET /api/v1/analytics/top-countries
pub async fn top_countries(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ListResponse<CountryCount>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let countries = state.analytics_service.top_countries(limit).await?;
    Ok(Json(ListResponse::new(countries, limit)))
}

/// GET /api/v1/analytics/top-event-types
pub async fn top_event_types(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ListResponse<EventTypeCount>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let types = state.analytics_service.top_event_types(limit).await?;
    Ok(Json(ListResponse::new(types, limit)))
}
