//! Per-project realtime reporting endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use beacon_core::error::AppError;
use beacon_entity::stats::{CountryCount, EventTypeCount, PageBreakdown};
use beacon_service::{ProjectLiveStats, RecentEvent};

use crate::dto::request::{clamp_limit, LimitQuery};
use crate::dto::response::{ApiResponse, ListResponse};
use crate::state::AppState;

const DEFAULT_EVENTS_LIMIT: i64 = 50;
const MAX_EVENTS_LIMIT: i64 = 200;
const DEFAULT_BREAKDOWN_LIMIT: i64 = 10;
const MAX_BREAKDOWN_LIMIT: i64 = 50;

/// GET /api/v1/admin/projects/{id}/realtime/stats
pub async fn project_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectLiveStats>>, AppError> {
    // 404 for unknown projects rather than all-zero stats.
    state.project_service.get_project(id).await?;

    let stats = state.live_service.stats(id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/v1/admin/projects/{id}/realtime/events
pub async fn recent_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ListResponse<RecentEvent>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_EVENTS_LIMIT, MAX_EVENTS_LIMIT);
    state.project_service.get_project(id).await?;

    let events = state.live_service.recent_events(id, limit).await?;
    Ok(Json(ListResponse::new(events, limit)))
}

/// GET /api/v1/admin/projects/{id}/realtime/event-types
pub async fn event_type_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ListResponse<EventTypeCount>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_BREAKDOWN_LIMIT, MAX_BREAKDOWN_LIMIT);
    state.project_service.get_project(id).await?;

    let stats = state.live_service.event_type_stats(id, limit).await?;
    Ok(Json(ListResponse::new(stats, limit)))
}

/// GET /api/v1/admin/projects/{id}/realtime/countries
pub async fn country_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ListResponse<CountryCount>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_BREAKDOWN_LIMIT, MAX_BREAKDOWN_LIMIT);
    state.project_service.get_project(id).await?;

    let stats = state.live_service.country_stats(id, limit).await?;
    Ok(Json(ListResponse::new(stats, limit)))
}

/// GET /api/v1/admin/projects/{id}/realtime/pages
pub async fn page_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ListResponse<PageBreakdown>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_BREAKDOWN_LIMIT, MAX_BREAKDOWN_LIMIT);
    state.project_service.get_project(id).await?;

    let stats = state.live_service.page_stats(id, limit).await?;
    Ok(Json(ListResponse::new(stats, limit)))
}
