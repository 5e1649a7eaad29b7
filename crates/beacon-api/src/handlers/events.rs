//! Event listing endpoint.

use axum::extract::{Query, State};
use axum::Json;

use beacon_core::error::AppError;
use beacon_entity::event::Event;

use crate::dto::request::{clamp_limit, clamp_offset, EventsQuery};
use crate::dto::response::ListResponse;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 1000;

/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<ListResponse<Event>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(query.offset);

    let events = state
        .tracking_service
        .list(query.session_id.as_deref(), limit, offset)
        .await?;

    Ok(Json(ListResponse::new(events, limit).with_offset(offset)))
}
