//! Tracking-script delivery endpoints.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use beacon_core::error::AppError;

use crate::state::AppState;

/// GET /api/v1/admin/projects/{id}/script
///
/// Returned as plain text for easy copying into a page.
pub async fn get_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let project = state.project_service.get_project(id).await?;
    let script = state
        .project_service
        .tracking_script(&project, &state.config.server.public_url);

    Ok(([(header::CONTENT_TYPE, "text/plain")], script).into_response())
}

/// GET /api/v1/admin/projects/{id}/script/download
pub async fn download_script(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let project = state.project_service.get_project(id).await?;
    let script = state
        .project_service
        .tracking_script(&project, &state.config.server.public_url);

    Ok((
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"beacon-tracking.js\"",
            ),
        ],
        script,
    )
        .into_response())
}

/// GET /api/v1/script/{api_key}
///
/// Public variant keyed by api key, so a page can load its snippet directly.
pub async fn script_by_key(
    State(state): State<AppState>,
    Path(api_key): Path<String>,
) -> Result<Response, AppError> {
    let script = state
        .project_service
        .tracking_script_by_key(&api_key, &state.config.server.public_url)
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "application/javascript")],
        script,
    )
        .into_response())
}
