//! Project management endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use beacon_core::error::AppError;
use beacon_entity::project::{Project, UpdateProject};
use beacon_service::{CreateProjectInput, ProjectOverview};

use crate::dto::request::{clamp_limit, clamp_offset, CreateProjectRequest, PageQuery, UpdateProjectRequest};
use crate::dto::response::{ApiResponse, ListResponse, MessageResponse};
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

/// Envelope matching the `{"project": ...}` shape of project responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectEnvelope<T: Serialize> {
    pub project: T,
}

/// Project plus a confirmation message, for key regeneration.
#[derive(Debug, Clone, Serialize)]
pub struct RegeneratedKey {
    pub project: Project,
    pub message: String,
}

/// POST /api/v1/admin/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectEnvelope<Project>>>, AppError> {
    let project = state
        .project_service
        .create(CreateProjectInput {
            name: req.name,
            domain: req.domain,
            description: req.description,
            owner_name: req.owner_name,
            owner_email: req.owner_email,
        })
        .await?;

    Ok(Json(ApiResponse::ok(ProjectEnvelope { project })))
}

/// GET /api/v1/admin/projects
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ListResponse<ProjectOverview>>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(query.offset);

    let (projects, total) = state.project_service.list(limit, offset).await?;

    Ok(Json(
        ListResponse::new(projects, limit)
            .with_offset(offset)
            .with_total(total),
    ))
}

/// GET /api/v1/admin/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectEnvelope<ProjectOverview>>>, AppError> {
    let project = state.project_service.get(id).await?;
    Ok(Json(ApiResponse::ok(ProjectEnvelope { project })))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<ProjectEnvelope<Project>>>, AppError> {
    let project = state
        .project_service
        .update(
            id,
            UpdateProject {
                name: req.name,
                domain: req.domain,
                description: req.description,
                owner_name: req.owner_name,
                owner_email: req.owner_email,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(ProjectEnvelope { project })))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.project_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Project deleted successfully".to_string(),
    })))
}

/// POST /api/v1/admin/projects/{id}/regenerate-key
pub async fn regenerate_key(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RegeneratedKey>>, AppError> {
    let project = state.project_service.regenerate_key(id).await?;
    Ok(Json(ApiResponse::ok(RegeneratedKey {
        project,
        message: "API key regenerated successfully".to_string(),
    })))
}
