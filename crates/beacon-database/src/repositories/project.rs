//! Project repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use beacon_core::error::{AppError, ErrorKind};
use beacon_core::result::AppResult;
use beacon_entity::project::{CreateProject, Project, UpdateProject};

/// Repository for project CRUD and credential lookups.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new project.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (name, domain, api_key, description, owner_name, owner_email) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.domain)
        .bind(&data.api_key)
        .bind(&data.description)
        .bind(&data.owner_name)
        .bind(&data.owner_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// Find an active project by its api key.
    ///
    /// Deactivated projects never match, so their keys stop admitting events.
    pub async fn find_active_by_api_key(&self, api_key: &str) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE api_key = $1 AND is_active = TRUE",
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find project by api key", e)
        })
    }

    /// List projects, newest first.
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    /// Count all projects.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count projects", e))
    }

    /// Apply a partial update to a project. Absent fields keep their value.
    pub async fn update(&self, id: Uuid, data: &UpdateProject) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET \
                 name = COALESCE($2, name), \
                 domain = COALESCE($3, domain), \
                 description = COALESCE($4, description), \
                 owner_name = COALESCE($5, owner_name), \
                 owner_email = COALESCE($6, owner_email), \
                 is_active = COALESCE($7, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.domain)
        .bind(&data.description)
        .bind(&data.owner_name)
        .bind(&data.owner_email)
        .bind(data.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update project", e))
    }

    /// Soft-delete a project by deactivating it. The row is kept so event
    /// history stays queryable.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE projects SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete project", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a project's api key.
    pub async fn set_api_key(&self, id: Uuid, api_key: &str) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET api_key = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to regenerate api key", e)
        })
    }
}
