//! Event repository implementation.
//!
//! Besides the ingestion insert, this repository hosts every aggregate query
//! the reporting endpoints run. Aggregates are always computed from event
//! rows; the informational counters on the projects table are not consulted.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use beacon_core::error::{AppError, ErrorKind};
use beacon_core::result::AppResult;
use beacon_entity::event::{CreateEvent, Event};
use beacon_entity::stats::{CountryCount, DayCount, EventTypeCount, PageBreakdown, PageCount};

/// Repository for event inserts and aggregate queries.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new event row.
    pub async fn insert(&self, data: &CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (project_id, session_id, user_id, event_type, event_name, \
                 properties, page_url, page_title, referrer, user_agent, ip_address, \
                 country, city, screen_width, screen_height, language, platform) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING *",
        )
        .bind(data.project_id)
        .bind(&data.session_id)
        .bind(&data.user_id)
        .bind(&data.event_type)
        .bind(&data.event_name)
        .bind(&data.properties)
        .bind(&data.page_url)
        .bind(&data.page_title)
        .bind(&data.referrer)
        .bind(&data.user_agent)
        .bind(&data.ip_address)
        .bind(&data.country)
        .bind(&data.city)
        .bind(data.screen_width)
        .bind(data.screen_height)
        .bind(&data.language)
        .bind(&data.platform)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert event", e))
    }

    /// List events newest first, optionally scoped to one session.
    pub async fn list(
        &self,
        session_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE ($1::text IS NULL OR session_id = $1) \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(session_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list events", e))
    }

    /// Count all events.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))
    }

    /// Count one project's events.
    pub async fn count_by_project(&self, project_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count events", e))
    }

    /// Count events created today (UTC).
    pub async fn count_today(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM events WHERE created_at::date = CURRENT_DATE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count today's events", e)
            })
    }

    /// Count a project's events created today (UTC).
    pub async fn count_today_by_project(&self, project_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM events WHERE project_id = $1 AND created_at::date = CURRENT_DATE",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count today's events", e)
        })
    }

    /// Count distinct sessions seen in a project's events, optionally bounded
    /// to events created at or after `since`.
    pub async fn distinct_sessions_by_project(
        &self,
        project_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(DISTINCT session_id) FROM events \
             WHERE project_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)",
        )
        .bind(project_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count sessions", e))
    }

    /// Count distinct users seen in a project's events, optionally bounded
    /// to events created at or after `since`.
    pub async fn distinct_users_by_project(
        &self,
        project_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(DISTINCT user_id) FROM events \
             WHERE project_id = $1 AND user_id IS NOT NULL \
             AND ($2::timestamptz IS NULL OR created_at >= $2)",
        )
        .bind(project_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))
    }

    /// Timestamp of a project's most recent event.
    pub async fn last_event_time(&self, project_id: Uuid) -> AppResult<Option<DateTime<Utc>>> {
        sqlx::query_scalar(
            "SELECT MAX(created_at) FROM events WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find last event time", e)
        })
    }

    /// Per-day event counts for events created at or after `since`,
    /// newest day first.
    pub async fn counts_by_day(&self, since: DateTime<Utc>) -> AppResult<Vec<DayCount>> {
        sqlx::query_as::<_, DayCount>(
            "SELECT created_at::date AS date, COUNT(*) AS count FROM events \
             WHERE created_at >= $1 GROUP BY date ORDER BY date DESC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count events by day", e)
        })
    }

    /// Most-hit page URLs across all projects.
    pub async fn top_pages(&self, limit: i64) -> AppResult<Vec<PageCount>> {
        sqlx::query_as::<_, PageCount>(
            "SELECT page_url, COUNT(*) AS count FROM events \
             WHERE page_url IS NOT NULL AND page_url != '' \
             GROUP BY page_url ORDER BY count DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank pages", e))
    }

    /// Most frequent countries across all projects.
    pub async fn top_countries(&self, limit: i64) -> AppResult<Vec<CountryCount>> {
        sqlx::query_as::<_, CountryCount>(
            "SELECT country, COUNT(*) AS count FROM events \
             WHERE country IS NOT NULL AND country != '' \
             GROUP BY country ORDER BY count DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank countries", e))
    }

    /// Most frequent event types across all projects.
    pub async fn top_event_types(&self, limit: i64) -> AppResult<Vec<EventTypeCount>> {
        sqlx::query_as::<_, EventTypeCount>(
            "SELECT event_type, COUNT(*) AS count FROM events \
             GROUP BY event_type ORDER BY count DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank event types", e))
    }

    /// A project's most recent events, newest first.
    pub async fn recent_by_project(&self, project_id: Uuid, limit: i64) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE project_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(project_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list recent events", e))
    }

    /// Event type breakdown for one project.
    pub async fn event_types_by_project(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<EventTypeCount>> {
        sqlx::query_as::<_, EventTypeCount>(
            "SELECT event_type, COUNT(*) AS count FROM events WHERE project_id = $1 \
             GROUP BY event_type ORDER BY count DESC LIMIT $2",
        )
        .bind(project_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank event types", e))
    }

    /// Country breakdown for one project.
    pub async fn countries_by_project(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<CountryCount>> {
        sqlx::query_as::<_, CountryCount>(
            "SELECT country, COUNT(*) AS count FROM events \
             WHERE project_id = $1 AND country IS NOT NULL \
             GROUP BY country ORDER BY count DESC LIMIT $2",
        )
        .bind(project_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank countries", e))
    }

    /// Page URL/title breakdown for one project.
    pub async fn pages_by_project(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PageBreakdown>> {
        sqlx::query_as::<_, PageBreakdown>(
            "SELECT page_url, page_title, COUNT(*) AS count FROM events \
             WHERE project_id = $1 AND page_url IS NOT NULL \
             GROUP BY page_url, page_title ORDER BY count DESC LIMIT $2",
        )
        .bind(project_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rank pages", e))
    }
}
