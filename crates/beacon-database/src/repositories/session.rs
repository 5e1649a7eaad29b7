//! Session repository implementation.

use sqlx::PgPool;

use beacon_core::error::{AppError, ErrorKind};
use beacon_core::result::AppResult;
use beacon_entity::session::{CreateSession, Session};

/// Repository for session upserts and counts.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one event against a session.
    ///
    /// Creates the row on first sight of the session id; on conflict bumps
    /// the event counter and update timestamp, leaving the first-event
    /// attributes (landing page, referrer) untouched.
    pub async fn record_event(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (id, user_id, landing_page, referrer, user_agent, \
                 ip_address, country, city, event_count) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1) \
             ON CONFLICT (id) DO UPDATE SET \
                 event_count = sessions.event_count + 1, \
                 user_id = COALESCE(sessions.user_id, EXCLUDED.user_id), \
                 updated_at = NOW() \
             RETURNING *",
        )
        .bind(&data.id)
        .bind(&data.user_id)
        .bind(&data.landing_page)
        .bind(&data.referrer)
        .bind(&data.user_agent)
        .bind(&data.ip_address)
        .bind(&data.country)
        .bind(&data.city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert session", e))
    }

    /// Find a session by its client-generated id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Count all sessions.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count sessions", e))
    }

    /// Count sessions first seen today (UTC).
    pub async fn count_today(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE created_at::date = CURRENT_DATE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count today's sessions", e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set for database tests");
        let pool = PgPool::connect(&url).await.expect("connect to test database");
        crate::migration::run_migrations(&pool)
            .await
            .expect("run migrations");
        pool
    }

    fn first_event(id: &str) -> CreateSession {
        CreateSession {
            id: id.to_string(),
            user_id: None,
            landing_page: Some("https://example.com/pricing".to_string()),
            referrer: Some("https://search.example".to_string()),
            user_agent: None,
            ip_address: "203.0.113.9".to_string(),
            country: None,
            city: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn record_event_accumulates_event_count() {
        let repo = SessionRepository::new(test_pool().await);
        let id = format!("sess-{}", Uuid::new_v4());

        for _ in 0..3 {
            repo.record_event(&first_event(&id)).await.expect("upsert");
        }

        let session = repo.find_by_id(&id).await.expect("find").expect("exists");
        assert_eq!(session.event_count, 3);
        assert_eq!(
            session.landing_page.as_deref(),
            Some("https://example.com/pricing")
        );
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn record_event_backfills_user_id_once() {
        let repo = SessionRepository::new(test_pool().await);
        let id = format!("sess-{}", Uuid::new_v4());

        repo.record_event(&first_event(&id)).await.expect("upsert");

        let mut identified = first_event(&id);
        identified.user_id = Some("user-1".to_string());
        repo.record_event(&identified).await.expect("upsert");

        // A later, different user id does not overwrite the first one.
        let mut other = first_event(&id);
        other.user_id = Some("user-2".to_string());
        let session = repo.record_event(&other).await.expect("upsert");

        assert_eq!(session.user_id.as_deref(), Some("user-1"));
        assert_eq!(session.event_count, 3);
    }
}
