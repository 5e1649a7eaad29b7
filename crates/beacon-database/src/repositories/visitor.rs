//! Visitor repository implementation.

use sqlx::PgPool;

use beacon_core::error::{AppError, ErrorKind};
use beacon_core::result::AppResult;
use beacon_entity::visitor::{CreateVisitor, Visitor};

/// Repository for visitor upserts and counts.
#[derive(Debug, Clone)]
pub struct VisitorRepository {
    pool: PgPool,
}

impl VisitorRepository {
    /// Create a new visitor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one event against a visitor.
    ///
    /// Creates the row on first sight of the user id; on conflict bumps the
    /// event counter, advances `last_seen`, and refreshes the geo fields when
    /// the event carries them (an event without geo never clears stored geo).
    pub async fn record_event(&self, data: &CreateVisitor) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>(
            "INSERT INTO visitors (id, country, city, session_count, event_count) \
             VALUES ($1, $2, $3, 1, 1) \
             ON CONFLICT (id) DO UPDATE SET \
                 event_count = visitors.event_count + 1, \
                 last_seen = NOW(), \
                 country = COALESCE(EXCLUDED.country, visitors.country), \
                 city = COALESCE(EXCLUDED.city, visitors.city), \
                 updated_at = NOW() \
             RETURNING *",
        )
        .bind(&data.id)
        .bind(&data.country)
        .bind(&data.city)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert visitor", e))
    }

    /// Find a visitor by the client-supplied user id.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Visitor>> {
        sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find visitor", e))
    }

    /// Count all visitors.
    pub async fn count(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM visitors")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count visitors", e))
    }

    /// Count visitors first seen today (UTC).
    pub async fn count_today(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM visitors WHERE created_at::date = CURRENT_DATE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count today's visitors", e)
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

    #[tokio::test]
    #[ignore = "requires PostgreSQL via DATABASE_URL"]
    async fn record_event_refreshes_geo_without_clearing_it() {
        let repo = VisitorRepository::new(test_pool().await);
        let id = format!("user-{}", Uuid::new_v4());

        // First sight: no geo yet.
        let visitor = repo
            .record_event(&CreateVisitor {
                id: id.clone(),
                country: None,
                city: None,
            })
            .await
            .expect("upsert");
        assert_eq!(visitor.country, None);

        // An event carrying geo refreshes the stored fields.
        let visitor = repo
            .record_event(&CreateVisitor {
                id: id.clone(),
                country: Some("DE".to_string()),
                city: Some("Berlin".to_string()),
            })
            .await
            .expect("upsert");
        assert_eq!(visitor.country.as_deref(), Some("DE"));
        assert_eq!(visitor.city.as_deref(), Some("Berlin"));

        // An event without geo leaves the stored fields alone.
        let visitor = repo
            .record_event(&CreateVisitor {
                id: id.clone(),
                country: None,
                city: None,
            })
            .await
            .expect("upsert");
        assert_eq!(visitor.country.as_deref(), Some("DE"));
        assert_eq!(visitor.city.as_deref(), Some("Berlin"));
        assert_eq!(visitor.event_count, 3);
    }
}
