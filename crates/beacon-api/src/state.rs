//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use beacon_core::config::AppConfig;
use beacon_database::repositories::{
    EventRepository, ProjectRepository, SessionRepository, VisitorRepository,
};
use beacon_realtime::HubHandle;
use beacon_service::{AnalyticsService, LiveStatsService, ProjectService, TrackingService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped (or internally cheap to clone).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Realtime hub handle
    pub hub: HubHandle,

    /// Project repository (used directly by the credential gate)
    pub project_repo: Arc<ProjectRepository>,

    /// Event ingestion service
    pub tracking_service: Arc<TrackingService>,
    /// Cross-project reporting service
    pub analytics_service: Arc<AnalyticsService>,
    /// Per-project live stats service
    pub live_service: Arc<LiveStatsService>,
    /// Project management service
    pub project_service: Arc<ProjectService>,
}

impl AppState {
    /// Wire up repositories and services around a connection pool and hub.
    pub fn new(config: Arc<AppConfig>, db_pool: PgPool, hub: HubHandle) -> Self {
        let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
        let event_repo = Arc::new(EventRepository::new(db_pool.clone()));
        let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
        let visitor_repo = Arc::new(VisitorRepository::new(db_pool.clone()));

        let tracking_service = Arc::new(TrackingService::new(
            event_repo.clone(),
            session_repo.clone(),
            visitor_repo.clone(),
            hub.clone(),
        ));
        let analytics_service = Arc::new(AnalyticsService::new(
            event_repo.clone(),
            session_repo,
            visitor_repo,
            project_repo.clone(),
        ));
        let live_service = Arc::new(LiveStatsService::new(event_repo.clone()));
        let project_service = Arc::new(ProjectService::new(project_repo.clone(), event_repo));

        Self {
            config,
            db_pool,
            hub,
            project_repo,
            tracking_service,
            analytics_service,
            live_service,
            project_service,
        }
    }
}
