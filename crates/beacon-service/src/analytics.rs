//! Cross-project aggregate reporting.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;

use beacon_core::result::AppResult;
use beacon_database::repositories::{
    EventRepository, ProjectRepository, SessionRepository, VisitorRepository,
};
use beacon_entity::stats::{CountryCount, DayCount, EventTypeCount, PageCount};

/// Headline numbers for the global dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_events: i64,
    pub total_sessions: i64,
    pub total_users: i64,
    pub total_projects: i64,
    pub events_today: i64,
    pub sessions_today: i64,
    pub unique_users_today: i64,
    pub unique_visitors_today: i64,
}

/// Computes aggregate reports from event rows.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    event_repo: Arc<EventRepository>,
    session_repo: Arc<SessionRepository>,
    visitor_repo: Arc<VisitorRepository>,
    project_repo: Arc<ProjectRepository>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        session_repo: Arc<SessionRepository>,
        visitor_repo: Arc<VisitorRepository>,
        project_repo: Arc<ProjectRepository>,
    ) -> Self {
        Self {
            event_repo,
            session_repo,
            visitor_repo,
            project_repo,
        }
    }

    /// Headline totals plus today's activity across all projects.
    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let total_events = self.event_repo.count().await?;
        let total_sessions = self.session_repo.count().await?;
        let total_users = self.visitor_repo.count().await?;
        let total_projects = self.project_repo.count().await?;
        let events_today = self.event_repo.count_today().await?;
        let sessions_today = self.session_repo.count_today().await?;
        let unique_users_today = self.visitor_repo.count_today().await?;

        Ok(DashboardStats {
            total_events,
            total_sessions,
            total_users,
            total_projects,
            events_today,
            sessions_today,
            unique_users_today,
            // Visitors and users are the same population here; both fields
            // are kept for dashboard compatibility.
            unique_visitors_today: unique_users_today,
        })
    }

    /// Per-day event counts for the trailing `days` days, newest day first.
    pub async fn events_by_day(&self, days: i64) -> AppResult<Vec<DayCount>> {
        let since = Utc::now() - Duration::days(days);
        self.event_repo.counts_by_day(since).await
    }

    /// Most-hit page URLs across all projects.
    pub async fn top_pages(&self, limit: i64) -> AppResult<Vec<PageCount>> {
        self.event_repo.top_pages(limit).await
    }

    /// Most frequent countries across all projects.
    pub async fn top_countries(&self, limit: i64) -> AppResult<Vec<CountryCount>> {
        self.event_repo.top_countries(limit).await
    }

    /// Most frequent event types across all projects.
    pub async fn top_event_types(&self, limit: i64) -> AppResult<Vec<EventTypeCount>> {
        self.event_repo.top_event_types(limit).await
    }
}
