//! Per-project realtime reporting (poll-based counterpart to the hub).

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use beacon_core::result::AppResult;
use beacon_database::repositories::EventRepository;
use beacon_entity::event::Event;
use beacon_entity::stats::{CountryCount, EventTypeCount, PageBreakdown};

/// How far back an event still counts as "live" activity.
const ACTIVITY_WINDOW_MINUTES: i64 = 5;

/// Realtime statistics for one project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectLiveStats {
    pub total_events: i64,
    pub total_sessions: i64,
    pub total_users: i64,
    pub events_today: i64,
    pub sessions_today: i64,
    pub users_today: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_time: Option<DateTime<Utc>>,
    pub active_sessions: i64,
    pub current_visitors: i64,
}

/// A recent event trimmed down for dashboard feeds.
#[derive(Debug, Clone, Serialize)]
pub struct RecentEvent {
    pub id: Uuid,
    pub event_type: String,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub properties: String,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for RecentEvent {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type,
            event_name: event.event_name,
            page_url: event.page_url,
            page_title: event.page_title,
            country: event.country,
            session_id: event.session_id,
            user_id: event.user_id,
            properties: event.properties,
            created_at: event.created_at,
        }
    }
}

/// Computes per-project live statistics from event rows.
#[derive(Debug, Clone)]
pub struct LiveStatsService {
    event_repo: Arc<EventRepository>,
}

impl LiveStatsService {
    /// Creates a new live stats service.
    pub fn new(event_repo: Arc<EventRepository>) -> Self {
        Self { event_repo }
    }

    /// Full live-stats block for one project.
    ///
    /// "Active" sessions and visitors are those with an event inside the
    /// trailing activity window.
    pub async fn stats(&self, project_id: Uuid) -> AppResult<ProjectLiveStats> {
        let today = start_of_today();
        let window_start = Utc::now() - Duration::minutes(ACTIVITY_WINDOW_MINUTES);

        let total_events = self.event_repo.count_by_project(project_id).await?;
        let total_sessions = self
            .event_repo
            .distinct_sessions_by_project(project_id, None)
            .await?;
        let total_users = self
            .event_repo
            .distinct_users_by_project(project_id, None)
            .await?;
        let events_today = self.event_repo.count_today_by_project(project_id).await?;
        let sessions_today = self
            .event_repo
            .distinct_sessions_by_project(project_id, Some(today))
            .await?;
        let users_today = self
            .event_repo
            .distinct_users_by_project(project_id, Some(today))
            .await?;
        let active_sessions = self
            .event_repo
            .distinct_sessions_by_project(project_id, Some(window_start))
            .await?;
        let current_visitors = self
            .event_repo
            .distinct_users_by_project(project_id, Some(window_start))
            .await?;
        let last_event_time = self.event_repo.last_event_time(project_id).await?;

        Ok(ProjectLiveStats {
            total_events,
            total_sessions,
            total_users,
            events_today,
            sessions_today,
            users_today,
            last_event_time,
            active_sessions,
            current_visitors,
        })
    }

    /// The project's newest events, trimmed for the dashboard feed.
    pub async fn recent_events(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<RecentEvent>> {
        let events = self.event_repo.recent_by_project(project_id, limit).await?;
        Ok(events.into_iter().map(RecentEvent::from).collect())
    }

    /// Event type breakdown for one project.
    pub async fn event_type_stats(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<EventTypeCount>> {
        self.event_repo
            .event_types_by_project(project_id, limit)
            .await
    }

    /// Country breakdown for one project.
    pub async fn country_stats(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<CountryCount>> {
        self.event_repo.countries_by_project(project_id, limit).await
    }

    /// Page breakdown for one project.
    pub async fn page_stats(
        &self,
        project_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PageBreakdown>> {
        self.event_repo.pages_by_project(project_id, limit).await
    }
}

fn start_of_today() -> DateTime<Utc> {
    Utc::now()
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}
