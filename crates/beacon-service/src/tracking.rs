//! Event ingestion: validate, persist, update rollups, broadcast.

use std::sync::Arc;

use tracing::warn;

use beacon_core::error::AppError;
use beacon_core::result::AppResult;
use beacon_core::types::properties::Properties;
use beacon_database::repositories::{EventRepository, SessionRepository, VisitorRepository};
use beacon_entity::event::{CreateEvent, Event};
use beacon_entity::project::Project;
use beacon_entity::session::CreateSession;
use beacon_entity::visitor::CreateVisitor;
use beacon_realtime::HubHandle;

/// A tracking call as received from the client script, before validation.
#[derive(Debug, Clone)]
pub struct TrackEventInput {
    pub session_id: String,
    pub user_id: Option<String>,
    pub event_type: String,
    pub event_name: String,
    pub properties: Properties,
    pub page_url: Option<String>,
    pub page_title: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub screen_width: Option<i32>,
    pub screen_height: Option<i32>,
    pub language: Option<String>,
    pub platform: Option<String>,
}

/// Ingests tracked events for credentialed projects.
#[derive(Debug, Clone)]
pub struct TrackingService {
    event_repo: Arc<EventRepository>,
    session_repo: Arc<SessionRepository>,
    visitor_repo: Arc<VisitorRepository>,
    hub: HubHandle,
}

impl TrackingService {
    /// Creates a new tracking service.
    pub fn new(
        event_repo: Arc<EventRepository>,
        session_repo: Arc<SessionRepository>,
        visitor_repo: Arc<VisitorRepository>,
        hub: HubHandle,
    ) -> Self {
        Self {
            event_repo,
            session_repo,
            visitor_repo,
            hub,
        }
    }

    /// Record one event for a credentialed project.
    ///
    /// The event row is the source of truth and is written synchronously.
    /// Session and visitor rollups are updated on background tasks so a slow
    /// rollup can never delay the tracking response, and the persisted event
    /// is published to the realtime hub before returning.
    pub async fn record(&self, project: &Project, input: TrackEventInput) -> AppResult<Event> {
        validate(&input)?;

        let data = CreateEvent {
            project_id: Some(project.id),
            session_id: input.session_id,
            user_id: input.user_id,
            event_type: input.event_type,
            event_name: input.event_name,
            properties: input.properties.to_json_text()?,
            page_url: input.page_url,
            page_title: input.page_title,
            referrer: input.referrer,
            user_agent: input.user_agent,
            ip_address: input.ip_address,
            country: input.country,
            city: input.city,
            screen_width: input.screen_width,
            screen_height: input.screen_height,
            language: input.language,
            platform: input.platform,
        };

        let event = self.event_repo.insert(&data).await?;

        self.spawn_rollups(&event);
        self.hub.publish(event.clone());

        Ok(event)
    }

    /// List tracked events, optionally filtered to one session.
    pub async fn list(
        &self,
        session_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Event>> {
        self.event_repo.list(session_id, limit, offset).await
    }

    /// Kick off the session and visitor rollup upserts for a stored event.
    ///
    /// Failures are logged and swallowed; rollups are derived data.
    fn spawn_rollups(&self, event: &Event) {
        let session_repo = self.session_repo.clone();
        let session = CreateSession {
            id: event.session_id.clone(),
            user_id: event.user_id.clone(),
            landing_page: event.page_url.clone(),
            referrer: event.referrer.clone(),
            user_agent: event.user_agent.clone(),
            ip_address: event.ip_address.clone(),
            country: event.country.clone(),
            city: event.city.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = session_repo.record_event(&session).await {
                warn!(session_id = %session.id, error = %e, "Session rollup failed");
            }
        });

        if let Some(user_id) = event.user_id.clone() {
            let visitor_repo = self.visitor_repo.clone();
            let visitor = CreateVisitor {
                id: user_id,
                country: event.country.clone(),
                city: event.city.clone(),
            };
            tokio::spawn(async move {
                if let Err(e) = visitor_repo.record_event(&visitor).await {
                    warn!(visitor_id = %visitor.id, error = %e, "Visitor rollup failed");
                }
            });
        }
    }
}

fn validate(input: &TrackEventInput) -> AppResult<()> {
    if input.session_id.trim().is_empty() {
        return Err(AppError::validation("session_id is required"));
    }
    if input.event_type.trim().is_empty() {
        return Err(AppError::validation("event_type is required"));
    }
    if input.event_name.trim().is_empty() {
        return Err(AppError::validation("event_name is required"));
    }
    if input.ip_address.trim().is_empty() {
        return Err(AppError::validation("ip_address is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::config::DatabaseConfig;
    use beacon_core::error::ErrorKind;
    use beacon_database::DatabasePool;
    use beacon_realtime::Hub;
    use chrono::Utc;
    use uuid::Uuid;

    fn service() -> TrackingService {
        // Lazy pool: no connection is attempted until the first query, so
        // validation paths run without a database.
        let pool = DatabasePool::connect_lazy(&DatabaseConfig::default())
            .unwrap()
            .into_pool();
        TrackingService::new(
            Arc::new(EventRepository::new(pool.clone())),
            Arc::new(SessionRepository::new(pool.clone())),
            Arc::new(VisitorRepository::new(pool)),
            Hub::spawn(),
        )
    }

    fn test_project() -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "Docs Site".to_string(),
            domain: "docs.example.com".to_string(),
            api_key: "ak_0123456789abcdef".to_string(),
            description: None,
            owner_name: "Owner".to_string(),
            owner_email: "owner@example.com".to_string(),
            total_events: 0,
            total_sessions: 0,
            total_users: 0,
            last_event_time: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn valid_input() -> TrackEventInput {
        TrackEventInput {
            session_id: "session-123".to_string(),
            user_id: None,
            event_type: "page_view".to_string(),
            event_name: "Page View".to_string(),
            properties: Properties::new(),
            page_url: Some("https://docs.example.com/".to_string()),
            page_title: None,
            referrer: None,
            user_agent: None,
            ip_address: "203.0.113.9".to_string(),
            country: None,
            city: None,
            screen_width: None,
            screen_height: None,
            language: None,
            platform: None,
        }
    }

    #[tokio::test]
    async fn rejects_missing_session_id() {
        let svc = service();
        let input = TrackEventInput {
            session_id: "  ".to_string(),
            ..valid_input()
        };
        let err = svc.record(&test_project(), input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn rejects_missing_event_type() {
        let svc = service();
        let input = TrackEventInput {
            event_type: String::new(),
            ..valid_input()
        };
        let err = svc.record(&test_project(), input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn rejects_missing_event_name() {
        let svc = service();
        let input = TrackEventInput {
            event_name: String::new(),
            ..valid_input()
        };
        let err = svc.record(&test_project(), input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn rejects_missing_ip_address() {
        let svc = service();
        let input = TrackEventInput {
            ip_address: String::new(),
            ..valid_input()
        };
        let err = svc.record(&test_project(), input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
