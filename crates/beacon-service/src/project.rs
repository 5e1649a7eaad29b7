//! Project management: CRUD, api keys, and the embeddable tracking script.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use beacon_core::error::AppError;
use beacon_core::result::AppResult;
use beacon_database::repositories::{EventRepository, ProjectRepository};
use beacon_entity::project::{CreateProject, Project, UpdateProject};

/// Number of random characters after the `ak_` prefix.
const API_KEY_LENGTH: usize = 16;

/// Data required to create a project, before key generation.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    pub name: String,
    pub domain: String,
    pub description: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
}

/// A project enriched with counts recomputed from event rows.
///
/// Fields are spelled out rather than flattening [`Project`], so the stored
/// informational counters never shadow the recomputed ones.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    pub id: Uuid,
    pub name: String,
    pub domain: String,
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_events: i64,
    pub total_sessions: i64,
    pub total_users: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_event_time: Option<DateTime<Utc>>,
}

/// Manages projects and their tracking credentials.
#[derive(Debug, Clone)]
pub struct ProjectService {
    project_repo: Arc<ProjectRepository>,
    event_repo: Arc<EventRepository>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(project_repo: Arc<ProjectRepository>, event_repo: Arc<EventRepository>) -> Self {
        Self {
            project_repo,
            event_repo,
        }
    }

    /// Create a project with a freshly generated api key.
    pub async fn create(&self, input: CreateProjectInput) -> AppResult<Project> {
        validate_create(&input)?;

        let data = CreateProject {
            name: input.name,
            domain: input.domain,
            description: input.description,
            owner_name: input.owner_name,
            owner_email: input.owner_email,
            api_key: generate_api_key(),
        };
        let project = self.project_repo.create(&data).await?;

        info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// List projects with recomputed counts, plus the total project count.
    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<ProjectOverview>, i64)> {
        let total = self.project_repo.count().await?;
        let projects = self.project_repo.list(limit, offset).await?;

        let mut overviews = Vec::with_capacity(projects.len());
        for project in projects {
            overviews.push(self.overview(project).await?);
        }
        Ok((overviews, total))
    }

    /// Fetch one project with recomputed counts.
    pub async fn get(&self, id: Uuid) -> AppResult<ProjectOverview> {
        let project = self.get_project(id).await?;
        self.overview(project).await
    }

    /// Fetch the bare project row.
    pub async fn get_project(&self, id: Uuid) -> AppResult<Project> {
        self.project_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: UpdateProject) -> AppResult<Project> {
        self.project_repo
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Soft-delete a project. Its api key stops admitting events immediately.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.project_repo.soft_delete(id).await? {
            return Err(AppError::not_found(format!("Project {id} not found")));
        }
        info!(project_id = %id, "Project deactivated");
        Ok(())
    }

    /// Issue a new api key, invalidating the old one.
    pub async fn regenerate_key(&self, id: Uuid) -> AppResult<Project> {
        let project = self
            .project_repo
            .set_api_key(id, &generate_api_key())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))?;

        info!(project_id = %id, "Api key regenerated");
        Ok(project)
    }

    /// Render the embeddable tracking snippet for a project.
    pub fn tracking_script(&self, project: &Project, public_url: &str) -> String {
        TRACKING_SCRIPT_TEMPLATE
            .replace("__PROJECT_NAME__", &project.name)
            .replace("__API_KEY__", &project.api_key)
            .replace("__ENDPOINT__", &format!("{public_url}/api/v1/track"))
            .replace("__PROJECT_ID__", &project.id.to_string())
            .replace("__DOMAIN__", &project.domain)
    }

    /// Render the tracking snippet for an api key presented by a client.
    pub async fn tracking_script_by_key(
        &self,
        api_key: &str,
        public_url: &str,
    ) -> AppResult<String> {
        let project = self
            .project_repo
            .find_active_by_api_key(api_key)
            .await?
            .ok_or_else(|| AppError::invalid_credential("Invalid API key"))?;
        Ok(self.tracking_script(&project, public_url))
    }

    async fn overview(&self, project: Project) -> AppResult<ProjectOverview> {
        let total_events = self.event_repo.count_by_project(project.id).await?;
        let total_sessions = self
            .event_repo
            .distinct_sessions_by_project(project.id, None)
            .await?;
        let total_users = self
            .event_repo
            .distinct_users_by_project(project.id, None)
            .await?;
        let last_event_time = self.event_repo.last_event_time(project.id).await?;

        Ok(ProjectOverview {
            id: project.id,
            name: project.name,
            domain: project.domain,
            api_key: project.api_key,
            description: project.description,
            owner_name: project.owner_name,
            owner_email: project.owner_email,
            is_active: project.is_active,
            created_at: project.created_at,
            updated_at: project.updated_at,
            total_events,
            total_sessions,
            total_users,
            last_event_time,
        })
    }
}

fn validate_create(input: &CreateProjectInput) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::validation("name is required"));
    }
    if input.domain.trim().is_empty() {
        return Err(AppError::validation("domain is required"));
    }
    if input.owner_name.trim().is_empty() {
        return Err(AppError::validation("owner_name is required"));
    }
    if input.owner_email.trim().is_empty() || !input.owner_email.contains('@') {
        return Err(AppError::validation("owner_email must be a valid email"));
    }
    Ok(())
}

/// Generate an `ak_`-prefixed random api key.
fn generate_api_key() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LENGTH)
        .map(char::from)
        .collect();
    format!("ak_{suffix}")
}

const TRACKING_SCRIPT_TEMPLATE: &str = r#"<!-- Beacon Tracking Script for __PROJECT_NAME__ -->
<script>
(function() {
    var config = {
        apiKey: '__API_KEY__',
        endpoint: '__ENDPOINT__',
        projectId: '__PROJECT_ID__',
        projectName: '__PROJECT_NAME__',
        domain: '__DOMAIN__'
    };

    class BeaconTracker {
        constructor(config) {
            this.config = config;
            this.endpoint = config.endpoint;
            this.sessionId = this.generateSessionId();
            this.userId = null;
            this.projectId = config.projectId;
            this.init();
        }

        generateSessionId() {
            return 'session-' + Date.now() + '-' + Math.random().toString(36).substr(2, 9);
        }

        init() {
            this.trackPageView();

            document.addEventListener('click', (e) => {
                if (e.target.tagName === 'BUTTON' || e.target.tagName === 'A') {
                    this.trackClick(e.target);
                }
            });

            document.addEventListener('submit', (e) => {
                this.trackFormSubmit(e.target);
            });
        }

        async track(eventData) {
            const payload = {
                project_id: this.projectId,
                session_id: this.sessionId,
                user_id: this.userId,
                ip_address: '',
                user_agent: navigator.userAgent,
                screen_width: screen.width,
                screen_height: screen.height,
                language: navigator.language,
                platform: navigator.platform,
                ...eventData
            };

            try {
                await fetch(this.endpoint, {
                    method: 'POST',
                    headers: {
                        'Content-Type': 'application/json',
                        'X-API-Key': this.config.apiKey
                    },
                    body: JSON.stringify(payload)
                });
            } catch (error) {
                console.warn('Beacon tracking failed:', error);
            }
        }

        trackPageView() {
            this.track({
                event_type: 'page_view',
                event_name: 'Page View',
                page_url: window.location.href,
                page_title: document.title,
                referrer: document.referrer || null
            });
        }

        trackClick(element) {
            const elementName = element.textContent?.trim() || element.className || 'Unknown Element';
            this.track({
                event_type: 'click',
                event_name: 'Click: ' + elementName,
                page_url: window.location.href,
                properties: {
                    element_tag: element.tagName,
                    element_class: element.className,
                    element_id: element.id
                }
            });
        }

        trackFormSubmit(form) {
            const formName = form.getAttribute('name') || form.getAttribute('id') || 'Unknown Form';
            this.track({
                event_type: 'form_submit',
                event_name: 'Form Submit: ' + formName,
                page_url: window.location.href,
                properties: {
                    form_name: formName,
                    form_id: form.id
                }
            });
        }

        trackCustomEvent(eventName, eventType, properties) {
            this.track({
                event_type: eventType || 'custom',
                event_name: eventName,
                page_url: window.location.href,
                properties: properties || {}
            });
        }

        setUserId(userId) {
            this.userId = userId;
        }
    }

    window.beacon = new BeaconTracker(config);

    window.trackEvent = function(eventName, eventType, properties) {
        window.beacon.trackCustomEvent(eventName, eventType, properties);
    };

    window.setUserId = function(userId) {
        window.beacon.setUserId(userId);
    };
})();
</script>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::config::DatabaseConfig;
    use beacon_core::error::ErrorKind;
    use beacon_database::DatabasePool;

    fn service() -> ProjectService {
        let pool = DatabasePool::connect_lazy(&DatabaseConfig::default())
            .unwrap()
            .into_pool();
        ProjectService::new(
            Arc::new(ProjectRepository::new(pool.clone())),
            Arc::new(EventRepository::new(pool)),
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

    #[test]
    fn api_keys_are_prefixed_and_random() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert!(a.starts_with("ak_"));
        assert_eq!(a.len(), 3 + API_KEY_LENGTH);
        assert!(a[3..].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    // Pool construction is lazy but still needs a runtime.
    #[tokio::test]
    async fn tracking_script_embeds_project_configuration() {
        let svc = service();
        let project = test_project();

        let script = svc.tracking_script(&project, "https://beacon.example.com");
        assert!(script.contains("apiKey: 'ak_0123456789abcdef'"));
        assert!(script.contains("endpoint: 'https://beacon.example.com/api/v1/track'"));
        assert!(script.contains(&format!("projectId: '{}'", project.id)));
        assert!(script.contains("domain: 'docs.example.com'"));
        assert!(!script.contains("__PROJECT_NAME__"));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let svc = service();
        let err = svc
            .create(CreateProjectInput {
                name: "  ".to_string(),
                domain: "example.com".to_string(),
                description: None,
                owner_name: "Owner".to_string(),
                owner_email: "owner@example.com".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn create_rejects_invalid_email() {
        let svc = service();
        let err = svc
            .create(CreateProjectInput {
                name: "Docs".to_string(),
                domain: "example.com".to_string(),
                description: None,
                owner_name: "Owner".to_string(),
                owner_email: "not-an-email".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
