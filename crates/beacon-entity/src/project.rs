//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered site/app being tracked.
///
/// Projects are never hard-deleted; deactivation clears `is_active` and the
/// credential gate stops matching the api key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Domain the tracking script is installed on.
    pub domain: String,
    /// Secret token used by the credential gate. Unique.
    pub api_key: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owner contact name.
    pub owner_name: String,
    /// Owner contact email.
    pub owner_email: String,
    /// Informational counter. No write path maintains it; reporting always
    /// recomputes from event rows.
    pub total_events: i32,
    /// Informational counter, same caveat as `total_events`.
    pub total_sessions: i32,
    /// Informational counter, same caveat as `total_events`.
    pub total_users: i32,
    /// Informational timestamp, same caveat as `total_events`.
    pub last_event_time: Option<DateTime<Utc>>,
    /// Whether the project accepts events.
    pub is_active: bool,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Display name.
    pub name: String,
    /// Tracked domain.
    pub domain: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owner contact name.
    pub owner_name: String,
    /// Owner contact email.
    pub owner_email: String,
    /// Generated api key.
    pub api_key: String,
}

/// Partial update to a project. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New display name.
    pub name: Option<String>,
    /// New tracked domain.
    pub domain: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New owner contact name.
    pub owner_name: Option<String>,
    /// New owner contact email.
    pub owner_email: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}
