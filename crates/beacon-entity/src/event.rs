//! Tracked event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One tracked occurrence (page view, click, custom event).
///
/// Events are immutable once created; only ingestion writes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Owning project, if the event was tracked through the gated endpoint.
    pub project_id: Option<Uuid>,
    /// Client-generated session identifier.
    pub session_id: String,
    /// Client-supplied user identifier, when known.
    pub user_id: Option<String>,
    /// Event type (free-form, e.g. "page_view", "click").
    pub event_type: String,
    /// Event name (free-form, human readable).
    pub event_name: String,
    /// Canonical JSON text of the client-supplied property map.
    pub properties: String,

    /// Page URL the event originated from.
    pub page_url: Option<String>,
    /// Page title.
    pub page_title: Option<String>,
    /// Referrer URL.
    pub referrer: Option<String>,

    /// Browser user agent.
    pub user_agent: Option<String>,
    /// Source IP address (defaulted to the observed peer when absent).
    pub ip_address: String,
    /// Resolved country, when known.
    pub country: Option<String>,
    /// Resolved city, when known.
    pub city: Option<String>,

    /// Screen width in pixels.
    pub screen_width: Option<i32>,
    /// Screen height in pixels.
    pub screen_height: Option<i32>,
    /// Browser language.
    pub language: Option<String>,
    /// Client platform.
    pub platform: Option<String>,

    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp. Events are immutable so this equals `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Fully validated data for inserting one event row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEvent {
    /// Owning project.
    pub project_id: Option<Uuid>,
    /// Client-generated session identifier.
    pub session_id: String,
    /// Client-supplied user identifier.
    pub user_id: Option<String>,
    /// Event type.
    pub event_type: String,
    /// Event name.
    pub event_name: String,
    /// Canonical JSON text of the property map.
    pub properties: String,
    /// Page URL.
    pub page_url: Option<String>,
    /// Page title.
    pub page_title: Option<String>,
    /// Referrer URL.
    pub referrer: Option<String>,
    /// Browser user agent.
    pub user_agent: Option<String>,
    /// Source IP address.
    pub ip_address: String,
    /// Resolved country.
    pub country: Option<String>,
    /// Resolved city.
    pub city: Option<String>,
    /// Screen width in pixels.
    pub screen_width: Option<i32>,
    /// Screen height in pixels.
    pub screen_height: Option<i32>,
    /// Browser language.
    pub language: Option<String>,
    /// Client platform.
    pub platform: Option<String>,
}
