//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A browsing session, keyed by the client-generated session identifier.
///
/// Session rows are upserted off the ingestion hot path: created on the first
/// event that carries a new `session_id`, then `event_count` and `updated_at`
/// advance on every subsequent event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Client-generated session identifier.
    pub id: String,
    /// Client-supplied user identifier, when known.
    pub user_id: Option<String>,
    /// When the session started (first event seen).
    pub start_time: DateTime<Utc>,
    /// When the session ended. No write path closes sessions; always null.
    pub end_time: Option<DateTime<Utc>>,
    /// Session duration in seconds. Never populated, same as `end_time`.
    pub duration: Option<i64>,
    /// Number of events observed in this session.
    pub event_count: i32,
    /// First page URL seen in the session.
    pub landing_page: Option<String>,
    /// Referrer of the first event.
    pub referrer: Option<String>,
    /// Browser user agent.
    pub user_agent: Option<String>,
    /// Source IP address.
    pub ip_address: String,
    /// Resolved country, when known.
    pub country: Option<String>,
    /// Resolved city, when known.
    pub city: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp, advanced on every counted event.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a session row on its first event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// Client-generated session identifier.
    pub id: String,
    /// Client-supplied user identifier.
    pub user_id: Option<String>,
    /// First page URL seen.
    pub landing_page: Option<String>,
    /// Referrer of the first event.
    pub referrer: Option<String>,
    /// Browser user agent.
    pub user_agent: Option<String>,
    /// Source IP address.
    pub ip_address: String,
    /// Resolved country.
    pub country: Option<String>,
    /// Resolved city.
    pub city: Option<String>,
}
