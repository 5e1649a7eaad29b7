//! Visitor entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A distinct tracked user, keyed by the client-supplied user identifier.
///
/// Upserted off the ingestion hot path for events that carry a `user_id`:
/// created on first sight, then `last_seen` and `event_count` advance on
/// every subsequent event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Visitor {
    /// Client-supplied user identifier.
    pub id: String,
    /// When the visitor was first seen.
    pub first_seen: DateTime<Utc>,
    /// When the visitor was last seen.
    pub last_seen: DateTime<Utc>,
    /// Number of distinct sessions observed.
    pub session_count: i32,
    /// Number of events observed.
    pub event_count: i32,
    /// Resolved country, when known.
    pub country: Option<String>,
    /// Resolved city, when known.
    pub city: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Row update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a visitor row on first sight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisitor {
    /// Client-supplied user identifier.
    pub id: String,
    /// Resolved country.
    pub country: Option<String>,
    /// Resolved city.
    pub city: Option<String>,
}
