//! Aggregate row types returned by reporting queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Event count for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Event count for one page URL (global top-pages report).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageCount {
    pub page_url: String,
    pub count: i64,
}

/// Event count for one page URL/title pair (per-project breakdown).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageBreakdown {
    pub page_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub count: i64,
}

/// Event count for one country.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CountryCount {
    pub country: String,
    pub count: i64,
}

/// Event count for one event type.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventTypeCount {
    pub event_type: String,
    pub count: i64,
}
