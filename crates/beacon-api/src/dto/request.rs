//! Request DTOs.

use serde::Deserialize;

use beacon_core::types::properties::Properties;

/// Body of a tracking call.
///
/// `ip_address` may be omitted or empty; the handler falls back to the
/// forwarding headers, then to the socket peer address.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackEventRequest {
    pub session_id: String,
    pub user_id: Option<String>,
    pub event_type: String,
    pub event_name: String,
    #[serde(default)]
    pub properties: Properties,
    pub page_url: Option<String>,
    pub page_title: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub screen_width: Option<i32>,
    pub screen_height: Option<i32>,
    pub language: Option<String>,
    pub platform: Option<String>,
}

/// Body for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub domain: String,
    pub description: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
}

/// Body for partially updating a project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub description: Option<String>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for the event listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub session_id: Option<String>,
}

/// Query parameters for list endpoints that only take a limit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// Query parameters for paged list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the events-by-day report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

/// Clamp a limit: out-of-range or missing values fall back to the default.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    match limit {
        Some(l) if l > 0 && l <= max => l,
        _ => default,
    }
}

/// Clamp an offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_out_of_range_fall_back_to_default() {
        assert_eq!(clamp_limit(None, 50, 1000), 50);
        assert_eq!(clamp_limit(Some(0), 50, 1000), 50);
        assert_eq!(clamp_limit(Some(-3), 50, 1000), 50);
        assert_eq!(clamp_limit(Some(1001), 50, 1000), 50);
        assert_eq!(clamp_limit(Some(200), 50, 1000), 200);
    }

    #[test]
    fn offsets_never_go_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(30)), 30);
    }
}
