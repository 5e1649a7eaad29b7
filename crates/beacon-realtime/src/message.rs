//! Outbound frame types pushed to dashboard viewers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beacon_entity::event::Event;

/// A frame sent to a subscribed viewer, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    /// A freshly tracked event for the viewer's project.
    NewEvent {
        project_id: Uuid,
        event: Event,
        timestamp: DateTime<Utc>,
    },
}

impl OutboundFrame {
    /// Build the broadcast frame for a newly tracked event. The frame
    /// timestamp is the event's creation time.
    pub fn new_event(project_id: Uuid, event: Event) -> Self {
        let timestamp = event.created_at;
        Self::NewEvent {
            project_id,
            event,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(project_id: Uuid) -> Event {
        Event {
            id: Uuid::new_v4(),
            project_id: Some(project_id),
            session_id: "sess-1".to_string(),
            user_id: Some("user-1".to_string()),
            event_type: "page_view".to_string(),
            event_name: "Page View".to_string(),
            properties: "{}".to_string(),
            page_url: Some("https://example.com/".to_string()),
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn new_event_frame_shape() {
        let project_id = Uuid::new_v4();
        let frame = OutboundFrame::new_event(project_id, sample_event(project_id));

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&frame).unwrap()).unwrap();
        assert_eq!(json["type"], "new_event");
        assert_eq!(json["project_id"], project_id.to_string());
        assert_eq!(json["event"]["event_type"], "page_view");
        assert!(json["timestamp"].is_string());
    }
}
