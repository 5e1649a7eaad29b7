//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// List response wrapper carrying the paging metadata that was applied.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
}

impl<T: Serialize> ListResponse<T> {
    /// Creates a list response with the limit that was applied.
    pub fn new(data: Vec<T>, limit: i64) -> Self {
        Self {
            success: true,
            data,
            limit: Some(limit),
            offset: None,
            total: None,
            days: None,
        }
    }

    /// Creates a list response without paging metadata.
    pub fn bare(data: Vec<T>) -> Self {
        Self {
            success: true,
            data,
            limit: None,
            offset: None,
            total: None,
            days: None,
        }
    }

    /// Attach the applied offset.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Attach the total row count.
    pub fn with_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    /// Attach the day window that was queried.
    pub fn with_days(mut self, days: i64) -> Self {
        self.days = Some(days);
        self
    }
}

/// Acknowledgement returned by the tracking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAccepted {
    /// Id of the stored event.
    pub event_id: Uuid,
    /// Name of the credentialed project.
    pub project: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
