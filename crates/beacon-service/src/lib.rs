//! # beacon-service
//!
//! Business logic service layer for Beacon. Each service orchestrates
//! repositories and the realtime hub to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod analytics;
pub mod live;
pub mod project;
pub mod tracking;

pub use analytics::{AnalyticsService, DashboardStats};
pub use live::{LiveStatsService, ProjectLiveStats, RecentEvent};
pub use project::{CreateProjectInput, ProjectOverview, ProjectService};
pub use tracking::{TrackEventInput, TrackingService};
