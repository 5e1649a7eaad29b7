//! # beacon-api
//!
//! HTTP API layer for Beacon built on Axum.
//!
//! Provides the tracking endpoint, reporting endpoints, project management,
//! the WebSocket upgrade for dashboard viewers, middleware (CORS, logging),
//! extractors, and DTOs.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
