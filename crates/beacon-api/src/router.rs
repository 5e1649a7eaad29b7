//! Route definitions for the Beacon HTTP API.
//!
//! All routes are mounted under `/api/v1` except the bare `/health` probe.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(tracking_routes())
        .merge(analytics_routes())
        .merge(script_routes())
        .merge(admin_routes());

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Ingestion endpoints, gated by project API key.
fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/track", post(handlers::track::track_event))
        .route("/events", get(handlers::events::list_events))
}

/// Cross-project reporting endpoints.
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::analytics::dashboard))
        .route(
            "/analytics/events-by-day",
            get(handlers::analytics::events_by_day),
        )
        .route("/analytics/top-pages", get(handlers::analytics::top_pages))
        .route(
            "/analytics/top-countries",
            get(handlers::analytics::top_countries),
        )
        .route(
            "/analytics/top-event-types",
            get(handlers::analytics::top_event_types),
        )
}

/// Public tracking-script delivery, keyed by api key.
fn script_routes() -> Router<AppState> {
    Router::new().route("/script/{api_key}", get(handlers::script::script_by_key))
}

/// Project management, per-project realtime reporting, and the viewer socket.
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/projects", post(handlers::admin::create_project))
        .route("/admin/projects", get(handlers::admin::list_projects))
        .route("/admin/projects/{id}", get(handlers::admin::get_project))
        .route("/admin/projects/{id}", put(handlers::admin::update_project))
        .route(
            "/admin/projects/{id}",
            delete(handlers::admin::delete_project),
        )
        .route(
            "/admin/projects/{id}/regenerate-key",
            post(handlers::admin::regenerate_key),
        )
        .route(
            "/admin/projects/{id}/script",
            get(handlers::script::get_script),
        )
        .route(
            "/admin/projects/{id}/script/download",
            get(handlers::script::download_script),
        )
        .route(
            "/admin/projects/{id}/realtime/stats",
            get(handlers::live::project_stats),
        )
        .route(
            "/admin/projects/{id}/realtime/events",
            get(handlers::live::recent_events),
        )
        .route(
            "/admin/projects/{id}/realtime/event-types",
            get(handlers::live::event_type_stats),
        )
        .route(
            "/admin/projects/{id}/realtime/countries",
            get(handlers::live::country_stats),
        )
        .route(
            "/admin/projects/{id}/realtime/pages",
            get(handlers::live::page_stats),
        )
        .route("/admin/projects/{id}/ws", get(handlers::ws::ws_upgrade))
}
