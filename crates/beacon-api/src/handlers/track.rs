//! The gated tracking endpoint.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;

use beacon_core::error::AppError;
use beacon_service::TrackEventInput;

use crate::dto::request::TrackEventRequest;
use crate::dto::response::{ApiResponse, TrackAccepted};
use crate::extractors::ProjectKey;
use crate::state::AppState;

/// POST /api/v1/track
///
/// The credential gate runs before the body is read; an unauthenticated
/// caller never reaches ingestion.
pub async fn track_event(
    State(state): State<AppState>,
    ProjectKey(project): ProjectKey,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<TrackEventRequest>,
) -> Result<Json<ApiResponse<TrackAccepted>>, AppError> {
    let ip_address = resolve_client_ip(req.ip_address.as_deref(), &headers, peer);

    let input = TrackEventInput {
        session_id: req.session_id,
        user_id: req.user_id,
        event_type: req.event_type,
        event_name: req.event_name,
        properties: req.properties,
        page_url: req.page_url,
        page_title: req.page_title,
        referrer: req.referrer,
        user_agent: req.user_agent,
        ip_address,
        country: req.country,
        city: req.city,
        screen_width: req.screen_width,
        screen_height: req.screen_height,
        language: req.language,
        platform: req.platform,
    };

    let event = state.tracking_service.record(&project, input).await?;

    Ok(Json(ApiResponse::ok(TrackAccepted {
        event_id: event.id,
        project: project.name,
    })))
}

/// Pick the client IP: explicit body value, forwarding headers, then the
/// socket peer.
fn resolve_client_ip(body_ip: Option<&str>, headers: &HeaderMap, peer: SocketAddr) -> String {
    if let Some(ip) = body_ip {
        if !ip.trim().is_empty() {
            return ip.trim().to_string();
        }
    }

    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    if let Some(real_ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return real_ip.to_string();
    }

    peer.ip().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> SocketAddr {
        "203.0.113.50:443".parse().unwrap()
    }

    #[test]
    fn body_ip_wins_when_present() {
        let headers = HeaderMap::new();
        assert_eq!(
            resolve_client_ip(Some("198.51.100.7"), &headers, peer()),
            "198.51.100.7"
        );
    }

    #[test]
    fn forwarded_header_beats_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.8, 10.0.0.1".parse().unwrap());
        assert_eq!(resolve_client_ip(None, &headers, peer()), "198.51.100.8");
        assert_eq!(resolve_client_ip(Some("  "), &headers, peer()), "198.51.100.8");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let headers = HeaderMap::new();
        assert_eq!(resolve_client_ip(None, &headers, peer()), "203.0.113.50");
    }
}
