//! Credential gate for the tracking endpoint.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use beacon_core::error::AppError;
use beacon_entity::project::Project;

use crate::state::AppState;

/// Header carrying the project api key.
const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter fallback for clients that cannot set headers.
const API_KEY_QUERY: &str = "api_key";

/// Extracts and verifies the project api key on a tracking request.
///
/// The key is read from the `X-API-Key` header, falling back to the
/// `api_key` query parameter. A missing key is rejected before any
/// database access; a key that matches no active project is rejected
/// after lookup. Deactivated projects never match.
#[derive(Debug, Clone)]
pub struct ProjectKey(pub Project);

impl FromRequestParts<AppState> for ProjectKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let api_key = match header_key {
            Some(key) if !key.is_empty() => key,
            _ => Query::<HashMap<String, String>>::from_request_parts(parts, state)
                .await
                .ok()
                .and_then(|Query(params)| params.get(API_KEY_QUERY).cloned())
                .filter(|key| !key.is_empty())
                .ok_or_else(|| AppError::unauthenticated("API key is required"))?,
        };

        let project = state
            .project_repo
            .find_active_by_api_key(&api_key)
            .await?
            .ok_or_else(|| AppError::invalid_credential("Invalid API key"))?;

        Ok(Self(project))
    }
}
