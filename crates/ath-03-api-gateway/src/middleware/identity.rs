//! Caller identity extraction.
//!
//! Authentication happens upstream; this gateway only reads the player id
//! the auth layer placed in the configured header. A missing or malformed
//! id is rejected with 401 before the request body is read.

use crate::domain::error::ApiError;
use crate::router::AppState;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shared_types::PlayerId;
use tracing::debug;

/// Authenticated player making the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub PlayerId);

#[async_trait]
impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(&state.identity_header)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing caller identity"))?;

        PlayerId::new(raw).map(CallerIdentity).map_err(|e| {
            debug!(error = %e, "[ath-03] rejected caller identity");
            ApiError::unauthorized("Invalid caller identity")
        })
    }
}
