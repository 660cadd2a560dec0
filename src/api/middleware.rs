use crate::api::AppState;
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Guard for read endpoints. Passes when no key is configured or the caller presents the configured key.
///
/// The key is read from the `x-api-key` header, falling back to the `api_key` query parameter.
#[derive(Debug)]
pub struct ApiKey;

fn provided_key(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()).filter(|v| !v.is_empty());
    if let Some(header) = header {
        return Some(header.to_string());
    }
    Query::<ApiKeyQuery>::try_from_uri(&parts.uri).ok().and_then(|Query(q)| q.api_key)
}

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.auth.expected_key() else {
            return Ok(Self);
        };

        match provided_key(parts) {
            Some(provided) if provided == expected => Ok(Self),
            _ => Err(AppError::InvalidApiKey),
        }
    }
}
