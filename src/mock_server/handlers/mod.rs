//! HTTP request handlers for the mock server.

pub mod documents;
pub mod projects;

pub use documents::*;
pub use projects::*;

use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use serde::de::DeserializeOwned;

use super::state::MockState;

/// Strip the `.json` suffix from a path segment like `123.json`.
pub(crate) fn strip_json(segment: &str) -> Option<&str> {
    segment.strip_suffix(".json").filter(|s| !s.is_empty())
}

/// JSON error body with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Parse a JSON request body. Call after [`check_auth`] so anonymous
/// callers see 401 whatever they sent.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {e}"))
    })
}

/// Reject the request unless it carries the required basic credentials.
pub(crate) fn check_auth(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if state.is_authorized(authorization) {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"DocumentCloud\"")],
            Json(serde_json::json!({ "error": "Authentication required" })),
        )
            .into_response())
    }
}
