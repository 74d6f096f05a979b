//! Project endpoint handlers. All of them require authentication.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{check_auth, error_response, parse_json, strip_json};
use crate::mock_server::state::SharedState;

/// Body for creating or replacing a project.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectBody {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub document_ids: Vec<String>,
}

fn project_id(segment: &str) -> Option<u64> {
    strip_json(segment).and_then(|id| id.parse().ok())
}

fn not_found(segment: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("No project found with id: {segment}"),
    )
}

/// GET /api/projects.json
pub async fn list_projects(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.read().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let projects: Vec<_> = state.projects.values().collect();
    Json(serde_json::json!({ "projects": projects })).into_response()
}

/// POST /api/projects.json
pub async fn create_project(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }
    let body: ProjectBody = match parse_json(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };

    let Some(title) = body.title.filter(|t| !t.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "title is required");
    };

    let project = state.create_project(title, body.description, body.document_ids);
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "project": project })),
    )
        .into_response()
}

/// PUT /api/projects/{id}.json
///
/// Replaces every field; anything missing from the body is cleared.
pub async fn update_project(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }
    let body: ProjectBody = match parse_json(&body) {
        Ok(body) => body,
        Err(rejection) => return rejection,
    };

    let Some(id) = project_id(&segment) else {
        return not_found(&segment);
    };

    match state.replace_project(id, body.title, body.description, body.document_ids) {
        Some(project) => Json(serde_json::json!({ "project": project })).into_response(),
        None => not_found(&segment),
    }
}

/// DELETE /api/projects/{id}.json
pub async fn delete_project(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let Some(id) = project_id(&segment) else {
        return not_found(&segment);
    };

    match state.delete_project(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&segment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_parsing() {
        assert_eq!(project_id("5.json"), Some(5));
        assert_eq!(project_id("5"), None);
        assert_eq!(project_id("abc.json"), None);
        assert_eq!(project_id(".json"), None);
    }
}
