//! Document endpoint handlers.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::{check_auth, error_response, parse_json, strip_json};
use crate::mock_server::state::{SharedState, UploadRecord};

/// Query parameters for searching documents.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /api/search.json
pub async fn search_documents(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let q = query.q.unwrap_or_default();
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 1000);

    let (total, documents) = state.search(&q, page, per_page);

    Json(serde_json::json!({
        "total": total,
        "page": page,
        "per_page": per_page,
        "q": q,
        "documents": documents,
    }))
}

/// Sort an upload field into the record, splitting out `data[key]` entries.
fn record_field(record: &mut UploadRecord, name: String, value: String) {
    if let Some(key) = name
        .strip_prefix("data[")
        .and_then(|rest| rest.strip_suffix(']'))
    {
        record.data.insert(key.to_string(), value);
    } else if name == "title" {
        record.title = value;
    } else if name == "file" {
        record.file_url = Some(value);
    } else {
        record.fields.insert(name, value);
    }
}

async fn read_multipart(request: Request) -> Result<UploadRecord, Response> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut record = UploadRecord::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
            record.file_size = Some(bytes.len());
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
            record_field(&mut record, name, value);
        }
    }
    Ok(record)
}

async fn read_form(request: Request) -> Result<UploadRecord, Response> {
    let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
        .await
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut record = UploadRecord::default();
    for (name, value) in pairs {
        record_field(&mut record, name, value);
    }
    Ok(record)
}

/// POST /api/upload.json
///
/// Accepts a URL-encoded form (with `file` holding a URL) or multipart data
/// (with `file` holding the bytes).
pub async fn upload_document(State(state): State<SharedState>, request: Request) -> Response {
    if let Err(rejection) = check_auth(&*state.read().await, request.headers()) {
        return rejection;
    }

    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let record = if is_multipart {
        read_multipart(request).await
    } else {
        read_form(request).await
    };
    let record = match record {
        Ok(record) => record,
        Err(rejection) => return rejection,
    };

    if record.title.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "title is required");
    }
    if record.file_url.is_none() && record.file_size.is_none() {
        return error_response(StatusCode::BAD_REQUEST, "file is required");
    }

    let document = state.write().await.create_document(record);
    (StatusCode::CREATED, Json(document)).into_response()
}

fn not_found(id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("No document found with id: {id}"),
    )
}

/// GET /api/documents/{id}.json
pub async fn get_document(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
) -> Response {
    let Some(id) = strip_json(&segment) else {
        return not_found(&segment);
    };

    let state = state.read().await;
    match state.get_document(id) {
        Some(document) => Json(serde_json::json!({ "document": document })).into_response(),
        None => not_found(id),
    }
}

/// PUT /api/documents/{id}.json
pub async fn update_document(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }
    let patch: Value = match parse_json(&body) {
        Ok(patch) => patch,
        Err(rejection) => return rejection,
    };

    let Some(id) = strip_json(&segment) else {
        return not_found(&segment);
    };

    match state.update_document(id, &patch) {
        Some(document) => Json(serde_json::json!({ "document": document })).into_response(),
        None => not_found(id),
    }
}

/// DELETE /api/documents/{id}.json
pub async fn delete_document(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(rejection) = check_auth(&state, &headers) {
        return rejection;
    }

    let Some(id) = strip_json(&segment) else {
        return not_found(&segment);
    };

    match state.delete_document(id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(id),
    }
}

/// GET /api/documents/{id}/entities.json
pub async fn document_entities(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if state.get_document(&id).is_none() {
        return not_found(&id);
    }

    let entities = state
        .entities
        .get(&id)
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));
    Json(serde_json::json!({ "entities": entities })).into_response()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;

    #[test]
    fn test_record_field_sorts_fields() {
        let mut record = UploadRecord::default();
        record_field(&mut record, "title".to_string(), "Budget".to_string());
        record_field(&mut record, "file".to_string(), "https://x.test/a.pdf".to_string());
        record_field(&mut record, "data[state]".to_string(), "WA".to_string());
        record_field(&mut record, "access".to_string(), "public".to_string());

        assert_eq!(record.title, "Budget");
        assert_eq!(record.file_url.as_deref(), Some("https://x.test/a.pdf"));
        assert_eq!(
            record.data,
            BTreeMap::from([("state".to_string(), "WA".to_string())])
        );
        assert_eq!(
            record.fields,
            HashMap::from([("access".to_string(), "public".to_string())])
        );
    }
}
