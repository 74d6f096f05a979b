//! Request descriptors and the HTTP executor.
//!
//! Every API operation is expressed as an [`ApiRequest`] and handed to a
//! [`Transport`]. The default transport, [`HttpTransport`], sends it with
//! `reqwest` and normalizes the reply into an [`ApiResponse`].

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::io::ReaderStream;
use url::Url;

use crate::error::Result;

const USER_AGENT: &str = concat!("documentcloud-rs/", env!("CARGO_PKG_VERSION"));

/// File name sent for in-memory uploads that were not given one.
pub const DEFAULT_FILE_NAME: &str = "document";

/// HTTP methods used by the DocumentCloud API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// The file part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartFile {
    /// Streamed from disk when the request is sent.
    Path(PathBuf),
    /// Sent from memory.
    Bytes {
        data: Vec<u8>,
        file_name: Option<String>,
    },
}

/// A multipart form: one `file` part plus text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload {
    pub file: MultipartFile,
    pub fields: Vec<(String, String)>,
}

impl MultipartPayload {
    /// Build the `reqwest` form, opening the file if it lives on disk.
    async fn into_form(self) -> Result<Form> {
        let part = match self.file {
            MultipartFile::Path(path) => {
                let file = tokio::fs::File::open(&path).await?;
                let len = file.metadata().await?.len();
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(DEFAULT_FILE_NAME)
                    .to_string();
                Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), len)
                    .file_name(file_name)
            }
            MultipartFile::Bytes { data, file_name } => Part::bytes(data)
                .file_name(file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())),
        };

        let form = self
            .fields
            .into_iter()
            .fold(Form::new().part("file", part), |form, (name, value)| {
                form.text(name, value)
            });
        Ok(form)
    }
}

/// Where the parameters of a request travel.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No parameters.
    Empty,
    /// Query string pairs.
    Query(Vec<(String, String)>),
    /// JSON request body.
    Json(Value),
    /// URL-encoded form body.
    Form(Vec<(String, String)>),
    /// Multipart form body.
    Multipart(MultipartPayload),
}

/// A fully specified request, built fresh for every call.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub uri: String,
    pub method: Method,
    pub payload: Payload,
}

impl ApiRequest {
    pub fn new(method: Method, uri: String) -> Self {
        Self {
            uri,
            method,
            payload: Payload::Empty,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// The target URI with any embedded credentials removed.
    pub fn redacted_uri(&self) -> String {
        match Url::parse(&self.uri) {
            Ok(mut url) => {
                // Only fails for cannot-be-a-base URLs, which carry no user-info.
                let _ = url.set_username("");
                let _ = url.set_password(None);
                url.to_string()
            }
            Err(_) => self.uri.clone(),
        }
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("uri", &self.redacted_uri())
            .field("method", &self.method)
            .field("payload", &self.payload)
            .finish()
    }
}

/// The normalized result of one API call.
///
/// Any HTTP status is represented here, including 4xx and 5xx.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl ApiResponse {
    /// Normalize a raw status and body.
    ///
    /// Empty bodies produce no `response`; bodies that are not JSON are
    /// kept as a JSON string.
    pub fn from_body(status_code: u16, body: &[u8]) -> Self {
        let response = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(body).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(body).into_owned())
            }))
        };
        Self {
            status_code,
            response,
        }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Executes request descriptors.
///
/// Implementations must issue at most one request per call and must not
/// retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport.
///
/// Cheaply cloneable; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Create a transport with no request timeout.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Create a transport whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, uri = %request.redacted_uri()))]
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let builder = self.http.request(request.method.into(), &request.uri);

        let builder = match request.payload {
            Payload::Empty => builder,
            Payload::Query(pairs) => builder.query(&pairs),
            Payload::Json(body) => builder.json(&body),
            Payload::Form(pairs) => builder.form(&pairs),
            Payload::Multipart(multipart) => builder.multipart(multipart.into_form().await?),
        };

        tracing::debug!("sending request");
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(ApiResponse::from_body(status, &body))
    }
}

/// Flatten a serialized parameter object into form/query pairs.
///
/// Scalars map to `key=value`, nested objects to `key[sub]=value` and
/// arrays to repeated `key[]=value`. Nulls are dropped.
pub(crate) fn flatten_params(value: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(map) = value {
        for (key, value) in map {
            push_pairs(&mut pairs, key.clone(), value);
        }
    }
    pairs
}

fn push_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::Array(items) => {
            for item in items {
                push_pairs(pairs, format!("{key}[]"), item);
            }
        }
        Value::Object(map) => {
            for (sub, item) in map {
                push_pairs(pairs, format!("{key}[{sub}]"), item);
            }
        }
    }
}
