//! Document endpoints.

use std::sync::Arc;

use crate::client::ClientConfig;
use crate::error::Result;
use crate::models::{DocumentUpdateParams, SearchParams, UploadParams, UploadSource};
use crate::request::{
    ApiRequest, ApiResponse, Method, MultipartFile, MultipartPayload, Payload, Transport,
};

/// Operations on documents.
///
/// Obtained from [`DocumentCloudClient::documents`](crate::DocumentCloudClient::documents);
/// never constructed directly.
#[derive(Clone)]
pub struct Documents {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

fn document_path(doc_id: &str, suffix: &str) -> String {
    format!("documents/{}{}", urlencoding::encode(doc_id), suffix)
}

impl Documents {
    pub(crate) fn new(config: Arc<ClientConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Search for documents.
    ///
    /// `query` is sent as `q` alongside the optional parameters.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str, params: &SearchParams) -> Result<ApiResponse> {
        let request = ApiRequest::new(Method::Get, self.config.build_uri("search.json"))
            .with_payload(Payload::Query(params.query_pairs(query)?));
        self.transport.execute(request).await
    }

    /// Upload a document from a local path, memory, or a public URL.
    ///
    /// URLs go out as a URL-encoded form and are fetched by the service;
    /// paths and bytes go out as multipart.
    ///
    /// # Errors
    ///
    /// Returns [`Unauthenticated`](crate::DocumentCloudError::Unauthenticated)
    /// without credentials, and an I/O error if a local file cannot be opened.
    #[tracing::instrument(skip(self, file, params), fields(url = file.is_url()))]
    pub async fn upload(
        &self,
        file: UploadSource,
        title: &str,
        params: &UploadParams,
    ) -> Result<ApiResponse> {
        self.config.require_credentials()?;

        let mut fields = params.form_fields(title)?;
        let payload = match file {
            UploadSource::Url(url) => {
                fields.insert(0, ("file".to_string(), url));
                Payload::Form(fields)
            }
            UploadSource::Path(path) => Payload::Multipart(MultipartPayload {
                file: MultipartFile::Path(path),
                fields,
            }),
            UploadSource::Bytes { data, file_name } => Payload::Multipart(MultipartPayload {
                file: MultipartFile::Bytes { data, file_name },
                fields,
            }),
        };

        let request = ApiRequest::new(Method::Post, self.config.build_uri("upload.json"))
            .with_payload(payload);
        self.transport.execute(request).await
    }

    /// Fetch a document's metadata.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, doc_id: &str) -> Result<ApiResponse> {
        let uri = self.config.build_uri(&document_path(doc_id, ".json"));
        self.transport.execute(ApiRequest::new(Method::Get, uri)).await
    }

    /// Update a document's title, source, description, related article,
    /// access level or data. Only the values set in `params` change.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, doc_id: &str, params: &DocumentUpdateParams) -> Result<ApiResponse> {
        self.config.require_credentials()?;

        let uri = self.config.build_uri(&document_path(doc_id, ".json"));
        let request = ApiRequest::new(Method::Put, uri)
            .with_payload(Payload::Json(serde_json::to_value(params)?));
        self.transport.execute(request).await
    }

    /// Delete a document.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, doc_id: &str) -> Result<ApiResponse> {
        self.config.require_credentials()?;

        let uri = self.config.build_uri(&document_path(doc_id, ".json"));
        self.transport.execute(ApiRequest::new(Method::Delete, uri)).await
    }

    /// List the entities extracted from a document.
    #[tracing::instrument(skip(self))]
    pub async fn entities(&self, doc_id: &str) -> Result<ApiResponse> {
        let uri = self.config.build_uri(&document_path(doc_id, "/entities.json"));
        self.transport.execute(ApiRequest::new(Method::Get, uri)).await
    }
}
