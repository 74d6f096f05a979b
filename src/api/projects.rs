//! Project endpoints. Every project operation requires credentials.

use std::sync::Arc;

use crate::client::ClientConfig;
use crate::error::Result;
use crate::models::{CreateProjectBody, ProjectParams, ProjectUpdateParams};
use crate::request::{ApiRequest, ApiResponse, Method, Payload, Transport};

/// Operations on projects.
///
/// Obtained from [`DocumentCloudClient::projects`](crate::DocumentCloudClient::projects).
#[derive(Clone)]
pub struct Projects {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl Projects {
    pub(crate) fn new(config: Arc<ClientConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Create a project.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, title: &str, params: &ProjectParams) -> Result<ApiResponse> {
        self.config.require_credentials()?;

        let body = CreateProjectBody { title, params };
        let request = ApiRequest::new(Method::Post, self.config.build_uri("projects.json"))
            .with_payload(Payload::Json(serde_json::to_value(&body)?));
        self.transport.execute(request).await
    }

    /// List the projects of the authenticated account.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<ApiResponse> {
        self.config.require_credentials()?;

        let request = ApiRequest::new(Method::Get, self.config.build_uri("projects.json"));
        self.transport.execute(request).await
    }

    /// Replace a project's fields.
    ///
    /// This is a full replace: fields left unset in `params` are cleared
    /// by the service. An empty `params` wipes the title, description and
    /// document list.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, project_id: u64, params: &ProjectUpdateParams) -> Result<ApiResponse> {
        self.config.require_credentials()?;

        let uri = self.config.build_uri(&format!("projects/{project_id}.json"));
        let request =
            ApiRequest::new(Method::Put, uri).with_payload(Payload::Json(serde_json::to_value(params)?));
        self.transport.execute(request).await
    }

    /// Delete a project. Its documents are not affected.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, project_id: u64) -> Result<ApiResponse> {
        self.config.require_credentials()?;

        let uri = self.config.build_uri(&format!("projects/{project_id}.json"));
        self.transport.execute(ApiRequest::new(Method::Delete, uri)).await
    }
}
