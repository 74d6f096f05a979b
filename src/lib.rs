//! DocumentCloud API client library.
//!
//! A Rust library for the DocumentCloud REST API. Every operation builds one
//! request, sends it, and hands back the HTTP status together with the
//! parsed JSON body.
//!
//! # Quick Start
//!
//! ```no_run
//! use documentcloud::{
//!     ClientConfig, DocumentCloudClient, SearchParams, UploadParams, UploadSource,
//! };
//!
//! #[tokio::main]
//! async fn main() -> documentcloud::Result<()> {
//!     let config = ClientConfig::new().with_credentials("me@example.com", "secret");
//!     let client = DocumentCloudClient::new(config)?;
//!
//!     // Search public documents
//!     let results = client
//!         .documents()
//!         .search("climate", &SearchParams::default())
//!         .await?;
//!     println!("HTTP {}: {:?}", results.status_code, results.response);
//!
//!     // Upload a document the service fetches by URL
//!     let uploaded = client
//!         .documents()
//!         .upload(
//!             UploadSource::from_input("https://example.com/report.pdf"),
//!             "Annual report",
//!             &UploadParams::default(),
//!         )
//!         .await?;
//!     println!("HTTP {}", uploaded.status_code);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Responses
//!
//! Operations return an [`ApiResponse`] for every HTTP status, 4xx and 5xx
//! included. Only transport failures, missing credentials and unreadable
//! upload files become a [`DocumentCloudError`].
//!
//! # Configuration
//!
//! [`ClientConfig::from_env`] reads these optional variables:
//!
//! - `DOCUMENTCLOUD_USERNAME` - DocumentCloud account email
//! - `DOCUMENTCLOUD_PASSWORD` - DocumentCloud account password
//! - `DOCUMENTCLOUD_API_URL` - Base URL (defaults to `https://www.documentcloud.org/api/`)

pub mod api;
pub mod cli;
mod client;
mod error;
mod models;
mod output;
mod request;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ClientConfig, Credentials, DocumentCloudClient, DEFAULT_API_URL};
pub use error::{DocumentCloudError, Result};
pub use output::PrettyPrint;
pub use request::{
    ApiRequest, ApiResponse, HttpTransport, Method, MultipartFile, MultipartPayload, Payload,
    Transport, DEFAULT_FILE_NAME,
};

// Re-export facades
pub use api::{Documents, Projects};

// Re-export models
pub use models::{
    // Document types
    Access,
    DocumentUpdateParams,
    SearchOrder,
    SearchParams,
    UploadParams,
    UploadSource,
    // Project types
    ProjectParams,
    ProjectUpdateParams,
};
