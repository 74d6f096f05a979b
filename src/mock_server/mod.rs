//! Mock DocumentCloud API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! DocumentCloud API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use documentcloud::mock_server::{Fixtures, MockServer};
//! use documentcloud::{ClientConfig, DocumentCloudClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let config = ClientConfig::new()
//!         .with_credentials(Fixtures::USERNAME, Fixtures::PASSWORD)
//!         .with_endpoint(&server.api_url())
//!         .unwrap();
//!     let client = DocumentCloudClient::new(config).unwrap();
//!
//!     let projects = client.projects().list().await.unwrap();
//!     assert_eq!(projects.status_code, 200);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockDocument, MockProject, MockState, SharedState, UploadRecord};
