//! Mock DocumentCloud API server.
//!
//! Provides an axum-based HTTP server that simulates the DocumentCloud API.

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::{MockState, SharedState};

/// A mock DocumentCloud API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// Mutating routes require [`Fixtures::USERNAME`] and
    /// [`Fixtures::PASSWORD`]. The server listens on a random available port.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::state_from_scenario(Fixtures::default_scenario())).await
    }

    /// Start a mock server with empty state and no authentication.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the root URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the API base URL to configure a client with.
    pub fn api_url(&self) -> String {
        format!("{}/api/", self.url)
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: SharedState) -> Router {
        let api = Router::new()
            // Document routes
            .route("/search.json", get(handlers::search_documents))
            .route("/upload.json", post(handlers::upload_document))
            .route(
                "/documents/:id",
                get(handlers::get_document)
                    .put(handlers::update_document)
                    .delete(handlers::delete_document),
            )
            .route(
                "/documents/:id/entities.json",
                get(handlers::document_entities),
            )
            // Project routes
            .route(
                "/projects.json",
                get(handlers::list_projects).post(handlers::create_project),
            )
            .route(
                "/projects/:id",
                axum::routing::put(handlers::update_project).delete(handlers::delete_project),
            );

        Router::new()
            .nest("/api", api)
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
