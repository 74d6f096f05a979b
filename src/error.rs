//! Error types for DocumentCloud API operations.

use thiserror::Error;

/// Errors that can occur during DocumentCloud API operations.
///
/// Non-2xx HTTP responses are deliberately absent: they come back as a
/// regular [`ApiResponse`](crate::ApiResponse) carrying the status code.
#[derive(Debug, Error)]
pub enum DocumentCloudError {
    /// A mutating operation was called without a username and password.
    #[error(
        "This API method requires a username and password when interacting with the DocumentCloud client"
    )]
    Unauthenticated,

    /// The configured endpoint cannot be used as an API base.
    #[error("Invalid API endpoint '{0}': expected an http(s) URL with a host")]
    InvalidEndpoint(String),

    /// HTTP transport error (DNS, connection, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A local upload file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request parameters could not be serialized.
    #[error("Failed to serialize parameters: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

/// Result type alias for DocumentCloud operations.
pub type Result<T> = core::result::Result<T, DocumentCloudError>;
