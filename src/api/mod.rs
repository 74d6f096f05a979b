//! Operation facades exposed by [`DocumentCloudClient`](crate::DocumentCloudClient).
//!
//! Each facade turns one API action into an [`ApiRequest`](crate::ApiRequest)
//! and hands it to the client's transport.

mod documents;
mod projects;

pub use documents::Documents;
pub use projects::Projects;
