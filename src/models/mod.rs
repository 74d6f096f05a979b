//! DocumentCloud parameter types.

mod document;
mod project;

pub use document::*;
pub use project::*;
