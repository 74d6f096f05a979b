//! Project parameter types.

use serde::{Deserialize, Serialize};

/// Optional parameters for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Documents to associate with the project, by document identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_ids: Option<Vec<String>>,
}

/// Body of a project update.
///
/// The service *replaces* every field on update: anything left as `None`
/// is cleared, including `document_ids`. Send the full desired state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_ids: Option<Vec<String>>,
}

/// JSON body for project creation: `title` merged with the parameters.
#[derive(Debug, Serialize)]
pub(crate) struct CreateProjectBody<'a> {
    pub title: &'a str,
    #[serde(flatten)]
    pub params: &'a ProjectParams,
}
