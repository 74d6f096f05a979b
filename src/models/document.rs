//! Document parameter types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;
use crate::request::flatten_params;

/// Who can see a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Public,
    Private,
    Organization,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Access::Public => "public",
            Access::Private => "private",
            Access::Organization => "organization",
        };
        f.write_str(s)
    }
}

impl FromStr for Access {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Access::Public),
            "private" => Ok(Access::Private),
            "organization" => Ok(Access::Organization),
            other => Err(format!(
                "unknown access level '{other}' (expected public, private or organization)"
            )),
        }
    }
}

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    Score,
    CreatedAt,
    Title,
    PageCount,
    Source,
}

impl FromStr for SearchOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "score" => Ok(SearchOrder::Score),
            "created_at" => Ok(SearchOrder::CreatedAt),
            "title" => Ok(SearchOrder::Title),
            "page_count" => Ok(SearchOrder::PageCount),
            "source" => Ok(SearchOrder::Source),
            other => Err(format!("unknown search order '{other}'")),
        }
    }
}

/// Optional search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Response page number (the service defaults to 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Documents per page (the service defaults to 10, max 1000).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    /// Include document sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<bool>,

    /// Include document annotations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<bool>,

    /// Include key/value data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<bool>,

    /// Number of highlighted mentions of the search phrase (max 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SearchOrder>,
}

impl SearchParams {
    /// Query pairs for a search, with `q` first.
    pub(crate) fn query_pairs(&self, query: &str) -> Result<Vec<(String, String)>> {
        let mut pairs = vec![("q".to_string(), query.to_string())];
        pairs.extend(flatten_params(&serde_json::to_value(self)?));
        Ok(pairs)
    }
}

/// The file to upload.
///
/// Strings from user input go through [`UploadSource::from_input`], which
/// decides once whether they name a remote URL or a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A file on disk, streamed as multipart.
    Path(PathBuf),
    /// In-memory contents, sent as multipart.
    Bytes {
        data: Vec<u8>,
        file_name: Option<String>,
    },
    /// A public URL the service fetches itself, kept as the caller wrote it.
    Url(String),
}

impl UploadSource {
    /// Classify user input as a URL or a path.
    ///
    /// Only absolute `http`, `https` or `ftp` URLs with a host count as
    /// URLs; everything else (including Windows drive paths) is a path.
    pub fn from_input(input: &str) -> Self {
        match Url::parse(input) {
            Ok(url) if matches!(url.scheme(), "http" | "https" | "ftp") && url.has_host() => {
                UploadSource::Url(input.to_string())
            }
            _ => UploadSource::Path(PathBuf::from(input)),
        }
    }

    /// In-memory contents with a file name.
    pub fn bytes(data: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        UploadSource::Bytes {
            data: data.into(),
            file_name: Some(file_name.into()),
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, UploadSource::Url(_))
    }
}

impl From<&str> for UploadSource {
    fn from(input: &str) -> Self {
        Self::from_input(input)
    }
}

impl From<PathBuf> for UploadSource {
    fn from(path: PathBuf) -> Self {
        UploadSource::Path(path)
    }
}

impl From<Vec<u8>> for UploadSource {
    fn from(data: Vec<u8>) -> Self {
        UploadSource::Bytes {
            data,
            file_name: None,
        }
    }
}

impl From<Url> for UploadSource {
    fn from(url: Url) -> Self {
        UploadSource::Url(url.into())
    }
}

/// Optional parameters sent along with an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Document language; picks the OCR package (the service defaults to `eng`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// URL of the article associated with the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_article: Option<String>,

    /// URL of the page where the document will be embedded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,

    /// Access level (the service defaults to private).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,

    /// Numeric ID of a project to add the document to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<u64>,

    /// Arbitrary key/value data, sent as `data[key]=value`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,

    /// Keep the document away from third-party entity extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,

    /// OCR the document even if it already has text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_ocr: Option<bool>,
}

impl UploadParams {
    /// Form fields for an upload: `title` followed by the set parameters.
    pub(crate) fn form_fields(&self, title: &str) -> Result<Vec<(String, String)>> {
        let mut fields = vec![("title".to_string(), title.to_string())];
        fields.extend(flatten_params(&serde_json::to_value(self)?));
        Ok(fields)
    }
}

/// Values to change on an existing document. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_article: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_input_is_classified_as_url() {
        let source = UploadSource::from_input("https://example.com/doc.pdf");
        assert!(source.is_url());

        let source = UploadSource::from_input("ftp://files.example.com/doc.pdf");
        assert!(source.is_url());
    }

    #[test]
    fn test_url_input_is_kept_verbatim() {
        for input in [
            "https://example.com",
            "https://EXAMPLE.com/My Report.pdf",
            "https://example.com/a/../b.pdf",
        ] {
            assert_eq!(
                UploadSource::from_input(input),
                UploadSource::Url(input.to_string())
            );
        }
    }

    #[test]
    fn test_path_input_is_classified_as_path() {
        assert_eq!(
            UploadSource::from_input("/local/path.pdf"),
            UploadSource::Path(PathBuf::from("/local/path.pdf"))
        );
        assert_eq!(
            UploadSource::from_input("relative/doc.pdf"),
            UploadSource::Path(PathBuf::from("relative/doc.pdf"))
        );
        // A bare host without a scheme is not a URL.
        assert!(!UploadSource::from_input("example.com/doc.pdf").is_url());
        assert!(!UploadSource::from_input("C:\\docs\\doc.pdf").is_url());
    }

    #[test]
    fn test_search_query_pairs() {
        let params = SearchParams {
            page: Some(2),
            order: Some(SearchOrder::PageCount),
            ..Default::default()
        };
        let pairs = params.query_pairs("climate").unwrap();

        assert_eq!(pairs[0], ("q".to_string(), "climate".to_string()));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("order".to_string(), "page_count".to_string())));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_upload_form_fields() {
        let params = UploadParams {
            access: Some(Access::Public),
            project: Some(42),
            force_ocr: Some(true),
            data: Some(BTreeMap::from([("state".to_string(), "WA".to_string())])),
            ..Default::default()
        };
        let fields = params.form_fields("Budget").unwrap();

        assert_eq!(fields[0], ("title".to_string(), "Budget".to_string()));
        assert!(fields.contains(&("access".to_string(), "public".to_string())));
        assert!(fields.contains(&("project".to_string(), "42".to_string())));
        assert!(fields.contains(&("force_ocr".to_string(), "true".to_string())));
        assert!(fields.contains(&("data[state]".to_string(), "WA".to_string())));
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn test_update_params_skip_unset() {
        let params = DocumentUpdateParams {
            title: Some("New".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({ "title": "New" })
        );
    }

    #[test]
    fn test_access_from_str() {
        assert_eq!("Organization".parse::<Access>().unwrap(), Access::Organization);
        assert!("secret".parse::<Access>().is_err());
        assert_eq!("created-at".parse::<SearchOrder>().unwrap(), SearchOrder::CreatedAt);
    }
}
