//! Mock server state management.
//!
//! Provides the in-memory data store for the mock DocumentCloud API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

/// State shared between the server's handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// A document stored by the mock server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockDocument {
    pub id: String,
    pub title: String,
    pub access: String,
    pub pages: u32,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub language: String,
    #[serde(default)]
    pub related_article: Option<String>,
    #[serde(default)]
    pub published_url: Option<String>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    /// URL the document was fetched from, for URL uploads.
    #[serde(default)]
    pub file_url: Option<String>,
    /// Size of the uploaded file, for multipart uploads.
    #[serde(default)]
    pub file_size: Option<usize>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A project stored by the mock server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockProject {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub document_ids: Vec<String>,
}

/// What an upload request carried.
#[derive(Debug, Clone, Default)]
pub struct UploadRecord {
    pub title: String,
    pub fields: HashMap<String, String>,
    pub data: BTreeMap<String, String>,
    pub file_url: Option<String>,
    pub file_size: Option<usize>,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Documents indexed by ID (e.g., "1-budget-report").
    pub documents: BTreeMap<String, MockDocument>,

    /// Projects indexed by numeric ID.
    pub projects: BTreeMap<u64, MockProject>,

    /// Extracted entities indexed by document ID.
    pub entities: HashMap<String, Value>,

    /// Expected `Authorization` header. If set, mutating requests must send it.
    pub required_auth: Option<String>,

    next_document_id: u64,
    next_project_id: u64,
}

/// Turn a title into a URL-safe slug.
fn slugify(title: &str) -> String {
    let slug: Vec<String> = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.join("-")
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add a document to the state.
    pub fn with_document(mut self, document: MockDocument) -> Self {
        self.insert_document(document);
        self
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: MockProject) -> Self {
        self.next_project_id = self.next_project_id.max(project.id);
        self.projects.insert(project.id, project);
        self
    }

    /// Attach extracted entities to a document.
    pub fn with_entities(mut self, document_id: &str, entities: Value) -> Self {
        self.entities.insert(document_id.to_string(), entities);
        self
    }

    /// Require HTTP basic authentication with these credentials.
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        self.required_auth = Some(format!("Basic {encoded}"));
        self
    }

    /// Check an `Authorization` header value against the required credentials.
    ///
    /// Without required credentials any request is accepted.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        match &self.required_auth {
            Some(expected) => authorization == Some(expected.as_str()),
            None => true,
        }
    }

    fn insert_document(&mut self, document: MockDocument) {
        if let Some(n) = document
            .id
            .split('-')
            .next()
            .and_then(|n| n.parse::<u64>().ok())
        {
            self.next_document_id = self.next_document_id.max(n);
        }
        self.documents.insert(document.id.clone(), document);
    }

    /// Get a document by ID.
    pub fn get_document(&self, id: &str) -> Option<&MockDocument> {
        self.documents.get(id)
    }

    /// Get a project by ID.
    pub fn get_project(&self, id: u64) -> Option<&MockProject> {
        self.projects.get(&id)
    }

    /// Case-insensitive substring search over title, description and source.
    ///
    /// Returns the total match count and the requested page.
    pub fn search(&self, query: &str, page: u32, per_page: u32) -> (usize, Vec<&MockDocument>) {
        let needle = query.to_lowercase();
        let matches: Vec<&MockDocument> = self
            .documents
            .values()
            .filter(|d| {
                needle.is_empty()
                    || [Some(&d.title), d.description.as_ref(), d.source.as_ref()]
                        .into_iter()
                        .flatten()
                        .any(|text| text.to_lowercase().contains(&needle))
            })
            .collect();

        let total = matches.len();
        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);
        let page_items = matches
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();
        (total, page_items)
    }

    /// Store a new document from an upload.
    pub fn create_document(&mut self, upload: UploadRecord) -> MockDocument {
        self.next_document_id += 1;
        let now = Utc::now();
        let field = |name: &str| upload.fields.get(name).cloned();

        let document = MockDocument {
            id: format!("{}-{}", self.next_document_id, slugify(&upload.title)),
            title: upload.title.clone(),
            access: field("access").unwrap_or_else(|| "private".to_string()),
            pages: 1,
            source: field("source"),
            description: field("description"),
            language: field("language").unwrap_or_else(|| "eng".to_string()),
            related_article: field("related_article"),
            published_url: field("published_url"),
            data: upload.data,
            file_url: upload.file_url,
            file_size: upload.file_size,
            created_at: now,
            updated_at: now,
        };

        if let Some(project) = field("project")
            .and_then(|p| p.parse::<u64>().ok())
            .and_then(|p| self.projects.get_mut(&p))
        {
            project.document_ids.push(document.id.clone());
        }

        self.documents.insert(document.id.clone(), document.clone());
        document
    }

    /// Apply the fields present in `patch`; absent fields are left unchanged.
    pub fn update_document(&mut self, id: &str, patch: &Value) -> Option<&MockDocument> {
        let document = self.documents.get_mut(id)?;
        let text = |key: &str| patch.get(key).and_then(Value::as_str).map(str::to_string);

        if let Some(title) = text("title") {
            document.title = title;
        }
        if let Some(access) = text("access") {
            document.access = access;
        }
        if patch.get("source").is_some() {
            document.source = text("source");
        }
        if patch.get("description").is_some() {
            document.description = text("description");
        }
        if patch.get("related_article").is_some() {
            document.related_article = text("related_article");
        }
        if patch.get("published_url").is_some() {
            document.published_url = text("published_url");
        }
        if let Some(Value::Object(data)) = patch.get("data") {
            document.data = data
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect();
        }
        document.updated_at = Utc::now();

        Some(document)
    }

    /// Remove a document and drop it from every project.
    pub fn delete_document(&mut self, id: &str) -> Option<MockDocument> {
        let removed = self.documents.remove(id)?;
        self.entities.remove(id);
        for project in self.projects.values_mut() {
            project.document_ids.retain(|d| d != id);
        }
        Some(removed)
    }

    /// Create a project and return it.
    pub fn create_project(
        &mut self,
        title: String,
        description: Option<String>,
        document_ids: Vec<String>,
    ) -> MockProject {
        self.next_project_id += 1;
        let project = MockProject {
            id: self.next_project_id,
            title: Some(title),
            description,
            document_ids,
        };
        self.projects.insert(project.id, project.clone());
        project
    }

    /// Replace every field of a project; omitted fields are cleared.
    pub fn replace_project(
        &mut self,
        id: u64,
        title: Option<String>,
        description: Option<String>,
        document_ids: Vec<String>,
    ) -> Option<&MockProject> {
        let project = self.projects.get_mut(&id)?;
        project.title = title;
        project.description = description;
        project.document_ids = document_ids;
        Some(project)
    }

    /// Delete a project. Its documents stay.
    pub fn delete_project(&mut self, id: u64) -> Option<MockProject> {
        self.projects.remove(&id)
    }
}
