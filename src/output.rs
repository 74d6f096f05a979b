//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::Value;
use tabled::{Table, Tabled};

use crate::ApiResponse;

/// Trait for human-readable output.
///
/// Implemented for API responses to provide formatted output suitable for
/// terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

/// Render a JSON field for display, without quotes around strings.
fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items.len().to_string(),
        Some(other) => other.to_string(),
    }
}

#[derive(Tabled)]
struct DocumentRow {
    id: String,
    title: String,
    access: String,
    pages: String,
}

impl From<&Value> for DocumentRow {
    fn from(d: &Value) -> Self {
        Self {
            id: field(d, "id"),
            title: field(d, "title"),
            access: field(d, "access"),
            pages: field(d, "pages"),
        }
    }
}

#[derive(Tabled)]
struct ProjectRow {
    id: String,
    title: String,
    documents: String,
}

impl From<&Value> for ProjectRow {
    fn from(p: &Value) -> Self {
        Self {
            id: field(p, "id"),
            title: field(p, "title"),
            documents: field(p, "document_ids"),
        }
    }
}

fn key_values(kind: &str, entity: &Value, keys: &[&str]) -> Vec<String> {
    let header = format!("{kind}: {}", field(entity, "id"));
    let divider = "─".repeat(header.chars().count().max(30));
    let mut lines = vec![header, divider];
    for key in keys {
        let value = field(entity, key);
        if !value.is_empty() {
            lines.push(format!("{:<16}{}", format!("{key}:"), value));
        }
    }
    lines
}

impl PrettyPrint for ApiResponse {
    fn pretty_print(&self) -> String {
        let mut lines = vec![format!("HTTP {}", self.status_code)];

        let Some(body) = &self.response else {
            lines.push("(empty response)".to_string());
            return lines.join("\n");
        };

        if let Some(documents) = body.get("documents").and_then(Value::as_array) {
            if body.get("total").is_some() {
                lines.push(format!("{} documents matched", field(body, "total")));
            }
            let rows: Vec<DocumentRow> = documents.iter().map(DocumentRow::from).collect();
            lines.push(Table::new(rows).to_string());
        } else if let Some(projects) = body.get("projects").and_then(Value::as_array) {
            let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
            lines.push(Table::new(rows).to_string());
        } else if let Some(document) = body.get("document") {
            lines.extend(key_values(
                "Document",
                document,
                &["title", "access", "pages", "source", "description", "language", "created_at"],
            ));
        } else if let Some(project) = body.get("project") {
            lines.extend(key_values("Project", project, &["title", "description", "document_ids"]));
        } else {
            lines.push(serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()));
        }

        lines.join("\n")
    }
}
