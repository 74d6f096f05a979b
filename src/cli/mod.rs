//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! documentcloud binary.

use clap::{Args, Parser, Subcommand};

use crate::{Access, SearchOrder};

/// DocumentCloud API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "documentcloud", about = "DocumentCloud API CLI", version)]
pub struct Cli {
    /// Output the raw response as JSON instead of a summary.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// DocumentCloud account email.
    #[arg(long, global = true, env = "DOCUMENTCLOUD_USERNAME")]
    pub username: Option<String>,

    /// DocumentCloud account password.
    #[arg(long, global = true, env = "DOCUMENTCLOUD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Override the API base URL.
    #[arg(long, global = true, env = "DOCUMENTCLOUD_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level resources.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search, upload and manage documents.
    #[command(subcommand, alias = "documents")]
    Document(DocumentCommand),

    /// Create and manage projects.
    #[command(subcommand, alias = "projects")]
    Project(ProjectCommand),
}

/// Document subcommands.
#[derive(Subcommand, Debug)]
pub enum DocumentCommand {
    /// Search for documents.
    Search {
        /// The search query.
        query: String,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of documents per page.
        #[arg(long)]
        per_page: Option<u32>,

        /// Result order: score, created_at, title, page_count or source.
        #[arg(long)]
        order: Option<SearchOrder>,

        /// Number of highlighted mentions to include.
        #[arg(long)]
        mentions: Option<u32>,

        /// Include document sections.
        #[arg(long)]
        sections: bool,

        /// Include document annotations.
        #[arg(long)]
        annotations: bool,

        /// Include key/value data.
        #[arg(long)]
        data: bool,
    },

    /// Get a document's metadata.
    Get {
        /// The document identifier.
        id: String,
    },

    /// List the entities extracted from a document.
    Entities {
        /// The document identifier.
        id: String,
    },

    /// Upload a file from disk or a public URL.
    Upload {
        /// Path to a local file, or an http(s) URL.
        file: String,

        /// Title of the document.
        #[arg(long)]
        title: String,

        #[command(flatten)]
        fields: DocumentFields,

        /// Language used to pick the OCR package.
        #[arg(long)]
        language: Option<String>,

        /// Numeric ID of a project to add the document to.
        #[arg(long)]
        project: Option<u64>,

        /// Keep the document away from third-party entity extraction.
        #[arg(long)]
        secure: bool,

        /// OCR the document even if it already has text.
        #[arg(long)]
        force_ocr: bool,
    },

    /// Update a document's metadata.
    Update {
        /// The document identifier.
        id: String,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: DocumentFields,
    },

    /// Delete a document.
    Delete {
        /// The document identifier.
        id: String,
    },
}

/// Metadata shared by upload and update.
#[derive(Args, Debug, Default)]
pub struct DocumentFields {
    /// Source of the document.
    #[arg(long)]
    pub source: Option<String>,

    /// Description of the document.
    #[arg(long)]
    pub description: Option<String>,

    /// Access level: public, private or organization.
    #[arg(long)]
    pub access: Option<Access>,

    /// URL of the associated article.
    #[arg(long)]
    pub related_article: Option<String>,

    /// URL of the page embedding the document.
    #[arg(long)]
    pub published_url: Option<String>,

    /// Key/value data as KEY=VALUE (repeatable).
    #[arg(long = "data", value_parser = parse_key_val)]
    pub data: Vec<(String, String)>,
}

/// Project subcommands.
#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project.
    Create {
        /// Title of the project.
        title: String,

        /// Description of the project.
        #[arg(long)]
        description: Option<String>,

        /// Document to include (repeatable).
        #[arg(long = "document-id")]
        document_ids: Vec<String>,
    },

    /// List the account's projects.
    List,

    /// Replace a project's fields. Omitted fields are cleared.
    Update {
        /// The project identifier.
        id: u64,

        /// Title of the project.
        #[arg(long)]
        title: Option<String>,

        /// Description of the project.
        #[arg(long)]
        description: Option<String>,

        /// Document to include (repeatable).
        #[arg(long = "document-id")]
        document_ids: Vec<String>,
    },

    /// Delete a project. Its documents are kept.
    Delete {
        /// The project identifier.
        id: u64,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
