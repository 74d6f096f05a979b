//! CLI argument parsing tests.

use clap::Parser;
use documentcloud::cli::{Cli, Command, DocumentCommand, ProjectCommand};
use documentcloud::{Access, SearchOrder};

#[test]
fn test_cli_parses_document_search() {
    let cli = Cli::parse_from([
        "documentcloud",
        "document",
        "search",
        "climate",
        "--page",
        "2",
        "--order",
        "page_count",
        "--annotations",
    ]);

    assert!(!cli.json);
    match cli.command {
        Command::Document(DocumentCommand::Search {
            query,
            page,
            order,
            annotations,
            sections,
            ..
        }) => {
            assert_eq!(query, "climate");
            assert_eq!(page, Some(2));
            assert_eq!(order, Some(SearchOrder::PageCount));
            assert!(annotations);
            assert!(!sections);
        }
        _ => panic!("Expected document search command"),
    }
}

#[test]
fn test_cli_parses_upload_with_metadata() {
    let cli = Cli::parse_from([
        "documentcloud",
        "documents",
        "upload",
        "https://example.com/doc.pdf",
        "--title",
        "Budget",
        "--access",
        "public",
        "--project",
        "42",
        "--data",
        "state=WA",
        "--data",
        "year=2024",
        "--force-ocr",
    ]);

    match cli.command {
        Command::Document(DocumentCommand::Upload {
            file,
            title,
            fields,
            project,
            force_ocr,
            secure,
            ..
        }) => {
            assert_eq!(file, "https://example.com/doc.pdf");
            assert_eq!(title, "Budget");
            assert_eq!(fields.access, Some(Access::Public));
            assert_eq!(
                fields.data,
                vec![
                    ("state".to_string(), "WA".to_string()),
                    ("year".to_string(), "2024".to_string()),
                ]
            );
            assert_eq!(project, Some(42));
            assert!(force_ocr);
            assert!(!secure);
        }
        _ => panic!("Expected document upload command"),
    }
}

#[test]
fn test_cli_upload_requires_title() {
    let result = Cli::try_parse_from(["documentcloud", "document", "upload", "doc.pdf"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_unknown_access() {
    let result = Cli::try_parse_from([
        "documentcloud",
        "document",
        "update",
        "123",
        "--access",
        "secret",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_project_update() {
    let cli = Cli::parse_from([
        "documentcloud",
        "--json",
        "project",
        "update",
        "5",
        "--title",
        "Courts",
        "--document-id",
        "1-a",
        "--document-id",
        "2-b",
    ]);

    assert!(cli.json);
    match cli.command {
        Command::Project(ProjectCommand::Update {
            id,
            title,
            description,
            document_ids,
        }) => {
            assert_eq!(id, 5);
            assert_eq!(title, Some("Courts".to_string()));
            assert_eq!(description, None);
            assert_eq!(document_ids, vec!["1-a", "2-b"]);
        }
        _ => panic!("Expected project update command"),
    }
}

#[test]
fn test_cli_parses_project_list_with_global_flags() {
    let cli = Cli::parse_from([
        "documentcloud",
        "projects",
        "list",
        "--verbose",
        "--api-url",
        "https://x.test/api/",
    ]);

    assert!(cli.verbose);
    assert_eq!(cli.api_url.as_deref(), Some("https://x.test/api/"));
    assert!(matches!(cli.command, Command::Project(ProjectCommand::List)));
}
