//! DocumentCloud API CLI binary.
//!
//! A command-line interface for interacting with the DocumentCloud API.

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;
use documentcloud::cli::{Cli, Command, DocumentCommand, DocumentFields, ProjectCommand};
use documentcloud::{
    ApiResponse, ClientConfig, DocumentCloudClient, DocumentUpdateParams, PrettyPrint,
    ProjectParams, ProjectUpdateParams, SearchParams, UploadParams, UploadSource,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "documentcloud=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_parts(
        cli.username.clone(),
        cli.password.clone(),
        cli.api_url.clone(),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Check DOCUMENTCLOUD_API_URL or --api-url");
            return ExitCode::FAILURE;
        }
    };

    let client = match DocumentCloudClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(response) if response.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e @ documentcloud::DocumentCloudError::Unauthenticated) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set DOCUMENTCLOUD_USERNAME and DOCUMENTCLOUD_PASSWORD");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &DocumentCloudClient, cli: Cli) -> documentcloud::Result<ApiResponse> {
    let response = match cli.command {
        Command::Document(command) => handle_document(client, command).await?,
        Command::Project(command) => handle_project(client, command).await?,
    };
    output(&response, cli.json)?;
    Ok(response)
}

async fn handle_document(
    client: &DocumentCloudClient,
    command: DocumentCommand,
) -> documentcloud::Result<ApiResponse> {
    let documents = client.documents();

    match command {
        DocumentCommand::Search {
            query,
            page,
            per_page,
            order,
            mentions,
            sections,
            annotations,
            data,
        } => {
            let params = SearchParams {
                page,
                per_page,
                sections: sections.then_some(true),
                annotations: annotations.then_some(true),
                data: data.then_some(true),
                mentions,
                order,
            };
            documents.search(&query, &params).await
        }
        DocumentCommand::Get { id } => documents.get(&id).await,
        DocumentCommand::Entities { id } => documents.entities(&id).await,
        DocumentCommand::Upload {
            file,
            title,
            fields,
            language,
            project,
            secure,
            force_ocr,
        } => {
            let params = UploadParams {
                source: fields.source,
                description: fields.description,
                language,
                related_article: fields.related_article,
                published_url: fields.published_url,
                access: fields.access,
                project,
                data: data_map(fields.data),
                secure: secure.then_some(true),
                force_ocr: force_ocr.then_some(true),
            };
            documents
                .upload(UploadSource::from_input(&file), &title, &params)
                .await
        }
        DocumentCommand::Update { id, title, fields } => {
            let DocumentFields {
                source,
                description,
                access,
                related_article,
                published_url,
                data,
            } = fields;
            let params = DocumentUpdateParams {
                title,
                source,
                description,
                related_article,
                published_url,
                access,
                data: data_map(data),
            };
            documents.update(&id, &params).await
        }
        DocumentCommand::Delete { id } => documents.delete(&id).await,
    }
}

async fn handle_project(
    client: &DocumentCloudClient,
    command: ProjectCommand,
) -> documentcloud::Result<ApiResponse> {
    let projects = client.projects();

    match command {
        ProjectCommand::Create {
            title,
            description,
            document_ids,
        } => {
            let params = ProjectParams {
                description,
                document_ids: non_empty(document_ids),
            };
            projects.create(&title, &params).await
        }
        ProjectCommand::List => projects.list().await,
        ProjectCommand::Update {
            id,
            title,
            description,
            document_ids,
        } => {
            let params = ProjectUpdateParams {
                title,
                description,
                document_ids: non_empty(document_ids),
            };
            projects.update(id, &params).await
        }
        ProjectCommand::Delete { id } => projects.delete(id).await,
    }
}

fn data_map(pairs: Vec<(String, String)>) -> Option<BTreeMap<String, String>> {
    if pairs.is_empty() {
        None
    } else {
        Some(pairs.into_iter().collect())
    }
}

fn non_empty(ids: Vec<String>) -> Option<Vec<String>> {
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

fn output(response: &ApiResponse, json: bool) -> documentcloud::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", response.pretty_print());
    }
    Ok(())
}
