//! E2E tests using the mock DocumentCloud server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use documentcloud::mock_server::{Fixtures, MockServer};
use documentcloud::{
    Access, ClientConfig, DocumentCloudClient, DocumentUpdateParams, ProjectParams,
    ProjectUpdateParams, SearchParams, UploadParams, UploadSource,
};

fn authenticated_client(server: &MockServer) -> DocumentCloudClient {
    let config = ClientConfig::new()
        .with_credentials(Fixtures::USERNAME, Fixtures::PASSWORD)
        .with_endpoint(&server.api_url())
        .unwrap();
    DocumentCloudClient::new(config).unwrap()
}

fn anonymous_client(server: &MockServer) -> DocumentCloudClient {
    let config = ClientConfig::new().with_endpoint(&server.api_url()).unwrap();
    DocumentCloudClient::new(config).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    server.shutdown().await;

    // After shutdown the client sees a transport error, not a response.
    let result = client.documents().get("1-south-pole-traverse").await;
    assert!(result.is_err());
}

// =============================================================================
// Document Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_search_and_get_workflow() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    let params = SearchParams {
        per_page: Some(1),
        ..Default::default()
    };
    let results = client
        .documents()
        .search("climate", &params)
        .await
        .expect("Failed to search");

    assert_eq!(results.status_code, 200);
    let body = results.response.unwrap();
    assert_eq!(body["total"], 1);
    let id = body["documents"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(id, "2-climate-assessment");

    let document = client.documents().get(&id).await.expect("Failed to get");
    assert_eq!(document.response.unwrap()["document"]["pages"], 841);

    let entities = client
        .documents()
        .entities("1-south-pole-traverse")
        .await
        .unwrap();
    assert_eq!(
        entities.response.unwrap()["entities"]["place"][0]["value"],
        "South Pole"
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_upload_update_delete_workflow() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server);

    // Step 1: Upload from a URL into the fixture project
    let params = UploadParams {
        access: Some(Access::Organization),
        project: Some(1),
        description: Some("Quarterly numbers".to_string()),
        ..Default::default()
    };
    let uploaded = client
        .documents()
        .upload(
            UploadSource::from_input("https://example.com/q3.pdf"),
            "Q3 Report",
            &params,
        )
        .await
        .expect("Failed to upload");

    assert_eq!(uploaded.status_code, 201);
    let body = uploaded.response.unwrap();
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["file_url"], "https://example.com/q3.pdf");
    assert_eq!(body["access"], "organization");

    // Step 2: Update the title, other fields stay
    let update = DocumentUpdateParams {
        title: Some("Q3 Report (final)".to_string()),
        ..Default::default()
    };
    let updated = client.documents().update(&id, &update).await.unwrap();
    let document = &updated.response.unwrap()["document"];
    assert_eq!(document["title"], "Q3 Report (final)");
    assert_eq!(document["description"], "Quarterly numbers");

    // Step 3: Delete, then the document is gone
    let deleted = client.documents().delete(&id).await.unwrap();
    assert_eq!(deleted.status_code, 204);
    assert!(deleted.response.is_none());

    let missing = client.documents().get(&id).await.unwrap();
    assert_eq!(missing.status_code, 404);

    server.shutdown().await;
}

#[tokio::test]
async fn test_multipart_upload_from_memory() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server);

    let uploaded = client
        .documents()
        .upload(
            UploadSource::bytes(b"%PDF-1.4 test".to_vec(), "memo.pdf"),
            "Memo",
            &UploadParams::default(),
        )
        .await
        .unwrap();

    assert_eq!(uploaded.status_code, 201);
    let body = uploaded.response.unwrap();
    assert_eq!(body["file_size"], 13);
    assert_eq!(body["access"], "private");

    server.shutdown().await;
}

// =============================================================================
// Project Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_project_lifecycle_with_full_replace() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server);
    let projects = client.projects();

    // Step 1: Create
    let params = ProjectParams {
        description: Some("Budget documents".to_string()),
        document_ids: Some(vec!["3-city-budget".to_string()]),
    };
    let created = projects.create("Budgets", &params).await.unwrap();
    assert_eq!(created.status_code, 201);
    let id = created.response.unwrap()["project"]["id"].as_u64().unwrap();

    // Step 2: Listed alongside the fixture project
    let listed = projects.list().await.unwrap();
    assert_eq!(
        listed.response.unwrap()["projects"].as_array().unwrap().len(),
        2
    );

    // Step 3: Update with only a title clears the rest
    let update = ProjectUpdateParams {
        title: Some("City budgets".to_string()),
        ..Default::default()
    };
    let updated = projects.update(id, &update).await.unwrap();
    let project = &updated.response.unwrap()["project"];
    assert_eq!(project["title"], "City budgets");
    assert!(project["description"].is_null());
    assert_eq!(project["document_ids"].as_array().unwrap().len(), 0);

    // Step 4: Delete leaves the documents alone
    let deleted = projects.delete(id).await.unwrap();
    assert_eq!(deleted.status_code, 204);

    let document = client.documents().get("3-city-budget").await.unwrap();
    assert_eq!(document.status_code, 200);

    server.shutdown().await;
}

#[tokio::test]
async fn test_wrong_password_gets_401_response() {
    let server = MockServer::start().await;
    let config = ClientConfig::new()
        .with_credentials(Fixtures::USERNAME, "wrong-password")
        .with_endpoint(&server.api_url())
        .unwrap();
    let client = DocumentCloudClient::new(config).unwrap();

    let result = client
        .projects()
        .create("Nope", &ProjectParams::default())
        .await
        .unwrap();

    assert_eq!(result.status_code, 401);
    assert_eq!(result.response.unwrap()["error"], "Authentication required");

    server.shutdown().await;
}
