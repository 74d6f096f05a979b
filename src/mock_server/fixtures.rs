//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use serde_json::json;

use super::state::{MockDocument, MockProject, MockState};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The default test scenario.
pub struct DefaultScenario {
    pub documents: Vec<MockDocument>,
    pub projects: Vec<MockProject>,
    pub entities: Vec<(String, serde_json::Value)>,
}

impl Fixtures {
    /// Username accepted by servers built from the default scenario.
    pub const USERNAME: &'static str = "reporter@example.com";

    /// Password accepted by servers built from the default scenario.
    pub const PASSWORD: &'static str = "test-password";

    // =========================================================================
    // Document Fixtures
    // =========================================================================

    /// Create a public document with required fields only.
    pub fn document(id: &str, title: &str) -> MockDocument {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        MockDocument {
            id: id.to_string(),
            title: title.to_string(),
            access: "public".to_string(),
            pages: 1,
            source: None,
            description: None,
            language: "eng".to_string(),
            related_article: None,
            published_url: None,
            data: BTreeMap::new(),
            file_url: None,
            file_size: None,
            created_at: created,
            updated_at: created,
        }
    }

    /// Create a document with a source and description.
    pub fn described_document(
        id: &str,
        title: &str,
        source: &str,
        description: &str,
        pages: u32,
    ) -> MockDocument {
        let mut document = Self::document(id, title);
        document.source = Some(source.to_string());
        document.description = Some(description.to_string());
        document.pages = pages;
        document
    }

    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a project holding the given documents.
    pub fn project(id: u64, title: &str, document_ids: &[&str]) -> MockProject {
        MockProject {
            id,
            title: Some(title.to_string()),
            description: None,
            document_ids: document_ids.iter().map(|d| d.to_string()).collect(),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Three documents, one project and entities for the first document.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            documents: vec![
                Self::described_document(
                    "1-south-pole-traverse",
                    "Economic Analysis of the South Pole Traverse",
                    "National Science Foundation",
                    "Cost analysis of the overland supply route",
                    38,
                ),
                Self::described_document(
                    "2-climate-assessment",
                    "National Climate Assessment",
                    "USGCRP",
                    "Climate change impacts in the United States",
                    841,
                ),
                Self::document("3-city-budget", "City Budget 2024"),
            ],
            projects: vec![Self::project(
                1,
                "Polar research",
                &["1-south-pole-traverse"],
            )],
            entities: vec![(
                "1-south-pole-traverse".to_string(),
                json!({
                    "organization": [{ "value": "National Science Foundation", "relevance": 0.9 }],
                    "place": [{ "value": "South Pole", "relevance": 0.8 }]
                }),
            )],
        }
    }

    /// Build server state from a scenario, requiring the fixture credentials.
    pub fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new().with_credentials(Self::USERNAME, Self::PASSWORD);

        for document in scenario.documents {
            state = state.with_document(document);
        }

        for project in scenario.projects {
            state = state.with_project(project);
        }

        for (document_id, entities) in scenario.entities {
            state = state.with_entities(&document_id, entities);
        }

        state
    }
}
