// guardian-core/src/infrastructure/artifacts/manifest.rs
//
// Parses dbt's target/manifest.json into the domain Manifest.
// Only the handful of fields the analyzer needs are read; everything is
// optional and defaults to empty so that older or newer dbt versions load.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::ports::ManifestLoader;
use crate::domain::project::{Column, Manifest, ManifestMetadata, Model, Source, TestNode};
use crate::infrastructure::error::InfrastructureError;

const KNOWN_TEST_TYPES: [&str; 4] = ["not_null", "unique", "accepted_values", "relationships"];

// =============================================================================
//  1. RAW ARTIFACT SHAPE
// =============================================================================

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawManifest {
    nodes: HashMap<String, RawNode>,
    sources: HashMap<String, RawSource>,
    metadata: RawMetadata,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawMetadata {
    dbt_version: Option<String>,
    generated_at: Option<String>,
    project_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawNode {
    resource_type: String,
    name: String,
    schema: String,
    database: Option<String>,
    alias: Option<String>,
    description: Option<String>,
    columns: HashMap<String, RawColumn>,
    depends_on: RawDependsOn,
    tags: Vec<String>,
    config: RawNodeConfig,
    #[serde(alias = "compiled_code")]
    compiled_sql: Option<String>,

    // --- test nodes only ---
    test_metadata: Option<RawTestMetadata>,
    column_name: Option<String>,
    attached_node: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawColumn {
    description: Option<String>,
    data_type: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(alias = "data_tests")]
    tests: Vec<serde_json::Value>,
    tags: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawDependsOn {
    nodes: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawNodeConfig {
    materialized: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawTestMetadata {
    name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawSource {
    name: String,
    source_name: String,
    schema: String,
}

// =============================================================================
//  2. PARSER
// =============================================================================

pub struct ManifestParser;

impl ManifestLoader for ManifestParser {
    fn load(&self, path: &Path) -> Result<Manifest, DomainError> {
        Self::parse(path).map_err(|e| DomainError::ManifestError(e.to_string()))
    }
}

impl ManifestParser {
    #[instrument]
    pub fn parse(path: &Path) -> Result<Manifest, InfrastructureError> {
        if !path.exists() {
            return Err(InfrastructureError::ArtifactNotFound {
                kind: "manifest.json",
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let manifest = Self::parse_str(&content)?;

        info!(
            models = manifest.models.len(),
            tests = manifest.tests.len(),
            "Manifest loaded"
        );
        Ok(manifest)
    }

    pub fn parse_str(content: &str) -> Result<Manifest, InfrastructureError> {
        let raw: RawManifest = serde_json::from_str(content)?;

        let mut models = HashMap::new();
        let mut tests = HashMap::new();

        for (unique_id, node) in raw.nodes {
            let resource_type = node.resource_type.clone();
            match resource_type.as_str() {
                "model" => {
                    models.insert(unique_id.clone(), Self::to_model(unique_id, node));
                }
                "test" => {
                    tests.insert(unique_id.clone(), Self::to_test(unique_id, node));
                }
                other => debug!(node = %unique_id, resource_type = other, "Skipping node"),
            }
        }

        let sources = raw
            .sources
            .into_iter()
            .map(|(id, s)| {
                (
                    id,
                    Source {
                        name: s.name,
                        source_name: s.source_name,
                        schema: s.schema,
                    },
                )
            })
            .collect();

        let mut manifest = Manifest {
            models,
            tests,
            sources,
            metadata: ManifestMetadata {
                dbt_version: raw.metadata.dbt_version,
                generated_at: raw.metadata.generated_at,
                project_name: raw.metadata.project_name,
            },
        };
        manifest.attach_column_tests();

        Ok(manifest)
    }

    fn to_model(unique_id: String, node: RawNode) -> Model {
        let columns = node
            .columns
            .into_iter()
            .map(|(key, raw)| {
                let column = Column {
                    name: key.clone(),
                    description: raw.description,
                    data_type: raw.data_type.or(raw.type_name),
                    tests: extract_test_names(&raw.tests),
                    tags: raw.tags,
                };
                (key, column)
            })
            .collect();

        Model {
            unique_id,
            name: node.name,
            schema: node.schema,
            database: node.database,
            alias: node.alias,
            description: node.description,
            columns,
            depends_on: node.depends_on.nodes,
            tags: node.tags,
            materialized: node
                .config
                .materialized
                .map(Into::into)
                .unwrap_or_default(),
            compiled_sql: node.compiled_sql,
        }
    }

    fn to_test(unique_id: String, node: RawNode) -> TestNode {
        let test_type = infer_test_type(&node);
        let model = node
            .attached_node
            .clone()
            .or_else(|| node.depends_on.nodes.first().cloned())
            .unwrap_or_default();

        TestNode {
            unique_id,
            name: node.name,
            test_type,
            model,
            column: node.column_name,
            config: node.config.extra,
        }
    }
}

/// `tests:` entries are either a bare name or a single-key mapping
/// (`{accepted_values: {...}}`).
fn extract_test_names(tests: &[serde_json::Value]) -> Vec<String> {
    let mut names = Vec::new();
    for test in tests {
        match test {
            serde_json::Value::String(name) => names.push(name.clone()),
            serde_json::Value::Object(map) => names.extend(map.keys().cloned()),
            _ => {}
        }
    }
    names
}

fn infer_test_type(node: &RawNode) -> String {
    if let Some(name) = node.test_metadata.as_ref().and_then(|m| m.name.clone()) {
        return name;
    }

    let name = node.name.to_lowercase();
    KNOWN_TEST_TYPES
        .iter()
        .find(|t| name.contains(*t))
        .map(|t| t.to_string())
        .unwrap_or_else(|| "custom".to_string())
}
