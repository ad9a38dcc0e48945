// src/infrastructure/config/schema.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::infrastructure::error::InfrastructureError;

pub const SCHEMA_FILE_NAMES: [&str; 2] = ["schema.yml", "schema.yaml"];

// =============================================================================
//  1. DATA CONTRACT
// =============================================================================

/// A dbt properties file (`models/**/schema.yml`).
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SchemaFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    #[serde(default)]
    pub models: Vec<ModelSchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<serde_yaml::Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ModelSchema {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub columns: Vec<ColumnSchema>,

    // dbt >= 1.8 spells it `data_tests`
    #[serde(default, alias = "data_tests")]
    pub tests: Vec<TestDefinition>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ColumnSchema {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, alias = "data_tests")]
    pub tests: Vec<TestDefinition>,
}

/// `- not_null` or `- accepted_values: {values: [...]}`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum TestDefinition {
    Bare(String),
    Configured(BTreeMap<String, serde_yaml::Value>),
}

impl TestDefinition {
    /// The check identifier. A configured entry is a single-key mapping.
    pub fn name(&self) -> Option<&str> {
        match self {
            TestDefinition::Bare(name) => Some(name.as_str()),
            TestDefinition::Configured(map) => map.keys().next().map(String::as_str),
        }
    }
}

impl ModelSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl ColumnSchema {
    pub fn test_names(&self) -> Vec<&str> {
        self.tests.iter().filter_map(TestDefinition::name).collect()
    }
}

// =============================================================================
//  2. IO
// =============================================================================

#[instrument]
pub fn parse_schema_file(path: &Path) -> Result<SchemaFile, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::DocumentNotFound(
            path.display().to_string(),
        ));
    }
    let content = fs::read_to_string(path)?;
    parse_schema_str(&content)
}

pub fn parse_schema_str(content: &str) -> Result<SchemaFile, InfrastructureError> {
    // An empty file deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(SchemaFile::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Every `schema.yml` / `schema.yaml` below `root`, sorted.
pub fn find_schema_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let walker = WalkDir::new(root).follow_links(true);
    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| SCHEMA_FILE_NAMES.contains(&name))
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files.dedup();
    debug!(root = ?root, count = files.len(), "Schema files discovered");
    files
}
