// guardian-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `dbt_project.yml`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DbtProjectConfig {
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub profile: Option<String>,

    #[serde(rename = "model-paths", default = "default_model_paths")]
    pub model_paths: Vec<String>,

    #[serde(rename = "test-paths", default = "default_test_paths")]
    pub test_paths: Vec<String>,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(default)]
    pub vars: HashMap<String, serde_yaml::Value>,

    #[serde(default)]
    pub models: HashMap<String, serde_yaml::Value>,
}

/// Optional `guardian.yml` at the project root. CLI flags take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GuardianSettings {
    #[serde(default = "default_priority_threshold")]
    pub priority_threshold: u8,

    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_top_gaps")]
    pub top_gaps: usize,
}

impl Default for GuardianSettings {
    fn default() -> Self {
        Self {
            priority_threshold: default_priority_threshold(),
            output: default_output(),
            top_gaps: default_top_gaps(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}
fn default_model_paths() -> Vec<String> {
    vec!["models".to_string()]
}
fn default_test_paths() -> Vec<String> {
    vec!["tests".to_string()]
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_priority_threshold() -> u8 {
    3
}
fn default_output() -> String {
    "schema_suggestions.yml".to_string()
}
fn default_top_gaps() -> usize {
    20
}
