// guardian-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(guardian::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- ARTIFACTS (JSON) ---
    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(guardian::infra::json),
        help("The dbt artifact looks truncated or was written by an incompatible dbt version.")
    )]
    JsonError(#[from] serde_json::Error),

    #[error("{kind} not found at '{path}'. Run 'dbt compile' or 'dbt run' first.")]
    #[diagnostic(code(guardian::infra::artifact_missing))]
    ArtifactNotFound { kind: &'static str, path: String },

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(guardian::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("dbt_project.yml not found in '{0}'. Is this a dbt project?")]
    #[diagnostic(
        code(guardian::infra::config_missing),
        help("Point the command at the directory containing dbt_project.yml.")
    )]
    ConfigNotFound(String),

    // --- SUGGESTIONS DOCUMENT ---
    #[error("Schema not found: {0}")]
    #[diagnostic(
        code(guardian::infra::schema_missing),
        help("--merge needs an existing schema.yml to merge into.")
    )]
    DocumentNotFound(String),
}
