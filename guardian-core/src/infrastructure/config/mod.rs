// guardian-core/src/infrastructure/config/mod.rs

pub mod project;
pub mod schema;

pub use project::{load_project_config, load_settings};
pub use schema::{ColumnSchema, ModelSchema, SchemaFile, TestDefinition, find_schema_files};
