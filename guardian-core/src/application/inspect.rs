// guardian-core/src/application/inspect.rs

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{instrument, warn};

use crate::error::GuardianError;
use crate::infrastructure::config::project::load_project_config;
use crate::infrastructure::config::schema::{find_schema_files, parse_schema_file};

#[derive(Debug, Serialize, Clone)]
pub struct ProjectSummary {
    pub name: String,
    pub version: String,
    pub profile: Option<String>,
    pub model_paths: Vec<String>,
    pub test_paths: Vec<String>,
    pub target_path: String,
    pub schema_files: Vec<SchemaFileSummary>,
}

#[derive(Debug, Serialize, Clone)]
pub struct SchemaFileSummary {
    /// Relative to the project root when possible
    pub path: PathBuf,
    /// `None` when the file could not be parsed
    pub models: Option<usize>,
}

#[instrument]
pub fn inspect_project(project_dir: &Path) -> Result<ProjectSummary, GuardianError> {
    let config = load_project_config(project_dir)?;

    let mut schema_files = Vec::new();
    for model_path in &config.model_paths {
        for path in find_schema_files(&project_dir.join(model_path)) {
            let models = match parse_schema_file(&path) {
                Ok(schema) => Some(schema.models.len()),
                Err(e) => {
                    warn!(path = ?path, error = %e, "Unreadable schema file");
                    None
                }
            };
            let relative = path.strip_prefix(project_dir).ok().map(Path::to_path_buf);
            let path = relative.unwrap_or(path);
            schema_files.push(SchemaFileSummary { path, models });
        }
    }

    Ok(ProjectSummary {
        name: config.name,
        version: config.version,
        profile: config.profile,
        model_paths: config.model_paths,
        test_paths: config.test_paths,
        target_path: config.target_path,
        schema_files,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::infrastructure::error::InfrastructureError;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_inspect_project() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("dbt_project.yml"),
            "name: jaffle_shop\nversion: '1.2.0'\nprofile: duck\nmodel-paths: [models, snapshots]\n",
        )?;
        let staging = dir.path().join("models").join("staging");
        fs::create_dir_all(&staging)?;
        fs::write(
            staging.join("schema.yml"),
            "version: 2\nmodels:\n  - name: stg_orders\n  - name: stg_customers\n",
        )?;
        fs::write(dir.path().join("models").join("schema.yaml"), "models: [")?;

        let summary = inspect_project(dir.path())?;
        assert_eq!(summary.name, "jaffle_shop");
        assert_eq!(summary.version, "1.2.0");
        assert_eq!(summary.profile.as_deref(), Some("duck"));
        assert_eq!(summary.model_paths, vec!["models", "snapshots"]);
        assert_eq!(summary.schema_files.len(), 2);

        let staging_file = summary
            .schema_files
            .iter()
            .find(|f| f.path.ends_with("staging/schema.yml"))
            .expect("staging schema");
        assert!(staging_file.path.is_relative());
        assert_eq!(staging_file.models, Some(2));

        let broken = summary
            .schema_files
            .iter()
            .find(|f| f.path.ends_with("schema.yaml"))
            .expect("broken schema");
        assert_eq!(broken.models, None);
        Ok(())
    }

    #[test]
    fn test_inspect_not_a_dbt_project() -> Result<()> {
        let dir = tempdir()?;
        let err = inspect_project(dir.path()).expect_err("no project file");

        assert!(matches!(
            err,
            GuardianError::Infrastructure(InfrastructureError::ConfigNotFound(_))
        ));
        assert!(err.to_string().contains("dbt_project.yml not found"));
        Ok(())
    }
}
