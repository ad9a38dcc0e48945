// guardian-core/src/application/coverage.rs

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::domain::coverage::heuristics::{self, ColumnProfile};
use crate::domain::coverage::{CheckKind, ColumnGap, CoverageReport, infer_parent_table};
use crate::domain::ports::{CatalogLoader, ManifestLoader};
use crate::domain::project::{Catalog, Manifest, Model};
use crate::error::GuardianError;
use crate::infrastructure::config::project::load_project_config;
use crate::infrastructure::error::InfrastructureError;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CATALOG_FILE: &str = "catalog.json";

/// Walks every model column and reports the tests it is missing.
pub struct CoverageAnalyzer;

impl CoverageAnalyzer {
    /// Pure function of its inputs: no I/O, never fails.
    #[instrument(skip_all, fields(models = manifest.models.len(), catalog = catalog.is_some()))]
    pub fn analyze(manifest: &Manifest, catalog: Option<&Catalog>) -> CoverageReport {
        let mut gaps = Vec::new();
        let mut total_columns = 0;
        let mut tested_columns = 0;

        for (model_id, model) in &manifest.models {
            for (column_name, column) in &model.columns {
                total_columns += 1;
                if column.is_tested() {
                    tested_columns += 1;
                }

                // Warehouse type wins over the declared one
                let column_type = catalog
                    .and_then(|c| c.column_type(model_id, column_name))
                    .map(str::to_string)
                    .or_else(|| column.data_type.clone());

                if let Some(gap) =
                    Self::inspect_column(model, column_name, column_type, &column.tests)
                {
                    gaps.push(gap);
                }
            }
        }

        let report = CoverageReport::new(manifest.models.len(), total_columns, tested_columns, gaps);

        info!(
            columns = report.total_columns,
            tested = report.tested_columns,
            gaps = report.gaps.len(),
            "Coverage analyzed"
        );
        report
    }

    fn inspect_column(
        model: &Model,
        column_name: &str,
        column_type: Option<String>,
        existing_tests: &[String],
    ) -> Option<ColumnGap> {
        let profile = ColumnProfile::new(column_name, &model.name);
        let suggested = heuristics::suggest_checks(&profile, existing_tests);
        if suggested.is_empty() {
            return None;
        }

        let inferred_parent_table = if suggested.contains(&CheckKind::Relationships) {
            infer_parent_table(column_name)
        } else {
            None
        };

        Some(ColumnGap {
            model_name: model.name.clone(),
            column_name: column_name.to_string(),
            column_type,
            existing_tests: existing_tests.to_vec(),
            priority: heuristics::priority(&profile),
            rationale: heuristics::rationale(&profile, &suggested),
            suggested_tests: suggested,
            inferred_parent_table,
        })
    }
}

/// Directory holding the dbt artifacts: `target-path` from `dbt_project.yml`
/// (with ENV overrides), `target` when the project file is absent.
pub fn resolve_target_dir(project_dir: &Path) -> Result<PathBuf, GuardianError> {
    match load_project_config(project_dir) {
        Ok(config) => {
            let target = Path::new(&config.target_path);
            if target.is_absolute() {
                Ok(target.to_path_buf())
            } else {
                Ok(project_dir.join(target))
            }
        }
        Err(InfrastructureError::ConfigNotFound(_)) => {
            warn!(path = ?project_dir, "No dbt_project.yml, assuming 'target'");
            Ok(project_dir.join("target"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Loads the artifacts of a compiled dbt project and analyzes them.
/// `manifest.json` is required; `catalog.json` is used when present.
#[instrument(skip(manifest_loader, catalog_loader))]
pub fn analyze_project(
    project_dir: &Path,
    manifest_loader: &dyn ManifestLoader,
    catalog_loader: &dyn CatalogLoader,
) -> Result<CoverageReport, GuardianError> {
    let target_dir = resolve_target_dir(project_dir)?;

    let manifest_path = target_dir.join(MANIFEST_FILE);
    if !manifest_path.exists() {
        return Err(InfrastructureError::ArtifactNotFound {
            kind: MANIFEST_FILE,
            path: manifest_path.display().to_string(),
        }
        .into());
    }
    let manifest = manifest_loader.load(&manifest_path)?;
    info!(path = ?manifest_path, models = manifest.models.len(), "Manifest used");

    let catalog_path = target_dir.join(CATALOG_FILE);
    let catalog = if catalog_path.exists() {
        let catalog = catalog_loader.load(&catalog_path)?;
        info!(path = ?catalog_path, "Catalog used for column types");
        Some(catalog)
    } else {
        info!("No catalog.json, using declared column types");
        None
    };

    Ok(CoverageAnalyzer::analyze(&manifest, catalog.as_ref()))
}
