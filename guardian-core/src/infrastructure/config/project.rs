// guardian-core/src/infrastructure/config/project.rs

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::project::{DbtProjectConfig, GuardianSettings};
use crate::infrastructure::error::InfrastructureError;

pub const PROJECT_FILE: &str = "dbt_project.yml";
pub const SETTINGS_FILE: &str = "guardian.yml";

// --- LOADERS ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<DbtProjectConfig, InfrastructureError> {
    let config_path = project_dir.join(PROJECT_FILE);
    if !config_path.exists() {
        return Err(InfrastructureError::ConfigNotFound(
            project_dir.display().to_string(),
        ));
    }
    info!(path = ?config_path, "Loading project configuration");

    let mut config: DbtProjectConfig = load_fragment(&config_path)?;

    // Layering: ENV wins over the file
    // ex: GUARDIAN_TARGET_PATH=/tmp/build guardian analyze .
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Reads `guardian.yml` when present, defaults otherwise.
#[instrument(skip(project_dir))]
pub fn load_settings(project_dir: &Path) -> Result<GuardianSettings, InfrastructureError> {
    let path = project_dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(GuardianSettings::default());
    }

    let settings: GuardianSettings = load_fragment(&path)?;
    if !(1..=5).contains(&settings.priority_threshold) {
        return Err(InfrastructureError::ConfigError(format!(
            "priority_threshold must be between 1 and 5 (got {}) in {:?}",
            settings.priority_threshold, path
        )));
    }

    info!(threshold = settings.priority_threshold, "  ⚙️  Guardian settings loaded");
    Ok(settings)
}

/// Loads a typed YAML fragment from disk.
pub fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(InfrastructureError::from)
}

// --- ENV OVERRIDES ---

pub fn apply_env_overrides(config: &mut DbtProjectConfig) {
    apply_env_overrides_from(config, |key| std::env::var(key).ok());
}

/// Same as [`apply_env_overrides`] with an injectable lookup.
pub fn apply_env_overrides_from<F>(config: &mut DbtProjectConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("GUARDIAN_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup("GUARDIAN_PROFILE") {
        info!(old = ?config.profile, new = ?val, "Overriding profile via ENV");
        config.profile = Some(val);
    }
}
