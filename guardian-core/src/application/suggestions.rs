// guardian-core/src/application/suggestions.rs
//
// Turns coverage gaps into a dbt properties document (schema.yml), either
// from scratch or merged into a file the team already maintains.

use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::domain::coverage::{CheckKind, ColumnGap, CoverageReport};
use crate::error::GuardianError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

const DESCRIPTION_PREFIX: &str = "[AUTO] ";
const ACCEPTED_VALUES_PLACEHOLDER: &str = "TODO: Add valid values";
const PARENT_PLACEHOLDER: &str = "TODO_parent_model";
const PARENT_FIELD: &str = "id";

// =============================================================================
//  1. DOCUMENT SHAPE
// =============================================================================

#[derive(Debug, Serialize)]
struct SchemaDocument {
    version: u32,
    models: Vec<ModelEntry>,
}

#[derive(Debug, Serialize)]
struct ModelEntry {
    name: String,
    columns: Vec<ColumnEntry>,
}

#[derive(Debug, Serialize)]
struct ColumnEntry {
    name: String,
    description: String,
    tests: Vec<TestEntry>,
}

/// One item of a `tests:` list. Serializes to `- not_null` or to a
/// single-key mapping such as `- relationships: {...}`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
enum TestEntry {
    Bare(&'static str),
    AcceptedValues { accepted_values: AcceptedValuesArgs },
    Relationships { relationships: RelationshipArgs },
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct AcceptedValuesArgs {
    values: Vec<String>,
    config: TestConfig,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct RelationshipArgs {
    to: String,
    field: &'static str,
    config: TestConfig,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
struct TestConfig {
    severity: &'static str,
}

impl TestConfig {
    fn warn() -> Self {
        Self { severity: "warn" }
    }
}

impl TestEntry {
    fn for_check(kind: CheckKind, gap: &ColumnGap) -> Self {
        match kind {
            CheckKind::NotNull | CheckKind::Unique => TestEntry::Bare(kind.as_str()),
            CheckKind::AcceptedValues => TestEntry::AcceptedValues {
                accepted_values: AcceptedValuesArgs {
                    values: vec![ACCEPTED_VALUES_PLACEHOLDER.to_string()],
                    config: TestConfig::warn(),
                },
            },
            CheckKind::Relationships => {
                let parent = gap
                    .inferred_parent_table
                    .as_deref()
                    .unwrap_or(PARENT_PLACEHOLDER);
                TestEntry::Relationships {
                    relationships: RelationshipArgs {
                        to: format!("ref('{}')", parent),
                        field: PARENT_FIELD,
                        config: TestConfig::warn(),
                    },
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TestEntry::Bare(name) => *name,
            TestEntry::AcceptedValues { .. } => CheckKind::AcceptedValues.as_str(),
            TestEntry::Relationships { .. } => CheckKind::Relationships.as_str(),
        }
    }
}

impl ColumnEntry {
    fn from_gap(gap: &ColumnGap) -> Self {
        Self {
            name: gap.column_name.clone(),
            description: format!("{}{}", DESCRIPTION_PREFIX, gap.rationale),
            tests: test_entries(gap),
        }
    }
}

fn test_entries(gap: &ColumnGap) -> Vec<TestEntry> {
    gap.suggested_tests
        .iter()
        .map(|kind| TestEntry::for_check(*kind, gap))
        .collect()
}

// =============================================================================
//  2. GENERATOR
// =============================================================================

pub struct SuggestionGenerator;

impl SuggestionGenerator {
    /// Renders the gaps with `priority <= threshold` as a fresh document.
    /// Written atomically to `output` when given.
    #[instrument(skip(report), fields(gaps = report.gaps.len()))]
    pub fn generate(
        report: &CoverageReport,
        threshold: u8,
        output: Option<&Path>,
    ) -> Result<String, GuardianError> {
        let document = Self::build_document(report, threshold);
        let body = serde_yaml::to_string(&document).map_err(InfrastructureError::from)?;
        let content = format!("{}\n{}", Self::header(report, threshold), body);

        Self::persist(&content, output)?;
        info!(models = document.models.len(), "Suggestions rendered");
        Ok(content)
    }

    /// Merges the gaps into an existing document. Nothing already present
    /// is removed, reordered or re-described; only missing models, columns
    /// and checks are appended.
    #[instrument(skip(report), fields(gaps = report.gaps.len()))]
    pub fn generate_incremental(
        report: &CoverageReport,
        existing: &Path,
        threshold: u8,
        output: Option<&Path>,
    ) -> Result<String, GuardianError> {
        if !existing.exists() {
            return Err(InfrastructureError::DocumentNotFound(existing.display().to_string()).into());
        }

        let raw = fs::read_to_string(existing)?;
        let mut document: Value = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(&raw).map_err(InfrastructureError::from)?
        };

        let Some(models) = document.get_mut("models").and_then(Value::as_sequence_mut) else {
            info!(path = ?existing, "No models list to merge into, generating from scratch");
            return Self::generate(report, threshold, output);
        };

        let mut added = 0;
        for gap in report.gaps_at(threshold) {
            added += merge_gap(models, gap)?;
        }

        let body = serde_yaml::to_string(&document).map_err(InfrastructureError::from)?;
        let content = format!("{}\n{}", Self::header(report, threshold), body);

        Self::persist(&content, output)?;
        info!(checks_added = added, "Suggestions merged");
        Ok(content)
    }

    fn build_document(report: &CoverageReport, threshold: u8) -> SchemaDocument {
        let mut by_model: BTreeMap<&str, Vec<&ColumnGap>> = BTreeMap::new();
        for gap in report.gaps_at(threshold) {
            by_model.entry(gap.model_name.as_str()).or_default().push(gap);
        }

        let models = by_model
            .into_iter()
            .filter_map(|(model_name, mut gaps)| {
                // Same-named models (versioned models) can yield one gap per
                // version: keep a single entry per column, most urgent first.
                gaps.sort_by(|a, b| {
                    (&a.column_name, a.priority, &a.suggested_tests).cmp(&(
                        &b.column_name,
                        b.priority,
                        &b.suggested_tests,
                    ))
                });
                gaps.dedup_by(|a, b| a.column_name == b.column_name);

                let columns: Vec<ColumnEntry> = gaps
                    .into_iter()
                    .map(ColumnEntry::from_gap)
                    .filter(|column| !column.tests.is_empty())
                    .collect();

                (!columns.is_empty()).then(|| ModelEntry {
                    name: model_name.to_string(),
                    columns,
                })
            })
            .collect();

        SchemaDocument { version: 2, models }
    }

    fn header(report: &CoverageReport, threshold: u8) -> String {
        let shown = report.gaps_at(threshold).len();
        [
            "# dbt Guardian - Test Coverage Suggestions".to_string(),
            "#".to_string(),
            format!(
                "# Coverage: {:.1}% ({}/{} columns)",
                report.coverage_percentage, report.tested_columns, report.total_columns
            ),
            format!("# Models analyzed: {}", report.total_models),
            format!(
                "# Gaps found: {} ({} with priority <= {})",
                report.gaps.len(),
                shown,
                threshold
            ),
            "#".to_string(),
            "# Generated suggestions. Review and customize before use.".to_string(),
            "# - For 'accepted_values', replace TODO with actual valid values".to_string(),
            "# - For 'relationships', parent tables are auto-inferred (e.g., user_id -> users)"
                .to_string(),
            "#   Verify the inferred parent model and field are correct".to_string(),
            "# - Remove [AUTO] prefix from descriptions and add domain context".to_string(),
        ]
        .join("\n")
    }

    fn persist(content: &str, output: Option<&Path>) -> Result<(), GuardianError> {
        if let Some(path) = output {
            atomic_write(path, content)?;
            info!(path = ?path, "Suggestions written");
        }
        Ok(())
    }
}

// =============================================================================
//  3. TREE MERGE
// =============================================================================

/// Applies one gap to the `models` list. Returns the number of checks added.
fn merge_gap(models: &mut Vec<Value>, gap: &ColumnGap) -> Result<usize, GuardianError> {
    let model = match find_named(models, &gap.model_name) {
        Some(index) => &mut models[index],
        None => {
            let mut entry = serde_yaml::Mapping::new();
            entry.insert(Value::from("name"), Value::from(gap.model_name.as_str()));
            entry.insert(Value::from("columns"), Value::Sequence(Vec::new()));
            models.push(Value::Mapping(entry));
            let last = models.len() - 1;
            &mut models[last]
        }
    };

    let Some(columns) = list_field(model, "columns") else {
        warn!(model = %gap.model_name, "'columns' is not a list, skipping");
        return Ok(0);
    };

    let Some(index) = find_named(columns, &gap.column_name) else {
        let column = ColumnEntry::from_gap(gap);
        let added = column.tests.len();
        columns.push(serde_yaml::to_value(&column).map_err(InfrastructureError::from)?);
        return Ok(added);
    };

    let column = &mut columns[index];
    // Respect whichever key the author used
    let key = if column.get("tests").is_none() && column.get("data_tests").is_some() {
        "data_tests"
    } else {
        "tests"
    };
    let Some(tests) = list_field(column, key) else {
        warn!(
            model = %gap.model_name,
            column = %gap.column_name,
            "'{}' is not a list, skipping", key
        );
        return Ok(0);
    };

    let present = extract_test_names(tests);
    let mut added = 0;
    for entry in test_entries(gap) {
        if !present.iter().any(|name| name == entry.name()) {
            tests.push(serde_yaml::to_value(&entry).map_err(InfrastructureError::from)?);
            added += 1;
        }
    }
    Ok(added)
}

fn find_named(entries: &[Value], name: &str) -> Option<usize> {
    entries
        .iter()
        .position(|entry| entry.get("name").and_then(Value::as_str) == Some(name))
}

/// The list under `key`, created when absent or null. `None` for any other
/// shape (or when `node` is not a mapping).
fn list_field<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Vec<Value>> {
    let map = node.as_mapping_mut()?;
    if map.get(key).is_none_or(Value::is_null) {
        map.insert(Value::from(key), Value::Sequence(Vec::new()));
    }
    map.get_mut(key).and_then(Value::as_sequence_mut)
}

/// Check identifiers of a `tests:` list: bare strings and mapping keys.
fn extract_test_names(tests: &[Value]) -> Vec<String> {
    tests
        .iter()
        .flat_map(|test| match test {
            Value::String(name) => vec![name.clone()],
            Value::Mapping(map) => map
                .keys()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}
