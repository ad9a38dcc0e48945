// guardian-core/src/domain/project/manifest.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The Manifest represents the resolved state of a dbt project,
/// as compiled into `target/manifest.json`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Manifest {
    /// Models keyed by their unique id (ex: "model.jaffle_shop.orders")
    #[serde(default)]
    pub models: HashMap<String, Model>,

    /// Test nodes keyed by their unique id
    #[serde(default)]
    pub tests: HashMap<String, TestNode>,

    #[serde(default)]
    pub sources: HashMap<String, Source>,

    #[serde(default)]
    pub metadata: ManifestMetadata,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ManifestMetadata {
    pub dbt_version: Option<String>,
    pub generated_at: Option<String>,
    pub project_name: Option<String>,
}

/// A dbt model (table, view, incremental...).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Model {
    pub unique_id: String,
    pub name: String,
    pub schema: String,
    pub database: Option<String>,
    pub alias: Option<String>,
    pub description: Option<String>,

    #[serde(default)]
    pub columns: HashMap<String, Column>,

    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub materialized: Materialization,

    pub compiled_sql: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Column {
    pub name: String,
    pub description: Option<String>,
    pub data_type: Option<String>,

    /// Names of the checks already declared on the column (not_null, unique...)
    #[serde(default)]
    pub tests: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn with_tests(mut self, tests: &[&str]) -> Self {
        self.tests = tests.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn is_tested(&self) -> bool {
        !self.tests.is_empty()
    }

    pub fn has_test(&self, name: &str) -> bool {
        self.tests.iter().any(|t| t == name)
    }
}

/// A dbt data test node (schema test or singular test).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TestNode {
    pub unique_id: String,
    pub name: String,
    /// not_null, unique, accepted_values, relationships or custom
    pub test_type: String,
    /// Unique id of the model the test applies to (empty when unknown)
    pub model: String,
    pub column: Option<String>,
    #[serde(default)]
    pub config: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Source {
    pub name: String,
    pub source_name: String,
    pub schema: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum Materialization {
    #[default]
    View,
    Table,
    Incremental,
    Ephemeral,
    MaterializedView,
    Other(String),
}

impl Materialization {
    pub fn as_str(&self) -> &str {
        match self {
            Self::View => "view",
            Self::Table => "table",
            Self::Incremental => "incremental",
            Self::Ephemeral => "ephemeral",
            Self::MaterializedView => "materialized_view",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for Materialization {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "view" => Self::View,
            "table" => Self::Table,
            "incremental" => Self::Incremental,
            "ephemeral" => Self::Ephemeral,
            "materialized_view" => Self::MaterializedView,
            _ => Self::Other(kind),
        }
    }
}

impl From<Materialization> for String {
    fn from(kind: Materialization) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for Materialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Manifest {
    /// Folds column-level test nodes into the declared tests of their column.
    ///
    /// Recent dbt versions no longer inline tests inside `columns`; they only
    /// exist as separate `test` nodes pointing at a model and a column name.
    /// Tests targeting an unknown model or column are ignored.
    pub fn attach_column_tests(&mut self) {
        for test in self.tests.values() {
            let Some(column_name) = test.column.as_deref() else {
                continue;
            };
            let Some(model) = self.models.get_mut(&test.model) else {
                continue;
            };

            let key = if model.columns.contains_key(column_name) {
                Some(column_name.to_string())
            } else {
                model
                    .columns
                    .keys()
                    .find(|k| k.eq_ignore_ascii_case(column_name))
                    .cloned()
            };

            if let Some(column) = key.and_then(|k| model.columns.get_mut(&k))
                && !column.has_test(&test.test_type)
            {
                column.tests.push(test.test_type.clone());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn model_with(columns: Vec<Column>) -> Model {
        Model {
            unique_id: "model.shop.orders".into(),
            name: "orders".into(),
            schema: "public".into(),
            columns: columns.into_iter().map(|c| (c.name.clone(), c)).collect(),
            ..Default::default()
        }
    }

    fn test_node(id: &str, test_type: &str, model: &str, column: Option<&str>) -> TestNode {
        TestNode {
            unique_id: id.into(),
            name: id.into(),
            test_type: test_type.into(),
            model: model.into(),
            column: column.map(String::from),
            config: HashMap::new(),
        }
    }

    #[test]
    fn test_attach_column_tests() {
        let mut manifest = Manifest::default();
        manifest.models.insert(
            "model.shop.orders".into(),
            model_with(vec![Column::new("order_id").with_tests(&["unique"])]),
        );
        manifest.tests.insert(
            "t1".into(),
            test_node("t1", "not_null", "model.shop.orders", Some("ORDER_ID")),
        );
        manifest.tests.insert(
            "t2".into(),
            test_node("t2", "unique", "model.shop.orders", Some("order_id")),
        );

        manifest.attach_column_tests();

        let column = &manifest.models["model.shop.orders"].columns["order_id"];
        assert_eq!(column.tests.len(), 2);
        assert!(column.has_test("unique"));
        assert!(column.has_test("not_null"));
    }

    #[test]
    fn test_attach_ignores_unknown_targets() {
        let mut manifest = Manifest::default();
        manifest.models.insert(
            "model.shop.orders".into(),
            model_with(vec![Column::new("status")]),
        );
        manifest.tests.insert(
            "t1".into(),
            test_node("t1", "not_null", "model.shop.missing", Some("status")),
        );
        manifest.tests.insert(
            "t2".into(),
            test_node("t2", "not_null", "model.shop.orders", Some("ghost")),
        );
        manifest.tests.insert(
            "t3".into(),
            test_node("t3", "custom", "model.shop.orders", None),
        );

        manifest.attach_column_tests();

        let orders = &manifest.models["model.shop.orders"];
        assert_eq!(orders.columns.len(), 1);
        assert!(!orders.columns["status"].is_tested());
    }

    #[test]
    fn test_materialization_round_trip_keeps_unknown_kinds() {
        let kind: Materialization = serde_json::from_str("\"snapshot\"").unwrap();
        assert_eq!(kind, Materialization::Other("snapshot".into()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"snapshot\"");

        let table: Materialization = serde_json::from_str("\"table\"").unwrap();
        assert_eq!(table, Materialization::Table);
    }
}
