// guardian-core/src/infrastructure/artifacts/catalog.rs
//
// Parses dbt's target/catalog.json (written by `dbt docs generate`).
// The catalog carries the warehouse's view of each relation: actual column
// types, row counts, sizes.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::ports::CatalogLoader;
use crate::domain::project::{Catalog, CatalogColumn, CatalogTable};
use crate::infrastructure::error::InfrastructureError;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawCatalog {
    nodes: HashMap<String, RawTable>,
    sources: HashMap<String, RawTable>,
    metadata: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawTable {
    metadata: RawTableMetadata,
    columns: HashMap<String, RawColumn>,
    stats: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawTableMetadata {
    name: String,
    schema: String,
    database: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawColumn {
    name: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<String>,
    index: Option<u32>,
    comment: Option<String>,
}

pub struct CatalogParser;

impl CatalogLoader for CatalogParser {
    fn load(&self, path: &Path) -> Result<Catalog, DomainError> {
        Self::parse(path).map_err(|e| DomainError::CatalogError(e.to_string()))
    }
}

impl CatalogParser {
    #[instrument]
    pub fn parse(path: &Path) -> Result<Catalog, InfrastructureError> {
        if !path.exists() {
            return Err(InfrastructureError::ArtifactNotFound {
                kind: "catalog.json",
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let catalog = Self::parse_str(&content)?;

        info!(tables = catalog.tables.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn parse_str(content: &str) -> Result<Catalog, InfrastructureError> {
        let raw: RawCatalog = serde_json::from_str(content)?;

        // Models and sources share one id space (model.x.y / source.x.y)
        let tables = raw
            .nodes
            .into_iter()
            .chain(raw.sources)
            .map(|(unique_id, table)| {
                let parsed = Self::to_table(unique_id.clone(), table);
                (unique_id, parsed)
            })
            .collect();

        Ok(Catalog {
            tables,
            metadata: raw.metadata,
        })
    }

    fn to_table(unique_id: String, raw: RawTable) -> CatalogTable {
        let columns = raw
            .columns
            .into_iter()
            .map(|(key, col)| {
                let column = CatalogColumn {
                    name: col.name.unwrap_or_else(|| key.clone()),
                    data_type: col.type_name.unwrap_or_else(|| "unknown".to_string()),
                    index: col.index.unwrap_or(0),
                    comment: col.comment,
                };
                (key, column)
            })
            .collect();

        CatalogTable {
            unique_id,
            name: raw.metadata.name,
            schema: raw.metadata.schema,
            database: raw.metadata.database,
            columns,
            stats: raw.stats,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    const CATALOG: &str = r#"
    {
        "metadata": { "dbt_version": "1.7.4" },
        "nodes": {
            "model.jaffle_shop.orders": {
                "metadata": { "name": "orders", "schema": "analytics", "database": "warehouse", "type": "BASE TABLE" },
                "columns": {
                    "ORDER_ID": { "name": "ORDER_ID", "type": "NUMBER", "index": 1, "comment": null },
                    "STATUS": { "type": "TEXT" },
                    "AMOUNT": { "name": "AMOUNT" }
                },
                "stats": { "row_count": { "id": "row_count", "value": 99, "include": true } }
            }
        },
        "sources": {
            "source.jaffle_shop.raw.payments": {
                "metadata": { "name": "payments", "schema": "raw" },
                "columns": {}
            }
        }
    }
    "#;

    #[test]
    fn test_parse_nodes_and_sources() -> Result<()> {
        let catalog = CatalogParser::parse_str(CATALOG)?;
        assert_eq!(catalog.tables.len(), 2);

        let orders = &catalog.tables["model.jaffle_shop.orders"];
        assert_eq!(orders.name, "orders");
        assert_eq!(orders.database.as_deref(), Some("warehouse"));
        assert!(orders.stats.contains_key("row_count"));

        let payments = &catalog.tables["source.jaffle_shop.raw.payments"];
        assert_eq!(payments.schema, "raw");
        assert_eq!(payments.database, None);
        Ok(())
    }

    #[test]
    fn test_column_defaults() -> Result<()> {
        let catalog = CatalogParser::parse_str(CATALOG)?;
        let columns = &catalog.tables["model.jaffle_shop.orders"].columns;

        assert_eq!(columns["ORDER_ID"].data_type, "NUMBER");
        assert_eq!(columns["ORDER_ID"].index, 1);
        // name falls back to the key
        assert_eq!(columns["STATUS"].name, "STATUS");
        // type falls back to "unknown"
        assert_eq!(columns["AMOUNT"].data_type, "unknown");
        assert_eq!(columns["AMOUNT"].index, 0);
        Ok(())
    }

    #[test]
    fn test_parse_from_disk() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(CATALOG.as_bytes())?;

        let catalog = CatalogParser.load(file.path())?;
        assert_eq!(catalog.tables.len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_catalog() {
        let err = CatalogParser
            .load(Path::new("/nonexistent/catalog.json"))
            .expect_err("should fail");
        assert!(matches!(err, DomainError::CatalogError(_)));
    }
}
