// guardian-core/src/domain/project/catalog.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Warehouse metadata (`target/catalog.json`): the observed state of the
/// relations built by dbt. Keyed by the same unique ids as the manifest.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Catalog {
    #[serde(default)]
    pub tables: HashMap<String, CatalogTable>,

    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CatalogTable {
    pub unique_id: String,
    pub name: String,
    pub schema: String,
    pub database: Option<String>,

    #[serde(default)]
    pub columns: HashMap<String, CatalogColumn>,

    /// row_count, bytes... as reported by the adapter
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub index: u32,
    pub comment: Option<String>,
}

impl Catalog {
    /// Observed type of a column. Warehouses often upper-case identifiers,
    /// so the lookup falls back to a case-insensitive match.
    pub fn column_type(&self, table_id: &str, column_name: &str) -> Option<&str> {
        let table = self.tables.get(table_id)?;
        table
            .columns
            .get(column_name)
            .or_else(|| {
                table
                    .columns
                    .values()
                    .find(|c| c.name.eq_ignore_ascii_case(column_name))
            })
            .map(|c| c.data_type.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut columns = HashMap::new();
        columns.insert(
            "USER_ID".to_string(),
            CatalogColumn {
                name: "USER_ID".into(),
                data_type: "NUMBER".into(),
                index: 1,
                comment: None,
            },
        );
        let mut tables = HashMap::new();
        tables.insert(
            "model.shop.orders".to_string(),
            CatalogTable {
                unique_id: "model.shop.orders".into(),
                name: "orders".into(),
                schema: "public".into(),
                columns,
                ..Default::default()
            },
        );
        Catalog {
            tables,
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn test_column_type_lookup() {
        let catalog = catalog();
        assert_eq!(
            catalog.column_type("model.shop.orders", "USER_ID"),
            Some("NUMBER")
        );
        assert_eq!(
            catalog.column_type("model.shop.orders", "user_id"),
            Some("NUMBER")
        );
        assert_eq!(catalog.column_type("model.shop.orders", "status"), None);
        assert_eq!(catalog.column_type("model.shop.users", "user_id"), None);
    }
}
