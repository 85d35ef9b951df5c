//! Schema metadata document model and loader.
//!
//! The document is fetched by the host as JSON and handed to
//! [`ErdDocument::from_json`]. The parsed graph is immutable for the
//! lifetime of the view; all interaction state lives elsewhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid ERD document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no schema data found in document")]
    NoSchemas,
}

/// Composite `schema.table` identifier, unique across all schemas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TableKey(String);

impl TableKey {
    pub fn new(schema: &str, table: &str) -> Self {
        Self(format!("{schema}.{table}"))
    }

    /// Wrap an already-composed `schema.table` string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite `schema.table.column` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnKey(String);

impl ColumnKey {
    pub fn new(schema: &str, table: &str, column: &str) -> Self {
        Self(format!("{schema}.{table}.{column}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErdDocument {
    #[serde(default)]
    pub schemas: Vec<Schema>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub is_primary_key: bool,
}

/// Directed foreign-key edge: source is the referencing side, target the
/// referenced side. `name` is unique among rendered relationships.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub name: String,
    pub source_schema: String,
    pub source_table: String,
    pub source_column: String,
    pub target_schema: String,
    pub target_table: String,
    pub target_column: String,
}

impl Relationship {
    pub fn source_key(&self) -> TableKey {
        TableKey::new(&self.source_schema, &self.source_table)
    }

    pub fn target_key(&self) -> TableKey {
        TableKey::new(&self.target_schema, &self.target_table)
    }
}

impl ErdDocument {
    /// Parse the metadata document. An empty or missing `schemas` array is
    /// reported separately from malformed JSON so the host can render a
    /// distinct "no data" state.
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        let doc: ErdDocument = serde_json::from_str(input)?;
        if doc.schemas.is_empty() {
            return Err(DocumentError::NoSchemas);
        }
        log::debug!(
            "loaded ERD document: {} schemas, {} relationships",
            doc.schemas.len(),
            doc.relationships.len()
        );
        Ok(doc)
    }

    pub fn table(&self, schema: &str, table: &str) -> Option<&Table> {
        self.schemas
            .iter()
            .find(|s| s.name == schema)?
            .tables
            .iter()
            .find(|t| t.name == table)
    }

    /// Row index of a column within its table, 0 when unknown. Connector
    /// anchors fall back to the first row rather than failing.
    pub fn column_row(&self, schema: &str, table: &str, column: &str) -> usize {
        self.table(schema, table)
            .and_then(|t| t.columns.iter().position(|c| c.name == column))
            .unwrap_or(0)
    }

    /// Whether a column is the referencing side of any relationship.
    pub fn is_foreign_key(&self, schema: &str, table: &str, column: &str) -> bool {
        self.relationships.iter().any(|r| {
            r.source_schema == schema && r.source_table == table && r.source_column == column
        })
    }

    /// Whether a column is referenced by any relationship.
    pub fn is_referenced(&self, schema: &str, table: &str, column: &str) -> bool {
        self.relationships.iter().any(|r| {
            r.target_schema == schema && r.target_table == table && r.target_column == column
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_document() -> ErdDocument {
    ErdDocument::from_json(
        r#"{
            "schemas": [
                {
                    "name": "sales",
                    "tables": [
                        {
                            "name": "customers",
                            "columns": [
                                {"name": "id", "dataType": "integer", "nullable": false, "isPrimaryKey": true},
                                {"name": "email", "dataType": "varchar", "maxLength": 255, "nullable": false, "isPrimaryKey": false}
                            ]
                        },
                        {
                            "name": "orders",
                            "columns": [
                                {"name": "id", "dataType": "integer", "nullable": false, "isPrimaryKey": true},
                                {"name": "customer_id", "dataType": "integer", "nullable": false, "isPrimaryKey": false},
                                {"name": "placed_at", "dataType": "timestamp", "nullable": true, "isPrimaryKey": false}
                            ]
                        }
                    ]
                },
                {
                    "name": "billing",
                    "tables": [
                        {
                            "name": "invoices",
                            "columns": [
                                {"name": "id", "dataType": "integer", "nullable": false, "isPrimaryKey": true},
                                {"name": "order_id", "dataType": "integer", "nullable": false, "isPrimaryKey": false}
                            ]
                        }
                    ]
                }
            ],
            "relationships": [
                {
                    "name": "fk_orders_customer",
                    "sourceSchema": "sales", "sourceTable": "orders", "sourceColumn": "customer_id",
                    "targetSchema": "sales", "targetTable": "customers", "targetColumn": "id"
                },
                {
                    "name": "fk_invoices_order",
                    "sourceSchema": "billing", "sourceTable": "invoices", "sourceColumn": "order_id",
                    "targetSchema": "sales", "targetTable": "orders", "targetColumn": "id"
                }
            ]
        }"#,
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_document() {
        let doc = sample_document();
        assert_eq!(doc.schemas.len(), 2);
        assert_eq!(doc.relationships.len(), 2);
        let orders = doc.table("sales", "orders").unwrap();
        assert_eq!(orders.columns.len(), 3);
        assert!(orders.columns[0].is_primary_key);
        assert_eq!(orders.columns[2].data_type, "timestamp");
        assert!(orders.columns[2].nullable);
    }

    #[test]
    fn test_empty_schemas_is_distinct_error() {
        let err = ErdDocument::from_json(r#"{"schemas": [], "relationships": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::NoSchemas));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ErdDocument::from_json("{not json").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn test_column_row_lookup() {
        let doc = sample_document();
        assert_eq!(doc.column_row("sales", "orders", "customer_id"), 1);
        // Unknown column falls back to the first row.
        assert_eq!(doc.column_row("sales", "orders", "missing"), 0);
    }

    #[test]
    fn test_foreign_key_flags() {
        let doc = sample_document();
        assert!(doc.is_foreign_key("sales", "orders", "customer_id"));
        assert!(!doc.is_foreign_key("sales", "orders", "id"));
        assert!(doc.is_referenced("sales", "customers", "id"));
        assert!(doc.is_referenced("sales", "orders", "id"));
    }

    #[test]
    fn test_table_key_display() {
        let key = TableKey::new("sales", "orders");
        assert_eq!(key.as_str(), "sales.orders");
        assert_eq!(key, TableKey::from_raw("sales.orders"));
    }
}
