//! Schema description documents
//!
//! Tables can be described in a JSON or TOML file instead of a live database:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "users",
//!       "columns": [
//!         { "name": "id", "type": "INTEGER", "primary_key": true },
//!         { "name": "email", "type": "VARCHAR(120)", "nullable": false }
//!       ]
//!     }
//!   ]
//! }
//! ```

use super::{ColumnDescriptor, SchemaSource, TableDescriptor};
use crate::error::{GenError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    tables: Vec<TableConfig>,
}

#[derive(Debug, Deserialize)]
struct TableConfig {
    name: String,
    columns: Vec<ColumnConfig>,
}

#[derive(Debug, Deserialize)]
struct ColumnConfig {
    name: String,
    #[serde(rename = "type")]
    type_str: String,
    primary_key: Option<bool>,
    nullable: Option<bool>,
    default: Option<String>,
    length: Option<u32>,
}

/// Tables loaded from a schema description document
#[derive(Debug, Clone)]
pub struct SchemaFile {
    tables: Vec<TableDescriptor>,
}

impl SchemaFile {
    /// Load a `.json` or `.toml` schema description
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GenError::Connection(format!(
                "schema file does not exist: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: SchemaDocument = serde_json::from_str(content)
            .map_err(|e| GenError::Connection(format!("invalid schema document: {}", e)))?;
        Ok(Self::from_document(doc))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let doc: SchemaDocument = toml::from_str(content)
            .map_err(|e| GenError::Connection(format!("invalid schema document: {}", e)))?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: SchemaDocument) -> Self {
        let tables = doc
            .tables
            .into_iter()
            .map(|t| {
                let columns = t.columns.into_iter().map(convert_column).collect();
                TableDescriptor::new(t.name, columns)
            })
            .collect();
        Self { tables }
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }
}

fn convert_column(config: ColumnConfig) -> ColumnDescriptor {
    let mut column = ColumnDescriptor::from_native(config.name, &config.type_str);
    let primary_key = config.primary_key.unwrap_or(false);
    column.primary_key = primary_key;
    column.nullable = config.nullable.unwrap_or(!primary_key);
    column.default = config.default;
    if config.length.is_some() && column.semantic_type.is_string_like() {
        column.max_length = config.length;
    }
    column
}

impl SchemaSource for SchemaFile {
    fn describe_table(&self, table_name: &str) -> Result<TableDescriptor> {
        self.tables
            .iter()
            .find(|t| t.name == table_name)
            .cloned()
            .ok_or_else(|| GenError::TableNotFound(table_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;

    const USERS_TOML: &str = r#"
[[tables]]
name = "users"

[[tables.columns]]
name = "id"
type = "INTEGER"
primary_key = true

[[tables.columns]]
name = "username"
type = "VARCHAR(80)"
nullable = false

[[tables.columns]]
name = "bio"
type = "TEXT"
"#;

    #[test]
    fn test_toml_document_preserves_column_order() {
        let schema = SchemaFile::from_toml_str(USERS_TOML).unwrap();
        let table = schema.describe_table("users").unwrap();
        let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "username", "bio"]);

        let id = &table.columns[0];
        assert!(id.primary_key);
        assert!(!id.nullable);

        let username = &table.columns[1];
        assert_eq!(username.semantic_type, SemanticType::String);
        assert_eq!(username.max_length, Some(80));
        assert!(!username.nullable);

        assert!(table.columns[2].nullable);
    }

    #[test]
    fn test_missing_table_is_reported() {
        let schema = SchemaFile::from_toml_str(USERS_TOML).unwrap();
        let err = schema.describe_table("orders").unwrap_err();
        assert!(matches!(err, GenError::TableNotFound(name) if name == "orders"));
    }

    #[test]
    fn test_explicit_length_overrides_declared_length() {
        let schema = SchemaFile::from_json_str(
            r#"{"tables": [{"name": "t", "columns": [
                {"name": "code", "type": "VARCHAR(10)", "length": 4},
                {"name": "count", "type": "INTEGER", "length": 4}
            ]}]}"#,
        )
        .unwrap();
        let table = schema.describe_table("t").unwrap();
        assert_eq!(table.columns[0].max_length, Some(4));
        assert_eq!(table.columns[1].max_length, None);
    }
}
