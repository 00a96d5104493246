//! Table schema descriptions and the sources that produce them
//!
//! Generation never talks to a database directly. A [`SchemaSource`] hands the
//! engine a ready [`TableDescriptor`]; the engine only reads it.

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::error::{GenError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub use file::SchemaFile;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSchema;

/// Closed set of column categories the mapping tables are keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Text,
    Integer,
    Float,
    Boolean,
    Datetime,
    Date,
    Other,
}

static NATIVE_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_ ]+?)\s*(?:\(\s*(\d+)\s*(?:,\s*\d+\s*)?\))?\s*$")
        .expect("native type pattern is valid")
});

impl SemanticType {
    pub const ALL: [SemanticType; 8] = [
        SemanticType::String,
        SemanticType::Text,
        SemanticType::Integer,
        SemanticType::Float,
        SemanticType::Boolean,
        SemanticType::Datetime,
        SemanticType::Date,
        SemanticType::Other,
    ];

    /// Key used in `type_mapping` / `field_mapping` tables
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::String => "string",
            SemanticType::Text => "text",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::Boolean => "boolean",
            SemanticType::Datetime => "datetime",
            SemanticType::Date => "date",
            SemanticType::Other => "other",
        }
    }

    /// Whether a maximum length is meaningful for this type
    pub fn is_string_like(&self) -> bool {
        matches!(self, SemanticType::String | SemanticType::Text)
    }

    /// Classify a native column type name such as `VARCHAR(80)` or `timestamp with time zone`
    ///
    /// Returns the semantic type and, for string-like types, the declared length.
    /// Unrecognized names classify as [`SemanticType::Other`]; this never fails.
    pub fn classify(native: &str) -> (SemanticType, Option<u32>) {
        let (base, length) = match NATIVE_TYPE.captures(native) {
            Some(caps) => (
                caps[1].trim().to_lowercase(),
                caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok()),
            ),
            None => (native.trim().to_lowercase(), None),
        };

        let semantic = if base.starts_with("datetime") || base.starts_with("timestamp") {
            SemanticType::Datetime
        } else if base == "date" {
            SemanticType::Date
        } else if base.starts_with("bool") {
            SemanticType::Boolean
        } else if base == "interval" || base == "point" {
            SemanticType::Other
        } else if base.contains("int") || base.contains("serial") {
            SemanticType::Integer
        } else if base.contains("char") || base == "string" || base.contains("varying") {
            SemanticType::String
        } else if base.contains("text") || base.contains("clob") {
            SemanticType::Text
        } else if base.contains("real")
            || base.contains("floa")
            || base.contains("doub")
            || base == "numeric"
            || base == "decimal"
        {
            SemanticType::Float
        } else {
            SemanticType::Other
        };

        let length = if semantic.is_string_like() { length } else { None };
        (semantic, length)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column as reported by the schema source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Type name as the database spells it, kept for diagnostics
    pub native_type: String,
    pub semantic_type: SemanticType,
    pub nullable: bool,
    pub primary_key: bool,
    /// Raw SQL default expression, if any
    pub default: Option<String>,
    pub max_length: Option<u32>,
}

impl ColumnDescriptor {
    /// Nullable, non-key column with no default
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            native_type: semantic_type.as_str().to_string(),
            semantic_type,
            nullable: true,
            primary_key: false,
            default: None,
            max_length: None,
        }
    }

    /// Build a column from a native type name, classifying it
    pub fn from_native(name: impl Into<String>, native_type: &str) -> Self {
        let (semantic_type, max_length) = SemanticType::classify(native_type);
        Self {
            name: name.into(),
            native_type: native_type.to_string(),
            semantic_type,
            nullable: true,
            primary_key: false,
            default: None,
            max_length,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.max_length = Some(length);
        self
    }
}

/// A table name and its columns in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// First primary-key column, if the table declares one
    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.primary_key)
    }
}

/// Supplies table descriptions to the generator
pub trait SchemaSource {
    /// Describe one table, failing with [`GenError::TableNotFound`] when it does not exist
    fn describe_table(&self, table_name: &str) -> Result<TableDescriptor>;
}

/// Open the schema source a database URL points at
///
/// `sqlite:///path` and bare `.db`/`.sqlite`/`.sqlite3` paths open a SQLite
/// database; `.json` and `.toml` paths (optionally prefixed with `file://`)
/// open a schema description document.
pub fn open_source(database_url: &str) -> Result<Box<dyn SchemaSource>> {
    let url = database_url.trim();
    if url.is_empty() {
        return Err(GenError::InvalidArguments(
            "database_url is required".to_string(),
        ));
    }

    if let Some(path) = url.strip_prefix("file://") {
        return Ok(Box::new(SchemaFile::load(Path::new(path))?));
    }

    if let Some(path) = url.strip_prefix("sqlite:///") {
        return open_sqlite(Path::new(path));
    }

    if url.contains("://") {
        return Err(GenError::Connection(format!(
            "unsupported database URL scheme: {}",
            url
        )));
    }

    let path = Path::new(url);
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") | Some("toml") => Ok(Box::new(SchemaFile::load(path)?)),
        _ => open_sqlite(path),
    }
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: &Path) -> Result<Box<dyn SchemaSource>> {
    Ok(Box::new(SqliteSchema::open(path)?))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(path: &Path) -> Result<Box<dyn SchemaSource>> {
    Err(GenError::Connection(format!(
        "SQLite support is disabled; cannot open {}",
        path.display()
    )))
}
