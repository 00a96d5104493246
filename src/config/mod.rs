//! Generation configuration
//!
//! A [`GenerationConfig`] is built once per invocation by merging a user
//! [`ConfigDocument`] over a [`DefaultConfig`] (see [`resolve`]) and is
//! read-only afterwards. Toggles such as `only_model` or `tab` live in
//! [`ArgumentsConfig`], resolved from their own layers.

pub mod arguments;
pub mod defaults;
pub mod resolve;

use crate::schema::ColumnDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub use arguments::{ArgumentOverrides, ArgumentsConfig};
pub use defaults::DefaultConfig;
pub use resolve::{resolve, ConfigDocument};

/// Settings for the data-model artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub base_class: String,
    #[serde(default)]
    pub imports: Vec<String>,
    /// Lines emitted between the imports and the class, e.g. `db = SQLAlchemy()`
    #[serde(default)]
    pub preamble: Vec<String>,
    /// Column constructor, `db.Column` or `Column`
    pub column_class: String,
    /// Type token used when a column's semantic type has no mapping
    pub fallback_type: String,
    /// Wrapper for SQL expression defaults, `db.text` or `text`
    pub sql_expression: String,
    #[serde(default)]
    pub exclude_columns: BTreeSet<String>,
    /// Also drop whichever column is the primary key
    pub exclude_primary_key: bool,
    /// Semantic type key (`string`, `integer`, ...) to type token
    #[serde(default)]
    pub type_mapping: BTreeMap<String, String>,
}

impl ModelConfig {
    /// Whether a column is left out of both artifacts
    pub fn is_excluded(&self, column: &ColumnDescriptor) -> bool {
        self.exclude_columns.contains(&column.name)
            || (self.exclude_primary_key && column.primary_key)
    }
}

/// Settings for the web-form artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub base_class: String,
    #[serde(default)]
    pub imports: Vec<String>,
    /// Semantic type key to field constructor
    #[serde(default)]
    pub field_mapping: BTreeMap<String, String>,
    /// Validator kind (`required`, `email`, `length`) to rendered expression
    #[serde(default)]
    pub default_validators: BTreeMap<String, String>,
    pub submit_field: String,
    /// Emitted verbatim as a nested `class Meta` block
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

/// Fully resolved configuration consumed by the emitters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: ModelConfig,
    pub form: FormConfig,
}

impl GenerationConfig {
    /// Built-in integrated (Flask-SQLAlchemy) configuration
    pub fn standard() -> Self {
        DefaultConfig::builtin().base(false)
    }

    /// Built-in framework-agnostic SQLAlchemy configuration
    pub fn classic() -> Self {
        DefaultConfig::builtin().base(true)
    }
}

/// Drop repeated import lines, keeping the first occurrence
///
/// Blank lines are kept as-is since they separate import groups.
pub(crate) fn dedup_imports(imports: &mut Vec<String>) {
    let mut seen = BTreeSet::new();
    imports.retain(|line| line.trim().is_empty() || seen.insert(line.trim().to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;

    #[test]
    fn test_dedup_imports_keeps_order_and_blank_lines() {
        let mut imports = vec![
            "import a".to_string(),
            "import b".to_string(),
            "".to_string(),
            "import a".to_string(),
            "".to_string(),
            "x = 1".to_string(),
        ];
        dedup_imports(&mut imports);
        assert_eq!(imports, vec!["import a", "import b", "", "", "x = 1"]);
    }

    #[test]
    fn test_is_excluded_by_name_and_primary_key() {
        let mut model = GenerationConfig::standard().model;
        let id = ColumnDescriptor::new("id", SemanticType::Integer).primary_key();
        let created = ColumnDescriptor::new("created_at", SemanticType::Datetime);
        assert!(!model.is_excluded(&id));
        assert!(model.is_excluded(&created));

        model.exclude_primary_key = true;
        assert!(model.is_excluded(&id));
    }
}
