//! Layering user configuration over the built-in defaults
//!
//! Merge rules: nested tables (`type_mapping`, `field_mapping`,
//! `default_validators`, `meta`) merge key by key; scalars and lists are
//! replaced wholesale when the user sets them.
//!
//! Each layer is handed to a [`config::Config`] builder as a JSON source, so
//! the `config` crate does the stacking and the typed read-back.

use super::{dedup_imports, DefaultConfig, FormConfig, GenerationConfig, ModelConfig};
use crate::error::{GenError, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A parsed user configuration document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| GenError::ConfigParse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| GenError::ConfigParse(e.to_string()))?;
        let value = serde_json::to_value(table).map_err(|e| GenError::ConfigParse(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(GenError::ConfigShape(format!(
                "configuration root must be a table, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// Read a config file, choosing TOML for `.toml` and JSON otherwise
    ///
    /// A path that does not exist yields an empty document and a warning.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!(
                "Configuration file {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::empty());
        }
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// The `arguments` block, if present
    pub fn arguments(&self) -> Option<&Value> {
        self.root.get("arguments")
    }

    fn section(&self, key: &str) -> Result<Option<&Map<String, Value>>> {
        match self.root.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(GenError::ConfigShape(format!(
                "{} must be a table, found {}",
                key,
                kind_of(other)
            ))),
        }
    }
}

/// Merge `fragment` over the defaults and produce the configuration for one invocation
///
/// In classic mode the classic model defaults are the base the fragment is
/// merged over.
pub fn resolve(
    defaults: &DefaultConfig,
    fragment: &ConfigDocument,
    classic: bool,
) -> Result<GenerationConfig> {
    let base = defaults.base(classic);

    for key in fragment.root.keys() {
        if !matches!(key.as_str(), "model" | "form" | "arguments") {
            log::debug!("Ignoring unknown configuration section '{}'", key);
        }
    }

    let model_overlay = fragment.section("model")?;
    let mut model: ModelConfig = merge_section("model", &base.model, model_overlay)?;
    let mut form: FormConfig = merge_section("form", &base.form, fragment.section("form")?)?;

    // A user exclusion list replaces the default one, primary key included
    if model_overlay.is_some_and(|m| {
        m.contains_key("exclude_columns") && !m.contains_key("exclude_primary_key")
    }) {
        model.exclude_primary_key = false;
    }

    dedup_imports(&mut model.imports);
    dedup_imports(&mut form.imports);

    Ok(GenerationConfig { model, form })
}

fn merge_section<T>(key: &str, base: &T, overlay: Option<&Map<String, Value>>) -> Result<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Some(overlay) = overlay else {
        return Ok(base.clone());
    };
    let builder = add_layer(Config::builder(), key, base)?;
    let builder = add_layer(builder, key, overlay)?;
    build_layers(builder, key)
}

/// Push `layer` on top of the builder's existing sources
pub(crate) fn add_layer<T: Serialize + ?Sized>(
    builder: ConfigBuilder<DefaultState>,
    key: &str,
    layer: &T,
) -> Result<ConfigBuilder<DefaultState>> {
    let text = serde_json::to_string(layer).map_err(|e| GenError::shape(key, e))?;
    Ok(builder.add_source(File::from_str(&text, FileFormat::Json)))
}

/// Build the stacked layers and read them back as `T`
pub(crate) fn build_layers<T: DeserializeOwned>(
    builder: ConfigBuilder<DefaultState>,
    key: &str,
) -> Result<T> {
    builder
        .build()
        .and_then(Config::try_deserialize)
        .map_err(|e| GenError::layering(key, e))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}
