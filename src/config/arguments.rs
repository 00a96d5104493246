//! Generation toggles and their precedence
//!
//! Layers, lowest to highest: built-in defaults, environment file, the
//! config document's `arguments` block, explicit call-site values. The
//! layers are stacked with the `config` crate.

use super::resolve::{add_layer, build_layers};
use crate::error::{GenError, Result};
use config::{Config, Environment};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

static LANGUAGE_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:auto|[a-z]{2,3}(?:-[a-z]{2,4})?)$").expect("language code pattern is valid")
});

/// Resolved toggles for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentsConfig {
    pub database_url: Option<String>,
    pub table_name: Option<String>,
    pub output_path: Option<PathBuf>,
    /// Name the classes `Model` and `Form`
    pub default_rename: bool,
    pub only_model: bool,
    pub only_form: bool,
    pub classic_sqlalchemy: bool,
    /// Indent with tabs instead of four spaces
    pub tab: bool,
    /// Target language for form labels
    pub translate_labels: Option<String>,
    pub label_original_language: String,
    pub log_mode: bool,
    /// Submit button text; no submit field when absent
    pub submit: Option<String>,
}

impl Default for ArgumentsConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            table_name: None,
            output_path: None,
            default_rename: false,
            only_model: false,
            only_form: false,
            classic_sqlalchemy: false,
            tab: false,
            translate_labels: None,
            label_original_language: "en".to_string(),
            log_mode: false,
            submit: None,
        }
    }
}

/// One layer of argument values; `None` leaves the lower layer in place
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentOverrides {
    #[serde(alias = "database", skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(alias = "output", skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_rename: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_model: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_form: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classic_sqlalchemy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_original_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<String>,
}

impl ArgumentOverrides {
    /// Read the `arguments` block of a config document
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| GenError::shape("arguments", e))
    }

    /// Read `KEY=value` pairs from an environment file
    ///
    /// Keys are matched case-insensitively; `true`/`1`/`yes`/`on` and
    /// `false`/`0`/`no`/`off` are accepted for boolean keys. Keys that are not
    /// arguments are ignored.
    pub fn from_env_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.as_ref().to_lowercase(), value.into()))
            .collect();
        Config::builder()
            .add_source(Environment::default().source(Some(vars)))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| GenError::InvalidArguments(format!("environment file: {}", e)))
    }
}

impl ArgumentsConfig {
    /// Stack the layers over the defaults and validate the result
    pub fn resolve(layers: &[&ArgumentOverrides]) -> Result<Self> {
        let mut builder = add_layer(Config::builder(), "arguments", &Self::default())?;
        for layer in layers {
            builder = add_layer(builder, "arguments", *layer)?;
        }
        let args: Self = build_layers(builder, "arguments")?;
        args.validate()?;
        Ok(args)
    }

    /// Reject contradictory or malformed toggles
    pub fn validate(&self) -> Result<()> {
        if self.only_model && self.only_form {
            return Err(GenError::InvalidArguments(
                "only_model and only_form are mutually exclusive".to_string(),
            ));
        }
        if let Some(target) = &self.translate_labels {
            check_language(target)?;
        }
        check_language(&self.label_original_language)
    }

    /// Log toggles that have no effect in this combination
    pub fn warn_meaningless(&self) {
        let custom_origin = self.label_original_language != "en";
        if (custom_origin && self.translate_labels.is_none()) || (self.only_model && custom_origin) {
            log::warn!("label_original_language is meaningless here");
        }
        if self.only_model && self.translate_labels.is_some() {
            log::warn!("translate_labels is meaningless with only_model");
        }
        if self.only_model && self.submit.is_some() {
            log::warn!("submit is meaningless with only_model");
        }
    }

    /// Database URL and table name, both required to run
    pub fn require_target(&self) -> Result<(&str, &str)> {
        let database_url = self
            .database_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GenError::InvalidArguments("database_url is required".to_string()))?;
        let table_name = self
            .table_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GenError::InvalidArguments("table_name is required".to_string()))?;
        Ok((database_url, table_name))
    }

    pub fn wants_model(&self) -> bool {
        !self.only_form
    }

    pub fn wants_form(&self) -> bool {
        !self.only_model
    }

    /// Explicit output path, or `<table>.py` / `<table>_model.py` / `<table>_form.py`
    pub fn output_path_for(&self, table_name: &str) -> PathBuf {
        if let Some(path) = &self.output_path {
            return path.clone();
        }
        let suffix = if self.only_model {
            "_model"
        } else if self.only_form {
            "_form"
        } else {
            ""
        };
        PathBuf::from(format!("{}{}.py", table_name, suffix))
    }

    /// Target language when labels need translating, `None` for the identity case
    pub fn translation_target(&self) -> Option<&str> {
        self.translate_labels
            .as_deref()
            .filter(|target| !target.eq_ignore_ascii_case(&self.label_original_language))
    }
}

fn check_language(code: &str) -> Result<()> {
    if LANGUAGE_CODE.is_match(code) {
        Ok(())
    } else {
        Err(GenError::InvalidArguments(format!(
            "language code '{}' is not supported",
            code
        )))
    }
}
