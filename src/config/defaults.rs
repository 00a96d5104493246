//! Built-in configurations
//!
//! Constructed once per process and passed to [`super::resolve`] explicitly.

use super::{FormConfig, GenerationConfig, ModelConfig};
use std::collections::{BTreeMap, BTreeSet};

/// The two built-in bases a user document is merged over
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultConfig {
    /// Flask-SQLAlchemy model with a Flask-WTF form
    pub standard: GenerationConfig,
    /// Model settings replacing `standard.model` in classic mode
    pub classic_model: ModelConfig,
}

impl DefaultConfig {
    pub fn builtin() -> Self {
        Self {
            standard: GenerationConfig {
                model: standard_model(),
                form: standard_form(),
            },
            classic_model: classic_model(),
        }
    }

    /// Configuration used as the merge base
    pub fn base(&self, classic: bool) -> GenerationConfig {
        let mut config = self.standard.clone();
        if classic {
            config.model = self.classic_model.clone();
        }
        config
    }
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn audit_columns() -> BTreeSet<String> {
    ["created_at", "updated_at"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn standard_model() -> ModelConfig {
    ModelConfig {
        base_class: "db.Model".to_string(),
        imports: strings(&[
            "from flask_sqlalchemy import SQLAlchemy",
            "from datetime import datetime",
        ]),
        preamble: strings(&["db = SQLAlchemy()"]),
        column_class: "db.Column".to_string(),
        fallback_type: "db.String".to_string(),
        sql_expression: "db.text".to_string(),
        exclude_columns: audit_columns(),
        exclude_primary_key: false,
        type_mapping: mapping(&[
            ("string", "db.String"),
            ("text", "db.Text"),
            ("integer", "db.Integer"),
            ("float", "db.Float"),
            ("boolean", "db.Boolean"),
            ("datetime", "db.DateTime"),
            ("date", "db.Date"),
        ]),
    }
}

fn classic_model() -> ModelConfig {
    ModelConfig {
        base_class: "Base".to_string(),
        imports: strings(&[
            "from sqlalchemy import Column, Integer, String, Text, Boolean, DateTime, Date, Float, text",
            "from sqlalchemy.ext.declarative import declarative_base",
            "",
            "Base = declarative_base()",
        ]),
        preamble: Vec::new(),
        column_class: "Column".to_string(),
        fallback_type: "String".to_string(),
        sql_expression: "text".to_string(),
        exclude_columns: audit_columns(),
        exclude_primary_key: true,
        type_mapping: mapping(&[
            ("string", "String"),
            ("text", "Text"),
            ("integer", "Integer"),
            ("float", "Float"),
            ("boolean", "Boolean"),
            ("datetime", "DateTime"),
            ("date", "Date"),
        ]),
    }
}

fn standard_form() -> FormConfig {
    FormConfig {
        base_class: "FlaskForm".to_string(),
        imports: strings(&[
            "from flask_wtf import FlaskForm",
            "from wtforms import StringField, TextAreaField, IntegerField, FloatField, BooleanField, DateField, DateTimeField, SelectField, SubmitField",
            "from wtforms.validators import DataRequired, Email, Length, NumberRange",
        ]),
        field_mapping: mapping(&[
            ("string", "StringField"),
            ("text", "TextAreaField"),
            ("integer", "IntegerField"),
            ("float", "FloatField"),
            ("boolean", "BooleanField"),
            ("datetime", "DateTimeField"),
            ("date", "DateField"),
        ]),
        default_validators: mapping(&[
            ("required", "DataRequired()"),
            ("email", "Email()"),
            ("length", "Length(max={max})"),
        ]),
        submit_field: "SubmitField".to_string(),
        meta: serde_json::Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_base_swaps_only_the_model() {
        let defaults = DefaultConfig::builtin();
        let classic = defaults.base(true);
        assert_eq!(classic.model.base_class, "Base");
        assert!(classic.model.exclude_primary_key);
        assert_eq!(classic.form, defaults.standard.form);
    }

    #[test]
    fn test_every_semantic_type_but_other_is_mapped() {
        use crate::schema::SemanticType;
        let config = DefaultConfig::builtin().base(false);
        for ty in SemanticType::ALL {
            let mapped = config.model.type_mapping.contains_key(ty.as_str());
            assert_eq!(mapped, ty != SemanticType::Other, "{}", ty);
            let field = config.form.field_mapping.contains_key(ty.as_str());
            assert_eq!(field, ty != SemanticType::Other, "{}", ty);
        }
    }
}
