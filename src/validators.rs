//! Form validator inference
//!
//! Validators are always produced in the order required, email, length so
//! the emitted source is stable across runs.

use crate::config::GenerationConfig;
use crate::schema::ColumnDescriptor;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_COLUMN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)email$").expect("email pattern is valid"));

/// Validator kinds, keyed into `form.default_validators`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    Required,
    Email,
    Length,
}

impl ValidatorKind {
    pub fn key(&self) -> &'static str {
        match self {
            ValidatorKind::Required => "required",
            ValidatorKind::Email => "email",
            ValidatorKind::Length => "length",
        }
    }
}

/// Validator kinds that apply to a column, before rendering
pub fn infer_validators(column: &ColumnDescriptor) -> Vec<ValidatorKind> {
    let mut kinds = Vec::new();
    if !column.nullable && !column.primary_key {
        kinds.push(ValidatorKind::Required);
    }
    if EMAIL_COLUMN.is_match(&column.name) {
        kinds.push(ValidatorKind::Email);
    }
    if column.semantic_type.is_string_like() && column.max_length.is_some() {
        kinds.push(ValidatorKind::Length);
    }
    kinds
}

/// Rendered validator expressions for a form field
///
/// Excluded and primary-key columns get none. Kinds without a configured
/// expression are skipped; `{max}` in the length expression is replaced by
/// the column's maximum length.
pub fn resolve_validators(config: &GenerationConfig, column: &ColumnDescriptor) -> Vec<String> {
    if column.primary_key || config.model.is_excluded(column) {
        return Vec::new();
    }

    infer_validators(column)
        .into_iter()
        .filter_map(|kind| {
            let template = config.form.default_validators.get(kind.key())?;
            match (kind, column.max_length) {
                (ValidatorKind::Length, Some(max)) => {
                    Some(template.replace("{max}", &max.to_string()))
                }
                _ => Some(template.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;

    #[test]
    fn test_required_for_not_null_columns() {
        let config = GenerationConfig::standard();
        let username = ColumnDescriptor::new("username", SemanticType::String).not_null();
        assert_eq!(resolve_validators(&config, &username), vec!["DataRequired()"]);

        let bio = ColumnDescriptor::new("bio", SemanticType::Text);
        assert!(resolve_validators(&config, &bio).is_empty());
    }

    #[test]
    fn test_email_pattern_matches_suffix_case_insensitively() {
        let config = GenerationConfig::standard();
        let email = ColumnDescriptor::new("email", SemanticType::String).not_null();
        assert_eq!(
            resolve_validators(&config, &email),
            vec!["DataRequired()", "Email()"]
        );

        let contact = ColumnDescriptor::new("contactEMAIL", SemanticType::String);
        assert_eq!(resolve_validators(&config, &contact), vec!["Email()"]);

        let verified = ColumnDescriptor::new("email_verified", SemanticType::Boolean);
        assert!(resolve_validators(&config, &verified).is_empty());
    }

    #[test]
    fn test_fixed_order_with_length() {
        let config = GenerationConfig::standard();
        let email = ColumnDescriptor::new("work_email", SemanticType::String)
            .not_null()
            .with_length(120);
        assert_eq!(
            resolve_validators(&config, &email),
            vec!["DataRequired()", "Email()", "Length(max=120)"]
        );
    }

    #[test]
    fn test_primary_key_and_excluded_columns_get_nothing() {
        let config = GenerationConfig::standard();
        let id = ColumnDescriptor::new("id", SemanticType::Integer).primary_key();
        assert!(resolve_validators(&config, &id).is_empty());

        let created = ColumnDescriptor::new("created_at", SemanticType::Datetime).not_null();
        assert!(resolve_validators(&config, &created).is_empty());
    }

    #[test]
    fn test_unconfigured_kinds_are_skipped() {
        let mut config = GenerationConfig::standard();
        config.form.default_validators.remove("email");
        let email = ColumnDescriptor::new("email", SemanticType::String).not_null();
        assert_eq!(resolve_validators(&config, &email), vec!["DataRequired()"]);
    }
}
