//! Naming conventions for generated classes and labels

use convert_case::{Case, Casing};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("separator pattern is valid"));

/// Which generated class a name is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Model,
    Form,
}

impl Artifact {
    /// Appended to the table-derived class name
    pub fn suffix(&self) -> &'static str {
        match self {
            Artifact::Model => "",
            Artifact::Form => "Form",
        }
    }

    /// Class name used when renaming is forced
    pub fn forced_name(&self) -> &'static str {
        match self {
            Artifact::Model => "Model",
            Artifact::Form => "Form",
        }
    }
}

/// Derive a class name from a table name
///
/// `user_accounts` becomes `UserAccounts` (model) or `UserAccountsForm` (form).
/// With `force_rename` the result is always `Model` / `Form`.
pub fn to_class_name(table_name: &str, force_rename: bool, artifact: Artifact) -> String {
    if force_rename {
        return artifact.forced_name().to_string();
    }

    let spaced = NON_ALPHANUMERIC.replace_all(table_name, "_");
    let mut name = spaced.to_case(Case::Pascal);
    if name.is_empty() {
        name = "Table".to_string();
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name.push_str(artifact.suffix());
    name
}

/// Human-readable label for a column: `created_at` becomes `Created At`
///
/// Underscores become spaces and every word is capitalized, where a word
/// starts after any non-letter (`order-id` becomes `Order-Id`).
pub fn to_field_label(column_name: &str) -> String {
    let mut label = String::with_capacity(column_name.len());
    let mut word_start = true;
    for c in column_name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if word_start {
                label.extend(c.to_uppercase());
            } else {
                label.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            label.push(c);
            word_start = true;
        }
    }
    label
}
