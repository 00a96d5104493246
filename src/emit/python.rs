//! Python literal rendering shared by the emitters

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?$").expect("number pattern is valid"));

/// `'text'::character varying` style casts on quoted defaults
static CAST_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^('(?:[^']|'')*')::[A-Za-z0-9_ \[\]]+$").expect("cast pattern is valid"));

/// Single-quoted Python string literal
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Attribute name for a column, rewritten only when `name` is not a usable identifier
///
/// `first name` becomes `first_name`, `class` becomes `class_` and `2fa`
/// becomes `_2fa`.
pub fn attribute_name(name: &str) -> Cow<'_, str> {
    let valid = name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&name);
    if valid {
        return Cow::Borrowed(name);
    }

    let mut attribute: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if attribute.is_empty() || attribute.starts_with(|c: char| c.is_ascii_digit()) {
        attribute.insert(0, '_');
    }
    if KEYWORDS.contains(&attribute.as_str()) {
        attribute.push('_');
    }
    Cow::Owned(attribute)
}

/// Column keyword argument for a raw SQL default, or `None` for `NULL`
///
/// Literals become `default=...`; anything else is treated as a SQL
/// expression and wrapped as `server_default=<sql_expression>('...')`.
pub fn default_argument(raw: &str, sql_expression: &str) -> Option<String> {
    let mut value = raw.trim();
    while let Some(inner) = strip_wrapping_parens(value) {
        value = inner.trim();
    }
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        return None;
    }
    if let Some(caps) = CAST_LITERAL.captures(value) {
        value = caps.get(1).map_or(value, |m| m.as_str());
    }

    if NUMBER.is_match(value) {
        return Some(format!("default={}", value));
    }
    if value.eq_ignore_ascii_case("true") {
        return Some("default=True".to_string());
    }
    if value.eq_ignore_ascii_case("false") {
        return Some("default=False".to_string());
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        let inner = value[1..value.len() - 1].replace("''", "'");
        return Some(format!("default={}", string_literal(&inner)));
    }
    Some(format!(
        "server_default={}({})",
        sql_expression,
        string_literal(value)
    ))
}

/// Contents of `(...)` when the outer pair encloses the whole expression
fn strip_wrapping_parens(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

/// Render a `meta` value; top-level strings are emitted verbatim
pub fn meta_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => python_value(other),
    }
}

fn python_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let items: Vec<_> = items.iter().map(python_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", string_literal(k), python_value(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}
