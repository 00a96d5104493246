//! Semantic type to target-code token resolution

use crate::schema::SemanticType;
use std::collections::BTreeMap;

/// Result of looking a semantic type up in a mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeToken<'a> {
    Mapped(&'a str),
    /// No usable mapping; emitters render this as a comment marker
    Unknown,
}

impl<'a> TypeToken<'a> {
    pub fn as_mapped(&self) -> Option<&'a str> {
        match self {
            TypeToken::Mapped(token) => Some(token),
            TypeToken::Unknown => None,
        }
    }
}

/// Look up the token configured for `semantic_type`
///
/// [`SemanticType::Other`], missing keys and blank tokens all resolve to
/// [`TypeToken::Unknown`]. Never fails.
pub fn map_type(mapping: &BTreeMap<String, String>, semantic_type: SemanticType) -> TypeToken<'_> {
    if semantic_type == SemanticType::Other {
        return TypeToken::Unknown;
    }
    match mapping.get(semantic_type.as_str()) {
        Some(token) if !token.trim().is_empty() => TypeToken::Mapped(token.as_str()),
        _ => TypeToken::Unknown,
    }
}
