//! Form label translation
//!
//! [`LabelTranslator`] is the narrow seam to an external translation
//! service. [`LabelTranslation`] applies it to labels and owns the fallback:
//! a failed translation leaves the original label in place and is only logged.

#[cfg(feature = "translate")]
pub mod google;

use thiserror::Error;

#[cfg(feature = "translate")]
pub use google::GoogleTranslator;

#[derive(Debug, Error)]
pub enum TranslationError {
    /// Network failure, timeout or non-success HTTP status
    #[error("translation request failed: {0}")]
    Transport(String),

    #[error("unsupported language pair {source_lang} -> {target_lang}")]
    UnsupportedLanguage {
        source_lang: String,
        target_lang: String,
    },

    /// The service answered with something that is not a translation
    #[error("unexpected translation response: {0}")]
    InvalidResponse(String),
}

/// Translates one piece of text between two language codes
pub trait LabelTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError>;
}

/// Label translation settings for one form emission
#[derive(Clone, Copy, Default)]
pub struct LabelTranslation<'a> {
    translator: Option<&'a dyn LabelTranslator>,
    source: &'a str,
    target: Option<&'a str>,
}

impl<'a> LabelTranslation<'a> {
    /// Labels are used as generated
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(translator: &'a dyn LabelTranslator, source: &'a str, target: &'a str) -> Self {
        Self {
            translator: Some(translator),
            source,
            target: Some(target),
        }
    }

    /// Whether labels will actually be sent to the translator
    pub fn is_active(&self) -> bool {
        match (self.translator, self.target) {
            (Some(_), Some(target)) => !target.eq_ignore_ascii_case(self.source),
            _ => false,
        }
    }

    /// Translate `label`, returning it unchanged when translation is off,
    /// the languages match, or the translator fails
    pub fn apply(&self, label: &str) -> String {
        if !self.is_active() {
            return label.to_string();
        }
        let (Some(translator), Some(target)) = (self.translator, self.target) else {
            return label.to_string();
        };

        match translator.translate(label, self.source, target) {
            Ok(translated) if !translated.trim().is_empty() => translated,
            Ok(_) => {
                log::warn!("Empty translation for label '{}', keeping original", label);
                label.to_string()
            }
            Err(e) => {
                log::warn!("Could not translate label '{}': {}", label, e);
                label.to_string()
            }
        }
    }
}
