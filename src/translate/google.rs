//! Google Translate client over the public `translate_a/single` endpoint

use super::{LabelTranslator, TranslationError};
use serde_json::Value;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking translator; each call is one HTTP request bounded by a timeout
pub struct GoogleTranslator {
    agent: ureq::Agent,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint speaking the same protocol
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelTranslator for GoogleTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("client", "gtx")
            .query("sl", source)
            .query("tl", target)
            .query("dt", "t")
            .query("q", text)
            .call();

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(400, _)) => {
                return Err(TranslationError::UnsupportedLanguage {
                    source_lang: source.to_string(),
                    target_lang: target.to_string(),
                })
            }
            Err(e) => return Err(TranslationError::Transport(e.to_string())),
        };

        let body: Value = response
            .into_json()
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;
        parse_response(&body)
    }
}

/// Join the translated segments of a `[[["<translated>", "<original>", ...], ...], ...]` payload
pub(crate) fn parse_response(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing sentence list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::InvalidResponse(
            "no translated text".to_string(),
        ));
    }
    Ok(translated)
}
