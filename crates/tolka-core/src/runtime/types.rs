//! Request and result types for the translation flows

use serde::{Deserialize, Serialize};

/// Source language assumed when a request does not carry one
pub const DEFAULT_SOURCE_LANG: &str = "en";

/// Target language assumed when a request does not carry one
pub const DEFAULT_TARGET_LANG: &str = "fr";

/// A translation request with explicit source and target languages.
///
/// Field names are camelCase on the wire (`sourceLang`, `targetLang`);
/// absent languages fall back to the en -> fr defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl TranslateRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
        }
    }

    pub fn with_source_lang(mut self, lang: impl Into<String>) -> Self {
        self.source_lang = lang.into();
        self
    }

    pub fn with_target_lang(mut self, lang: impl Into<String>) -> Self {
        self.target_lang = lang.into();
        self
    }
}

/// A detect-then-translate request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTranslateRequest {
    pub text: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

impl AutoTranslateRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
        }
    }

    pub fn with_target_lang(mut self, lang: impl Into<String>) -> Self {
        self.target_lang = lang.into();
        self
    }
}

/// Translated text produced by the translation stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub translated_text: String,
}

/// Outcome of the detect-then-translate flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoDetection {
    /// Raw label reported by the detector
    pub detected_language: String,
    /// Detector label mapped to the translator's 2-letter code
    pub mapped_source_code: String,
    pub translation: Translation,
}

fn default_source_lang() -> String {
    DEFAULT_SOURCE_LANG.to_string()
}

fn default_target_lang() -> String {
    DEFAULT_TARGET_LANG.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builders_start_from_the_defaults() {
        let request = TranslateRequest::new("Hello");
        assert_eq!(request.source_lang, "en");
        assert_eq!(request.target_lang, "fr");

        let request = request.with_source_lang("de").with_target_lang("it");
        assert_eq!(request.source_lang, "de");
        assert_eq!(request.target_lang, "it");
    }

    #[test]
    fn wire_fields_are_camel_case() {
        let value = serde_json::to_value(TranslateRequest::new("hi")).unwrap();
        assert_eq!(value["sourceLang"], "en");
        assert_eq!(value["targetLang"], "fr");
    }

    #[test]
    fn missing_languages_fall_back() {
        let request: TranslateRequest = serde_json::from_value(json!({ "text": "hi" })).unwrap();
        assert_eq!(request.source_lang, "en");
        assert_eq!(request.target_lang, "fr");

        let request: AutoTranslateRequest =
            serde_json::from_value(json!({ "text": "hi" })).unwrap();
        assert_eq!(request.target_lang, "fr");
    }

    #[test]
    fn results_keep_snake_case_wire_keys() {
        let outcome = AutoDetection {
            detected_language: "nld_Latn".to_string(),
            mapped_source_code: "nl".to_string(),
            translation: Translation {
                translated_text: "Bonjour".to_string(),
            },
        };
        let value = serde_json::to_value(outcome).unwrap();
        assert_eq!(value["detected_language"], "nld_Latn");
        assert_eq!(value["mapped_source_code"], "nl");
        assert_eq!(value["translation"]["translated_text"], "Bonjour");
    }
}
