//! Pipeline kinds and their task configuration

use serde::{Deserialize, Serialize};

/// The two supported model tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    /// Text-to-text translation
    Translation,
    /// Input-language classification
    LanguageDetection,
}

impl PipelineKind {
    /// Task name understood by the inference backend
    pub fn task(&self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::LanguageDetection => "text-classification",
        }
    }

    /// Model repository used when the config does not override it
    pub fn default_model_id(&self) -> &'static str {
        match self {
            Self::Translation => "Xenova/m2m100_418M",
            Self::LanguageDetection => "onnx-community/language_detection-ONNX",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Translation => "Translation",
            Self::LanguageDetection => "Language detection",
        }
    }

    /// All supported kinds
    pub fn all() -> &'static [PipelineKind] {
        &[Self::Translation, Self::LanguageDetection]
    }
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_names_match_backend_conventions() {
        assert_eq!(PipelineKind::Translation.task(), "translation");
        assert_eq!(PipelineKind::LanguageDetection.task(), "text-classification");
    }

    #[test]
    fn serde_names_are_snake_case() {
        assert_eq!(
            serde_json::to_value(PipelineKind::LanguageDetection).unwrap(),
            serde_json::json!("language_detection")
        );
        let kind: PipelineKind = serde_json::from_value(serde_json::json!("translation")).unwrap();
        assert_eq!(kind, PipelineKind::Translation);
    }

    #[test]
    fn all_lists_every_kind() {
        assert_eq!(PipelineKind::all().len(), 2);
    }
}
