//! Translation engine: the two request flows over the pipeline cache

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::client::extract_translated_text;
use crate::codes::to_short_code;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::pipeline::{PipelineCache, PipelineFactory, PipelineKind, ProgressSender, RunOptions};
use crate::runtime::types::{AutoDetection, AutoTranslateRequest, TranslateRequest, Translation};

/// Coordinates pipeline instancing and the two supported request flows.
///
/// Both flows suspend on first use of a pipeline kind while the shared
/// instance builds; concurrent requests never trigger a second build.
pub struct TranslationEngine {
    config: EngineConfig,
    cache: PipelineCache,
}

impl TranslationEngine {
    pub fn new(config: EngineConfig, factory: Arc<dyn PipelineFactory>) -> Self {
        let cache = PipelineCache::new(config.clone(), factory);
        Self { config, cache }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Translate with explicit source and target languages.
    pub async fn translate(
        &self,
        request: TranslateRequest,
        progress: Option<ProgressSender>,
    ) -> Result<Translation> {
        if request.text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let pipeline = self
            .cache
            .instance(PipelineKind::Translation, progress)
            .await?;

        debug!(
            "Translating {} -> {} ({} chars)",
            request.source_lang,
            request.target_lang,
            request.text.len()
        );
        let options = RunOptions {
            device: self.config.device.clone(),
            source_lang: Some(request.source_lang),
            target_lang: Some(request.target_lang),
        };
        let raw = pipeline
            .run(&request.text, &options)
            .await
            .map_err(attribute_to_translation)?;

        match extract_translated_text(&raw) {
            Some(translated_text) => Ok(Translation { translated_text }),
            None => Err(Error::Translation(
                "model output contained no translated text".to_string(),
            )),
        }
    }

    /// Detect the source language, then translate with the detected code.
    pub async fn auto_translate(
        &self,
        request: AutoTranslateRequest,
        progress: Option<ProgressSender>,
    ) -> Result<AutoDetection> {
        if request.text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let detector = self
            .cache
            .instance(PipelineKind::LanguageDetection, progress.clone())
            .await?;

        let options = RunOptions {
            device: self.config.device.clone(),
            source_lang: None,
            target_lang: None,
        };
        let raw = detector
            .run(&request.text, &options)
            .await
            .map_err(attribute_to_detection)?;

        let label = extract_detected_label(&raw).ok_or_else(|| {
            Error::Detection("detector output carried no language label".to_string())
        })?;
        let mapped = to_short_code(&label);
        info!("Detected language {} ({})", label, mapped);

        let translation = self
            .translate(
                TranslateRequest {
                    text: request.text,
                    source_lang: mapped.clone(),
                    target_lang: request.target_lang,
                },
                progress,
            )
            .await?;

        Ok(AutoDetection {
            detected_language: label,
            mapped_source_code: mapped,
            translation,
        })
    }
}

/// Best label from a detector response: a labeled object, or the first
/// element of a ranked list.
fn extract_detected_label(value: &Value) -> Option<String> {
    if let Some(label) = value.get("label").and_then(Value::as_str) {
        return Some(label.to_string());
    }
    value
        .as_array()?
        .first()?
        .get("label")?
        .as_str()
        .map(str::to_string)
}

fn attribute_to_translation(err: Error) -> Error {
    match err {
        Error::Inference(message) => Error::Translation(message),
        other => other,
    }
}

fn attribute_to_detection(err: Error) -> Error {
    match err {
        Error::Inference(message) => Error::Detection(message),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TextPipeline;
    use serde_json::json;
    use std::sync::Mutex;

    /// Scripted backend: fixed output per kind, recorded run options,
    /// optional per-kind failure.
    struct ScriptedBackend {
        detector_output: Value,
        translator_output: Value,
        fail_kind: Option<PipelineKind>,
        seen: Arc<Mutex<Vec<(PipelineKind, RunOptions)>>>,
    }

    impl ScriptedBackend {
        fn new() -> Self {
            Self {
                detector_output: json!([{ "label": "nld_Latn", "score": 0.99 }]),
                translator_output: json!([{ "translation_text": "Bonjour" }]),
                fail_kind: None,
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn engine(self) -> (TranslationEngine, Arc<Mutex<Vec<(PipelineKind, RunOptions)>>>) {
            let seen = self.seen.clone();
            let engine = TranslationEngine::new(EngineConfig::default(), Arc::new(self));
            (engine, seen)
        }
    }

    #[async_trait::async_trait]
    impl PipelineFactory for ScriptedBackend {
        async fn create(
            &self,
            kind: PipelineKind,
            _model_id: &str,
            _progress: ProgressSender,
        ) -> Result<Arc<dyn TextPipeline>> {
            Ok(Arc::new(ScriptedPipeline {
                kind,
                output: match kind {
                    PipelineKind::Translation => self.translator_output.clone(),
                    PipelineKind::LanguageDetection => self.detector_output.clone(),
                },
                fail: self.fail_kind == Some(kind),
                seen: self.seen.clone(),
            }))
        }
    }

    struct ScriptedPipeline {
        kind: PipelineKind,
        output: Value,
        fail: bool,
        seen: Arc<Mutex<Vec<(PipelineKind, RunOptions)>>>,
    }

    #[async_trait::async_trait]
    impl TextPipeline for ScriptedPipeline {
        async fn run(&self, _text: &str, options: &RunOptions) -> Result<Value> {
            self.seen.lock().unwrap().push((self.kind, options.clone()));
            if self.fail {
                return Err(Error::Inference("scripted failure".to_string()));
            }
            Ok(self.output.clone())
        }
    }

    #[tokio::test]
    async fn translate_returns_the_extracted_text() {
        let (engine, _) = ScriptedBackend::new().engine();
        let translation = engine
            .translate(TranslateRequest::new("Hello"), None)
            .await
            .unwrap();
        assert_eq!(translation.translated_text, "Bonjour");
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_model_work() {
        let (engine, seen) = ScriptedBackend::new().engine();
        let err = engine
            .translate(TranslateRequest::new("   "), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput));

        let err = engine
            .auto_translate(AutoTranslateRequest::new(""), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn auto_detect_maps_the_label_and_sets_the_source() {
        let (engine, seen) = ScriptedBackend::new().engine();
        let outcome = engine
            .auto_translate(
                AutoTranslateRequest::new("Hallo wereld").with_target_lang("en"),
                None,
            )
            .await
            .unwrap();

        assert_eq!(outcome.detected_language, "nld_Latn");
        assert_eq!(outcome.mapped_source_code, "nl");
        assert_eq!(outcome.translation.translated_text, "Bonjour");

        let seen = seen.lock().unwrap();
        let (kind, options) = seen.last().unwrap();
        assert_eq!(*kind, PipelineKind::Translation);
        assert_eq!(options.source_lang.as_deref(), Some("nl"));
        assert_eq!(options.target_lang.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn detector_label_can_be_a_bare_object() {
        let mut backend = ScriptedBackend::new();
        backend.detector_output = json!({ "label": "fra_Latn" });
        let (engine, _) = backend.engine();

        let outcome = engine
            .auto_translate(AutoTranslateRequest::new("Bonjour"), None)
            .await
            .unwrap();
        assert_eq!(outcome.mapped_source_code, "fr");
    }

    #[tokio::test]
    async fn detection_failures_carry_their_stage() {
        let mut backend = ScriptedBackend::new();
        backend.fail_kind = Some(PipelineKind::LanguageDetection);
        let (engine, _) = backend.engine();

        let err = engine
            .auto_translate(AutoTranslateRequest::new("Hallo"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Detection(_)));
    }

    #[tokio::test]
    async fn translation_failures_after_detection_carry_their_stage() {
        let mut backend = ScriptedBackend::new();
        backend.fail_kind = Some(PipelineKind::Translation);
        let (engine, _) = backend.engine();

        let err = engine
            .auto_translate(AutoTranslateRequest::new("Hallo"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }

    #[tokio::test]
    async fn unlabeled_detector_output_is_a_detection_error() {
        let mut backend = ScriptedBackend::new();
        backend.detector_output = json!([{ "score": 0.2 }]);
        let (engine, _) = backend.engine();

        let err = engine
            .auto_translate(AutoTranslateRequest::new("Hallo"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Detection(_)));
    }

    #[tokio::test]
    async fn inextractable_translator_output_is_a_translation_error() {
        let mut backend = ScriptedBackend::new();
        backend.translator_output = json!({ "confidence": 0.9 });
        let (engine, _) = backend.engine();

        let err = engine
            .translate(TranslateRequest::new("Hello"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }
}
