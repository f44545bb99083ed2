//! Configuration for the translation engine

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineKind;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Model repository for the translation pipeline
    #[serde(default = "default_translation_model")]
    pub translation_model: String,

    /// Model repository for the language-detection pipeline
    #[serde(default = "default_detection_model")]
    pub detection_model: String,

    /// Acceleration device preference, passed through to the backend
    #[serde(default = "default_device")]
    pub device: String,

    /// Request mailbox depth for the message broker
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,

    /// Broadcast buffer size for progress pushes
    #[serde(default = "default_progress_capacity")]
    pub progress_capacity: usize,

    /// How long a finished file lingers in progress views, in milliseconds
    #[serde(default = "default_entry_linger_ms")]
    pub entry_linger_ms: u64,
}

impl EngineConfig {
    /// Model repository configured for `kind`
    pub fn model_id(&self, kind: PipelineKind) -> String {
        match kind {
            PipelineKind::Translation => self.translation_model.clone(),
            PipelineKind::LanguageDetection => self.detection_model.clone(),
        }
    }

    /// Linger delay as a [`Duration`]
    pub fn entry_linger(&self) -> Duration {
        Duration::from_millis(self.entry_linger_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            translation_model: default_translation_model(),
            detection_model: default_detection_model(),
            device: default_device(),
            mailbox_capacity: default_mailbox_capacity(),
            progress_capacity: default_progress_capacity(),
            entry_linger_ms: default_entry_linger_ms(),
        }
    }
}

fn default_translation_model() -> String {
    PipelineKind::Translation.default_model_id().to_string()
}

fn default_detection_model() -> String {
    PipelineKind::LanguageDetection.default_model_id().to_string()
}

fn default_device() -> String {
    if let Ok(from_env) = std::env::var("TOLKA_DEVICE") {
        let trimmed = from_env.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    "auto".to_string()
}

fn default_mailbox_capacity() -> usize {
    32
}

fn default_progress_capacity() -> usize {
    100
}

fn default_entry_linger_ms() -> u64 {
    500
}
