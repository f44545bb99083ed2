//! Error types for the tolka engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the translation engine and its protocol layer.
///
/// Cloneable so one failed pipeline build can be delivered to every caller
/// waiting on the same in-flight construction.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Input text was empty after trimming
    #[error("Input text is empty")]
    EmptyInput,

    /// Pipeline construction failed (model fetch or parse)
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    /// Raw backend invocation failed, stage not yet attributed
    #[error("Inference failed: {0}")]
    Inference(String),

    /// The language-detection stage failed
    #[error("Language detection failed: {0}")]
    Detection(String),

    /// The translation stage failed
    #[error("Translation failed: {0}")]
    Translation(String),

    /// Request carried an action the router does not recognize
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Recognized action with malformed fields
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A channel endpoint disappeared mid-request
    #[error("Channel closed: {0}")]
    ChannelClosed(String),
}
