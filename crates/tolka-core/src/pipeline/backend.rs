//! Inference backend seam.
//!
//! Model construction and invocation live behind these traits; everything on
//! this side of the seam treats the backend as an opaque async call.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::pipeline::kind::PipelineKind;
use crate::pipeline::progress::ProgressSender;

/// Options forwarded verbatim to a pipeline invocation
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Acceleration device preference, uninterpreted here
    pub device: String,
    /// Source language code for translation tasks
    pub source_lang: Option<String>,
    /// Target language code for translation tasks
    pub target_lang: Option<String>,
}

/// Builds ready-to-run pipelines for a pipeline kind
#[async_trait]
pub trait PipelineFactory: Send + Sync {
    /// Construct the pipeline for `kind` from `model_id`, streaming
    /// file-level progress into `progress`.
    ///
    /// Failures surface as [`crate::Error::ModelLoad`].
    async fn create(
        &self,
        kind: PipelineKind,
        model_id: &str,
        progress: ProgressSender,
    ) -> Result<Arc<dyn TextPipeline>>;
}

/// A loaded model instance for one pipeline kind
#[async_trait]
pub trait TextPipeline: Send + Sync {
    /// Run the model on `text`.
    ///
    /// The output shape varies by model family and is normalized exactly
    /// once, by the engine.
    async fn run(&self, text: &str, options: &RunOptions) -> Result<Value>;
}
