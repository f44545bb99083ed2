//! Pipeline instancing layer.
//!
//! This module owns everything between "a request needs a model" and "a
//! ready instance is in hand": the kind catalog, the backend trait seam,
//! the single-flight cache, and the progress event plumbing.

mod backend;
mod cache;
mod kind;
mod noop;
mod progress;

pub use backend::{PipelineFactory, RunOptions, TextPipeline};
pub use cache::PipelineCache;
pub use kind::PipelineKind;
pub use noop::{NoopBackend, NoopPipeline};
pub use progress::{ProgressEvent, ProgressReceiver, ProgressSender, ProgressStatus};
