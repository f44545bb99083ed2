//! Runtime orchestration layer.
//!
//! Owns the request lifecycle from validated input to a typed result:
//! obtaining pipeline instances, invoking them, attributing failures to
//! their stage, and reshaping raw model output exactly once.

mod service;
mod types;

pub use service::TranslationEngine;
pub use types::{
    AutoDetection, AutoTranslateRequest, TranslateRequest, Translation, DEFAULT_SOURCE_LANG,
    DEFAULT_TARGET_LANG,
};
