//! Tolka Core - Local Machine Translation Engine
//!
//! This crate is the coordination layer of a local translation stack: it
//! caches lazily built model pipelines, routes typed requests to them, and
//! fans download progress out to whoever is watching.
//!
//! # Architecture
//!
//! - Single-flight pipeline cache: each model is built at most once at a
//!   time, concurrent callers share the build
//! - Message broker with one task per request and exactly one reply each
//! - Broadcast progress pushes, decoupled from request/reply traffic
//! - Client helpers for normalizing model output and rendering progress
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tolka_core::{EngineConfig, MessageBroker, NoopBackend, Request, TranslationEngine};
//! use tolka_core::runtime::TranslateRequest;
//!
//! let engine = Arc::new(TranslationEngine::new(EngineConfig::default(), Arc::new(NoopBackend::new())));
//! let broker = MessageBroker::spawn(engine);
//!
//! let reply = broker.send(&Request::Translate(TranslateRequest::new("Hello"))).await?;
//! println!("{}", reply["translated_text"]);
//! ```

pub mod client;
pub mod codes;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod protocol;
pub mod runtime;

pub use config::EngineConfig;
pub use error::{Error, Result};

// Pipeline seam re-exports
pub use pipeline::{
    NoopBackend, PipelineCache, PipelineFactory, PipelineKind, ProgressEvent, ProgressSender,
    ProgressStatus, RunOptions, TextPipeline,
};

// Protocol re-exports
pub use protocol::{BrokerHandle, ErrorReply, MessageBroker, Push, Request};

// Engine and client-facing re-exports
pub use client::{display_name, extract_translated_text, BoardChange, ProgressBoard};
pub use codes::to_short_code;
pub use runtime::TranslationEngine;
