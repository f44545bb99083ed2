//! Command implementations

pub mod auto;
pub mod config;
pub mod translate;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tolka_core::{
    BrokerHandle, EngineConfig, MessageBroker, NoopBackend, Request, TranslationEngine,
};
use tracing::debug;

use crate::progress::ProgressRenderer;

/// Resolve the config file: the explicit flag wins, otherwise the default
/// location is used only if it exists.
fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let default = dirs::config_dir()?.join("tolka").join("config.toml");
    default.exists().then_some(default)
}

pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    match config_file(explicit) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Boot an engine on the built-in backend and hand back its broker.
pub fn start_broker(config: EngineConfig) -> BrokerHandle {
    let engine = Arc::new(TranslationEngine::new(config, Arc::new(NoopBackend::new())));
    MessageBroker::spawn(engine)
}

/// Send one request, rendering progress while it runs.
///
/// An `{"error"}` reply becomes a command failure here so the commands only
/// ever see successful payloads.
pub async fn run_request(
    handle: &BrokerHandle,
    request: &Request,
    linger: Duration,
    quiet: bool,
) -> Result<Value> {
    let renderer = if quiet {
        None
    } else {
        Some(ProgressRenderer::spawn(handle.subscribe(), linger))
    };

    debug!("Sending {} request", request.action());
    let reply = handle.send(request).await;

    if let Some(renderer) = renderer {
        renderer.finish().await;
    }

    let reply = reply?;
    if let Some(error) = reply.get("error").and_then(Value::as_str) {
        bail!("{error}");
    }
    Ok(reply)
}
