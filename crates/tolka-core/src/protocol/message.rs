//! Wire message types shared by the broker and its clients

use serde::{Deserialize, Serialize};

use crate::runtime::{AutoTranslateRequest, TranslateRequest};

/// Actions a client can request.
///
/// Tagged by the `action` field; payload fields sit beside the tag, exactly
/// as clients put them on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Request {
    /// Manual translation with explicit languages
    Translate(TranslateRequest),
    /// Detect the source language, then translate
    AutoDetect(AutoTranslateRequest),
}

impl Request {
    /// The action tag as it appears on the wire
    pub fn action(&self) -> &'static str {
        match self {
            Self::Translate(_) => "translate",
            Self::AutoDetect(_) => "auto-detect",
        }
    }
}

/// Push notifications broadcast to every subscribed client; no response
/// is expected for these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Push {
    /// File-level model loading progress
    Progress {
        file: String,
        progress: f32,
        loaded: u64,
        total: u64,
    },
}

/// Error payload returned in place of a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}
