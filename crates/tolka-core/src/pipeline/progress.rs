//! File-level progress events emitted during pipeline construction

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Sink half of a progress observer registration
pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;

/// Receiving half paired with [`ProgressSender`]
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Lifecycle stage reported for a single model file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    /// File discovered, transfer not started
    Initiate,
    /// Transfer started
    Download,
    /// Transfer advancing; the only status forwarded to UIs
    Progress,
    /// File complete
    Done,
    /// Whole pipeline is ready to run
    Ready,
}

/// Granular per-file progress emitted while a backend builds a pipeline.
///
/// Multiple files report interleaved and without cross-file ordering; within
/// one file the percentage never regresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub status: ProgressStatus,
    pub file: String,
    /// Percent complete, 0-100
    pub progress: f32,
    pub loaded: u64,
    pub total: u64,
}

impl ProgressEvent {
    /// Whether this event carries user-visible transfer progress
    pub fn is_progress(&self) -> bool {
        matches!(self.status, ProgressStatus::Progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(ProgressStatus::Progress).unwrap(),
            serde_json::json!("progress")
        );
        assert_eq!(
            serde_json::to_value(ProgressStatus::Initiate).unwrap(),
            serde_json::json!("initiate")
        );
    }

    #[test]
    fn only_progress_status_is_user_visible() {
        let event = ProgressEvent {
            status: ProgressStatus::Done,
            file: "model.onnx".to_string(),
            progress: 100.0,
            loaded: 10,
            total: 10,
        };
        assert!(!event.is_progress());
        let event = ProgressEvent {
            status: ProgressStatus::Progress,
            ..event
        };
        assert!(event.is_progress());
    }
}
