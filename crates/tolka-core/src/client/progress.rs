//! Download progress bookkeeping for client UIs

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::protocol::Push;

/// What a renderer should do in response to one push or tick
#[derive(Debug, Clone, PartialEq)]
pub enum BoardChange {
    Added { file: String },
    Updated { file: String, progress: f32 },
    Removed { file: String },
    ModelReady,
}

struct FileEntry {
    progress: f32,
    remove_at: Option<Instant>,
}

/// Tracks per-file download progress and decides when entries disappear.
///
/// The board is deliberately clockless: callers pass `Instant::now()` into
/// [`ProgressBoard::observe`] and [`ProgressBoard::tick`], so renderers can
/// drive it from any timer and tests can drive it from none.
pub struct ProgressBoard {
    entries: HashMap<String, FileEntry>,
    linger: Duration,
    model_loaded: bool,
}

impl ProgressBoard {
    /// `linger` is how long a finished entry stays visible before removal.
    pub fn new(linger: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            linger,
            model_loaded: false,
        }
    }

    /// Fold one progress push into the board.
    ///
    /// Each file gets exactly one `Added` for its lifetime on the board, an
    /// `Updated` per push, and its removal is deferred until `linger` after
    /// it first reports 100%. Pushes are always recorded; a follow-up model
    /// load after a drain gets fresh entries.
    pub fn observe(&mut self, push: &Push, now: Instant) -> Vec<BoardChange> {
        let Push::Progress { file, progress, .. } = push;
        let mut changes = Vec::new();
        if !self.entries.contains_key(file) {
            self.entries.insert(
                file.clone(),
                FileEntry {
                    progress: 0.0,
                    remove_at: None,
                },
            );
            changes.push(BoardChange::Added { file: file.clone() });
        }
        if let Some(entry) = self.entries.get_mut(file) {
            entry.progress = *progress;
            changes.push(BoardChange::Updated {
                file: file.clone(),
                progress: *progress,
            });
            if *progress >= 100.0 && entry.remove_at.is_none() {
                entry.remove_at = Some(now + self.linger);
            }
        }
        changes
    }

    /// Remove entries whose linger expired; a removal that empties the
    /// board also announces `ModelReady`, once per drain.
    pub fn tick(&mut self, now: Instant) -> Vec<BoardChange> {
        let due: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.remove_at.is_some_and(|at| now >= at))
            .map(|(file, _)| file.clone())
            .collect();
        let mut changes = Vec::new();
        for file in due {
            self.entries.remove(&file);
            changes.push(BoardChange::Removed { file });
        }
        if !changes.is_empty() && self.entries.is_empty() && !self.model_loaded {
            changes.push(BoardChange::ModelReady);
        }
        changes
    }

    /// Mark the model loaded out-of-band, e.g. when a reply arrives before
    /// the progress stream drained. Entries keep recording and draining;
    /// only the `ModelReady` announcement is suppressed from then on.
    pub fn mark_model_loaded(&mut self) {
        self.model_loaded = true;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn model_loaded(&self) -> bool {
        self.model_loaded
    }
}

/// Human label for a progress entry: basename, known extensions stripped
pub fn display_name(file: &str) -> &str {
    let base = file.rsplit('/').next().unwrap_or(file);
    for ext in [".onnx", ".bin", ".json", ".txt"] {
        if let Some(stripped) = base.strip_suffix(ext) {
            return stripped;
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINGER: Duration = Duration::from_millis(500);

    fn push(file: &str, progress: f32) -> Push {
        Push::Progress {
            file: file.to_string(),
            progress,
            loaded: 0,
            total: 0,
        }
    }

    #[test]
    fn one_file_is_added_once_and_removed_once() {
        let mut board = ProgressBoard::new(LINGER);
        let start = Instant::now();

        let mut added = 0;
        let mut removed = 0;
        for (offset_ms, progress) in [(0, 10.0), (10, 55.0), (20, 100.0)] {
            let now = start + Duration::from_millis(offset_ms);
            for change in board.observe(&push("model.onnx", progress), now) {
                match change {
                    BoardChange::Added { .. } => added += 1,
                    BoardChange::Removed { .. } => removed += 1,
                    _ => {}
                }
            }
            removed += board
                .tick(now)
                .iter()
                .filter(|c| matches!(c, BoardChange::Removed { .. }))
                .count();
        }
        assert_eq!(added, 1);
        // Still lingering at the moment 100% arrived
        assert_eq!(removed, 0);
        assert!(!board.is_empty());

        let changes = board.tick(start + Duration::from_millis(20) + LINGER);
        assert_eq!(
            changes,
            vec![
                BoardChange::Removed {
                    file: "model.onnx".to_string()
                },
                BoardChange::ModelReady,
            ]
        );
        assert!(board.is_empty());
    }

    #[test]
    fn tick_before_linger_keeps_the_entry() {
        let mut board = ProgressBoard::new(LINGER);
        let start = Instant::now();
        board.observe(&push("tokenizer.json", 100.0), start);

        assert!(board.tick(start + Duration::from_millis(499)).is_empty());
        assert!(!board.tick(start + LINGER).is_empty());
    }

    #[test]
    fn model_ready_fires_when_the_last_file_leaves() {
        let mut board = ProgressBoard::new(LINGER);
        let start = Instant::now();

        board.observe(&push("config.json", 100.0), start);
        board.observe(&push("model.onnx", 40.0), start);

        // config.json expires but model.onnx is still downloading
        let changes = board.tick(start + LINGER);
        assert_eq!(
            changes,
            vec![BoardChange::Removed {
                file: "config.json".to_string()
            }]
        );

        let later = start + Duration::from_millis(100);
        board.observe(&push("model.onnx", 100.0), later);
        let changes = board.tick(later + LINGER);
        assert_eq!(
            changes,
            vec![
                BoardChange::Removed {
                    file: "model.onnx".to_string()
                },
                BoardChange::ModelReady,
            ]
        );
    }

    #[test]
    fn a_second_download_after_a_drain_is_tracked_again() {
        let mut board = ProgressBoard::new(LINGER);
        let start = Instant::now();
        board.observe(&push("detector.onnx", 100.0), start);
        let changes = board.tick(start + LINGER);
        assert!(changes.contains(&BoardChange::ModelReady));

        // The second model starts downloading only after the first drained
        let later = start + LINGER + Duration::from_millis(50);
        let changes = board.observe(&push("model.onnx", 10.0), later);
        assert_eq!(
            changes,
            vec![
                BoardChange::Added {
                    file: "model.onnx".to_string()
                },
                BoardChange::Updated {
                    file: "model.onnx".to_string(),
                    progress: 10.0
                },
            ]
        );

        board.observe(&push("model.onnx", 100.0), later);
        let changes = board.tick(later + LINGER);
        assert!(changes.contains(&BoardChange::ModelReady));
    }

    #[test]
    fn marking_loaded_suppresses_the_ready_announcement() {
        let mut board = ProgressBoard::new(LINGER);
        let start = Instant::now();
        board.observe(&push("model.onnx", 100.0), start);
        board.mark_model_loaded();
        assert!(board.model_loaded());

        // Lingering entries still drain, but quietly
        let changes = board.tick(start + LINGER);
        assert_eq!(
            changes,
            vec![BoardChange::Removed {
                file: "model.onnx".to_string()
            }]
        );

        // Tracking continues; only the announcement is gone
        let changes = board.observe(&push("late.bin", 5.0), start + LINGER);
        assert!(matches!(changes.first(), Some(BoardChange::Added { .. })));
    }

    #[test]
    fn display_names_drop_paths_and_model_extensions() {
        assert_eq!(
            display_name("onnx/decoder_model_merged_quantized.onnx"),
            "decoder_model_merged_quantized"
        );
        assert_eq!(display_name("config.json"), "config");
        assert_eq!(display_name("vocab.txt"), "vocab");
        assert_eq!(display_name("weights.data"), "weights.data");
    }
}
