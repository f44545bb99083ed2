//! Terminal progress rendering for model downloads

use std::collections::HashMap;
use std::time::{Duration, Instant};

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tolka_core::{display_name, BoardChange, ProgressBoard, Push};

/// Renders download progress bars until told to wind down.
pub struct ProgressRenderer {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ProgressRenderer {
    pub fn spawn(pushes: broadcast::Receiver<Push>, linger: Duration) -> Self {
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(render(pushes, linger, stopped));
        Self { stop, task }
    }

    /// Let lingering bars clear, then stop the render task.
    pub async fn finish(self) {
        let _ = self.stop.send(());
        let _ = self.task.await;
    }
}

async fn render(
    mut pushes: broadcast::Receiver<Push>,
    linger: Duration,
    mut stopped: oneshot::Receiver<()>,
) {
    let bars = MultiProgress::new();
    let style = ProgressStyle::with_template("{prefix:>32} [{bar:30}] {percent:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    let mut board = ProgressBoard::new(linger);
    let mut active: HashMap<String, ProgressBar> = HashMap::new();
    let mut tick = tokio::time::interval(Duration::from_millis(100));
    let mut draining_until: Option<Instant> = None;

    loop {
        tokio::select! {
            push = pushes.recv() => match push {
                Ok(push) => {
                    for change in board.observe(&push, Instant::now()) {
                        apply(&bars, &style, &mut active, change);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = tick.tick() => {
                for change in board.tick(Instant::now()) {
                    apply(&bars, &style, &mut active, change);
                }
                if let Some(deadline) = draining_until {
                    if board.is_empty() || Instant::now() >= deadline {
                        break;
                    }
                }
            }
            // Guarded so the finished oneshot is never polled twice
            _ = &mut stopped, if draining_until.is_none() => {
                draining_until = Some(Instant::now() + linger + Duration::from_millis(100));
            }
        }
    }

    for bar in active.values() {
        bar.finish_and_clear();
    }
    let _ = bars.clear();
}

fn apply(
    bars: &MultiProgress,
    style: &ProgressStyle,
    active: &mut HashMap<String, ProgressBar>,
    change: BoardChange,
) {
    match change {
        BoardChange::Added { file } => {
            let bar = bars.add(ProgressBar::new(100));
            bar.set_style(style.clone());
            bar.set_prefix(display_name(&file).to_string());
            active.insert(file, bar);
        }
        BoardChange::Updated { file, progress } => {
            if let Some(bar) = active.get(&file) {
                bar.set_position(progress.clamp(0.0, 100.0) as u64);
            }
        }
        BoardChange::Removed { file } => {
            if let Some(bar) = active.remove(&file) {
                bar.finish_and_clear();
            }
        }
        BoardChange::ModelReady => {
            let _ = bars.println("Model loaded");
        }
    }
}
