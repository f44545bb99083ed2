//! Pipeline instance lifecycle management

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::pipeline::backend::{PipelineFactory, TextPipeline};
use crate::pipeline::kind::PipelineKind;
use crate::pipeline::progress::ProgressSender;

/// Per-kind singleton holder with lazy, de-duplicated construction.
///
/// The first caller for a kind starts exactly one backend build; callers
/// arriving while it is in flight share that build's outcome and may register
/// their own progress observers. A failed build clears the slot, so the next
/// call re-attempts construction instead of replaying the old failure.
pub struct PipelineCache {
    config: EngineConfig,
    factory: Arc<dyn PipelineFactory>,
    slots: Arc<Mutex<HashMap<PipelineKind, Slot>>>,
}

enum Slot {
    /// Construction in flight
    Loading(LoadingSlot),
    /// Instance ready to share
    Ready(Arc<dyn TextPipeline>),
}

struct LoadingSlot {
    waiters: Vec<oneshot::Sender<Result<Arc<dyn TextPipeline>>>>,
    observers: Arc<Mutex<Vec<ProgressSender>>>,
}

impl PipelineCache {
    pub fn new(config: EngineConfig, factory: Arc<dyn PipelineFactory>) -> Self {
        Self {
            config,
            factory,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the shared instance for `kind`, building it on first use.
    ///
    /// Suspends until the instance is ready. `observer` receives every
    /// progress event of a build that starts now or is already in flight;
    /// it is dropped once the build settles.
    pub async fn instance(
        &self,
        kind: PipelineKind,
        observer: Option<ProgressSender>,
    ) -> Result<Arc<dyn TextPipeline>> {
        // The registry lock is never held across an await
        let (pending, register) = {
            let mut slots = self.slots.lock().await;
            match slots.get_mut(&kind) {
                Some(Slot::Ready(pipeline)) => return Ok(pipeline.clone()),
                Some(Slot::Loading(slot)) => {
                    debug!("Joining in-flight {} build", kind);
                    let (done_tx, done_rx) = oneshot::channel();
                    slot.waiters.push(done_tx);
                    let register = observer.map(|sink| (slot.observers.clone(), sink));
                    (done_rx, register)
                }
                None => {
                    let observers = Arc::new(Mutex::new(observer.into_iter().collect::<Vec<_>>()));
                    let (done_tx, done_rx) = oneshot::channel();
                    slots.insert(
                        kind,
                        Slot::Loading(LoadingSlot {
                            waiters: vec![done_tx],
                            observers: observers.clone(),
                        }),
                    );
                    self.spawn_build(kind, observers);
                    (done_rx, None)
                }
            }
        };

        if let Some((observers, sink)) = register {
            // A build that settles in this window has no more events to
            // deliver; the late registration is harmless
            observers.lock().await.push(sink);
        }

        match pending.await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::ChannelClosed(format!("{kind} build task dropped"))),
        }
    }

    /// Start the construction task for `kind` plus a relay that fans backend
    /// progress out to every observer registered so far.
    fn spawn_build(&self, kind: PipelineKind, observers: Arc<Mutex<Vec<ProgressSender>>>) {
        let factory = self.factory.clone();
        let slots = self.slots.clone();
        let model_id = self.config.model_id(kind);

        let (progress_tx, mut progress_rx): (ProgressSender, _) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(event) = progress_rx.recv().await {
                let mut sinks = observers.lock().await;
                sinks.retain(|sink| sink.send(event.clone()).is_ok());
            }
        });

        tokio::spawn(async move {
            info!("Building {} pipeline from {}", kind, model_id);
            let outcome = factory.create(kind, &model_id, progress_tx).await;

            let waiters = {
                let mut slots = slots.lock().await;
                // Only this task settles the slot it installed
                let Some(Slot::Loading(slot)) = slots.remove(&kind) else {
                    return;
                };
                match &outcome {
                    Ok(pipeline) => {
                        info!("{} pipeline ready", kind);
                        slots.insert(kind, Slot::Ready(pipeline.clone()));
                    }
                    Err(err) => {
                        warn!("{} build failed, slot cleared for retry: {}", kind, err);
                    }
                }
                slot.waiters
            };

            for waiter in waiters {
                let _ = waiter.send(outcome.clone());
            }
        });
    }
}
