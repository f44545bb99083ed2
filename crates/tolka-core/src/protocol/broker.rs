//! Request routing between client contexts and the translation engine

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::pipeline::ProgressReceiver;
use crate::protocol::message::{ErrorReply, Push, Request};
use crate::runtime::TranslationEngine;

/// One queued request with its reply slot
struct Envelope {
    id: String,
    message: Value,
    respond: oneshot::Sender<Value>,
}

/// Client side of the broker: send requests, subscribe to pushes.
/// Cheap to clone; every clone talks to the same broker task.
#[derive(Clone)]
pub struct BrokerHandle {
    requests: mpsc::Sender<Envelope>,
    pushes: broadcast::Sender<Push>,
}

impl BrokerHandle {
    /// Send a raw wire message and await its reply.
    ///
    /// Every accepted message gets exactly one reply: a result payload or an
    /// `{"error": ...}` object. `Err` here only means the broker is gone.
    pub async fn request(&self, message: Value) -> Result<Value> {
        let (respond, reply) = oneshot::channel();
        let envelope = Envelope {
            id: Uuid::new_v4().to_string(),
            message,
            respond,
        };
        self.requests
            .send(envelope)
            .await
            .map_err(|_| Error::ChannelClosed("message broker is not running".to_string()))?;
        reply
            .await
            .map_err(|_| Error::ChannelClosed("reply channel dropped".to_string()))
    }

    /// Typed convenience over [`BrokerHandle::request`]
    pub async fn send(&self, request: &Request) -> Result<Value> {
        let message = serde_json::to_value(request)
            .map_err(|e| Error::InvalidRequest(e.to_string()))?;
        self.request(message).await
    }

    /// Subscribe to progress pushes.
    ///
    /// Pushes are fire-and-forget: events sent while nobody subscribes are
    /// dropped, and a lagging subscriber loses the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<Push> {
        self.pushes.subscribe()
    }
}

/// Dispatches wire requests to the engine, one independent task each.
pub struct MessageBroker {
    engine: Arc<TranslationEngine>,
    pushes: broadcast::Sender<Push>,
}

impl MessageBroker {
    /// Start the broker loop; the returned handle is the only way in.
    pub fn spawn(engine: Arc<TranslationEngine>) -> BrokerHandle {
        let (requests_tx, mut requests_rx) =
            mpsc::channel(engine.config().mailbox_capacity.max(1));
        let (pushes_tx, _) = broadcast::channel(engine.config().progress_capacity.max(1));

        let broker = MessageBroker {
            engine,
            pushes: pushes_tx.clone(),
        };
        tokio::spawn(async move {
            while let Some(envelope) = requests_rx.recv().await {
                broker.dispatch(envelope);
            }
            debug!("Broker mailbox closed");
        });

        BrokerHandle {
            requests: requests_tx,
            pushes: pushes_tx,
        }
    }

    /// Spawn an independent handler; requests never queue behind each other.
    fn dispatch(&self, envelope: Envelope) {
        let engine = self.engine.clone();
        let pushes = self.pushes.clone();
        tokio::spawn(async move {
            let Envelope {
                id,
                message,
                respond,
            } = envelope;
            let reply = handle_message(engine, pushes, &id, message).await;
            // A requester that went away is not an error
            let _ = respond.send(reply);
        });
    }
}

/// Route one wire message and produce its reply payload.
///
/// This is the only boundary where internal errors become `{"error"}`
/// objects; nothing below it crosses a context boundary.
async fn handle_message(
    engine: Arc<TranslationEngine>,
    pushes: broadcast::Sender<Push>,
    id: &str,
    message: Value,
) -> Value {
    let action = message.get("action").cloned();
    let request: Request = match serde_json::from_value(message) {
        Ok(request) => request,
        Err(parse_err) => {
            let error = unparseable_request(action, &parse_err);
            warn!("Request {} rejected: {}", id, error);
            return error_reply(&error);
        }
    };
    debug!("Request {} action {}", id, request.action());

    let (observer, events) = mpsc::unbounded_channel();
    relay_progress(pushes, events);

    let reply = match request {
        Request::Translate(request) => engine
            .translate(request, Some(observer))
            .await
            .map(|translation| success_reply(&translation)),
        Request::AutoDetect(request) => engine
            .auto_translate(request, Some(observer))
            .await
            .map(|outcome| success_reply(&outcome)),
    };

    match reply {
        Ok(value) => value,
        Err(err) => {
            warn!("Request {} failed: {}", id, err);
            error_reply(&err)
        }
    }
}

/// Classify a message that failed to parse: recognized actions are invalid
/// requests; anything else is an unknown action, rendered as it was sent.
fn unparseable_request(action: Option<Value>, parse_err: &serde_json::Error) -> Error {
    match action.as_ref().and_then(Value::as_str) {
        Some("translate") | Some("auto-detect") => Error::InvalidRequest(parse_err.to_string()),
        Some(other) => Error::UnknownAction(other.to_string()),
        None => match action {
            Some(value) => Error::UnknownAction(value.to_string()),
            None => Error::UnknownAction("(missing)".to_string()),
        },
    }
}

/// Forward user-visible progress events into the broadcast channel.
fn relay_progress(pushes: broadcast::Sender<Push>, mut events: ProgressReceiver) {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if !event.is_progress() {
                continue;
            }
            // No subscriber is fine; pushes are fire-and-forget
            let _ = pushes.send(Push::Progress {
                file: event.file,
                progress: event.progress,
                loaded: event.loaded,
                total: event.total,
            });
        }
    });
}

fn success_reply<T: serde::Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload)
        .unwrap_or_else(|err| json!({ "error": format!("Reply serialization failed: {err}") }))
}

fn error_reply(error: &Error) -> Value {
    success_reply(&ErrorReply {
        error: error.to_string(),
    })
}
