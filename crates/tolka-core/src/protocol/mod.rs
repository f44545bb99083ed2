//! Wire protocol: message shapes and the request broker

mod broker;
mod message;

pub use broker::{BrokerHandle, MessageBroker};
pub use message::{ErrorReply, Push, Request};
