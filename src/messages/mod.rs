//! Messages exchanged with a running machine.
//!
//! Every message is an immutable [`Message`] envelope: a serializable
//! [`MessageHeader`] (id, timestamp, version, name, source, target, info)
//! plus a typed [`MessageKind`]:
//!
//! - [`Command`]: `start`, `pause`, `resume`, `stop`, `fire`
//! - [`Request`]: `get-state`, `get-state-history`, `get-possible-states`,
//!   `get-message-history`
//! - [`Event`]: `initialized`, `started`, `paused`, `resumed`, `stopped`,
//!   `completed`, `info`, `error`
//! - [`Reply`]: `state`, `state-history`, `possible-states`,
//!   `message-history`

mod envelope;
mod kind;

pub use envelope::{Message, MessageHeader, Version};
pub use kind::{Command, Event, Fault, MessageKind, Reply, Request};
