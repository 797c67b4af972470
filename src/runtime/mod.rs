//! The asynchronous runtime that executes a [`Graph`](crate::core::Graph).
//!
//! A [`StateMachine`] owns a bounded trigger queue and a single worker task.
//! Callers drive it through lifecycle methods, [`StateMachine::fire`] and
//! [`StateMachine::send`]; observers registered with
//! [`StateMachine::subscribe`] see every event and reply it emits.

mod config;
mod error;
mod gate;
mod machine;
mod observer;
mod worker;

pub use config::{MachineConfig, DEFAULT_QUEUE_CAPACITY};
pub use error::{ConfigError, MachineError};
pub use machine::{FireOutcome, StateMachine};
pub use observer::{Observer, Subscription};
