//! Active Machine: asynchronous finite state machines driven by messages.
//!
//! A machine is declared with a fluent builder, validated into an immutable
//! graph, and run by an actor that consumes triggers from a bounded queue on
//! a single worker task. Everything the machine does is published as an
//! addressed, timestamped message to its observers and kept in a history.
//!
//! # Core Concepts
//!
//! - **Graph**: validated states and transitions, see [`core`]
//! - **Builder**: fluent declaration of a graph, see [`builder`]
//! - **Messages**: commands and requests in, events and replies out, see [`messages`]
//! - **Runtime**: the [`StateMachine`] actor with its lifecycle, see [`runtime`]
//! - **Export**: GraphML and JSON renderings of a graph, see [`export`]
//!
//! # Example
//!
//! ```rust
//! use active_machine::messages::{Event, Message};
//! use active_machine::{MachineConfig, StateMachine, StateMachineBuilder};
//! use std::sync::{Arc, Mutex};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut builder = StateMachineBuilder::new("turnstile").unwrap();
//! builder.state("Locked", true).unwrap().on("coin").go_to("Unlocked").unwrap();
//! builder.state("Unlocked", false).unwrap().on("push").go_to("Locked").unwrap();
//!
//! let machine = StateMachine::from_builder(&builder, MachineConfig::default()).unwrap();
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let _subscription = machine.subscribe(move |message: &Message<&'static str>| {
//!     sink.lock().unwrap().push(message.name().to_string());
//! });
//!
//! machine.send(Message::start("operator", "turnstile")).await;
//! machine.send(Message::fire("operator", "turnstile", "coin")).await;
//! machine.complete();
//! # while !machine.lifecycle().is_final() { tokio::task::yield_now().await; }
//!
//! assert_eq!(machine.current_state().name(), "Unlocked");
//! assert!(seen.lock().unwrap().contains(&"completed".to_string()));
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod export;
pub mod messages;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use core::{Graph, State, StateMachineState, Transition, Trigger};
pub use messages::{Message, MessageKind};
pub use runtime::{FireOutcome, MachineConfig, MachineError, StateMachine, Subscription};
