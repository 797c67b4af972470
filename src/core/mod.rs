//! Core state graph types.
//!
//! This module contains the immutable building blocks of a machine:
//! - Named actions and preconditions
//! - Transitions and states
//! - The validated [`Graph`] the runtime executes
//! - Append-only [`History`] logs
//! - The [`StateMachineState`] lifecycle value
//!
//! Nothing in this module spawns tasks or takes locks; the runtime owns
//! all mutable state.

mod action;
mod graph;
mod history;
mod lifecycle;
mod state;
mod transition;
mod trigger;

pub use action::{TransitionAction, TransitionPrecondition};
pub use graph::Graph;
pub use history::{History, HistoryRetention};
pub use lifecycle::StateMachineState;
pub use state::State;
pub use transition::Transition;
pub use trigger::Trigger;
