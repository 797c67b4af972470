//! Builder for constructing state graphs.

use crate::builder::error::BuildError;
use crate::builder::state::{StateBuilder, StateEntry};
use crate::core::{Graph, Trigger};
use std::collections::HashMap;

/// Builder for declaring states and transitions with a fluent API.
///
/// States are looked up by name: calling [`state`](Self::state) twice with
/// the same name returns the same declaration, so transitions can be added
/// to a state from several places. Declaration order is kept everywhere.
///
/// # Example
///
/// ```rust
/// use active_machine::builder::StateMachineBuilder;
///
/// let mut builder = StateMachineBuilder::new("turnstile").unwrap();
/// builder
///     .state("Locked", true)
///     .unwrap()
///     .on("coin")
///     .go_to("Unlocked")
///     .unwrap();
/// builder
///     .state("Unlocked", false)
///     .unwrap()
///     .on("push")
///     .go_to("Locked")
///     .unwrap();
///
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.default_state().name(), "Locked");
/// ```
pub struct StateMachineBuilder<T: Trigger> {
    machine_name: String,
    states: Vec<StateEntry<T>>,
    index: HashMap<String, usize>,
    default_state: Option<String>,
}

impl<T: Trigger> StateMachineBuilder<T> {
    /// Create a builder for the machine called `machine_name`.
    pub fn new(machine_name: impl Into<String>) -> Result<Self, BuildError> {
        let machine_name = machine_name.into();
        if machine_name.trim().is_empty() {
            return Err(BuildError::BlankName { what: "Machine" });
        }

        Ok(Self {
            machine_name,
            states: Vec::new(),
            index: HashMap::new(),
            default_state: None,
        })
    }

    pub fn machine_name(&self) -> &str {
        &self.machine_name
    }

    /// Declare a state, or reopen one declared earlier.
    ///
    /// Marking a second, different state as default fails with
    /// [`BuildError::DefaultStateConflict`]. Marking the same state as
    /// default again is a no-op.
    pub fn state(
        &mut self,
        name: impl Into<String>,
        is_default: bool,
    ) -> Result<StateBuilder<'_, T>, BuildError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BuildError::BlankName { what: "State" });
        }

        if is_default {
            match &self.default_state {
                Some(existing) if *existing != name => {
                    return Err(BuildError::DefaultStateConflict {
                        existing: existing.clone(),
                        requested: name,
                    });
                }
                Some(_) => {}
                None => self.default_state = Some(name.clone()),
            }
        }

        let position = match self.index.get(&name) {
            Some(&position) => position,
            None => {
                self.states.push(StateEntry::new(name.clone()));
                let position = self.states.len() - 1;
                self.index.insert(name, position);
                position
            }
        };

        let entry = &mut self.states[position];
        if is_default {
            entry.is_default = true;
        }
        Ok(StateBuilder::new(entry))
    }

    /// Validate the declarations and produce an immutable graph.
    ///
    /// Fails when no default state was declared or when a transition
    /// targets a state that was never declared. The builder is left
    /// untouched, so `build` may be called again.
    pub fn build(&self) -> Result<Graph<T>, BuildError> {
        let states = self.states.iter().map(StateEntry::materialize).collect();
        Graph::new(states)
    }
}
