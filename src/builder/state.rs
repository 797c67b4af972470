//! Builder for a single state.

use crate::builder::transition::{PendingTransition, TransitionBuilder};
use crate::core::{State, TransitionAction, Trigger};

/// Accumulated declaration of one state.
pub(crate) struct StateEntry<T: Trigger> {
    pub(crate) name: String,
    pub(crate) is_default: bool,
    pub(crate) is_terminal: bool,
    pub(crate) entry_actions: Vec<TransitionAction>,
    pub(crate) exit_actions: Vec<TransitionAction>,
    pub(crate) transitions: Vec<PendingTransition<T>>,
}

impl<T: Trigger> StateEntry<T> {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            is_default: false,
            is_terminal: false,
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub(crate) fn materialize(&self) -> State<T> {
        let mut state = State::new(self.name.clone());
        if self.is_default {
            state = state.as_default();
        }
        if self.is_terminal {
            state = state.as_terminal();
        }
        for action in &self.entry_actions {
            state = state.with_entry_action(action.clone());
        }
        for action in &self.exit_actions {
            state = state.with_exit_action(action.clone());
        }
        for pending in &self.transitions {
            state = state.with_transition(pending.materialize(&self.name));
        }
        state
    }
}

/// Fluent handle on one state of a
/// [`StateMachineBuilder`](crate::builder::StateMachineBuilder).
pub struct StateBuilder<'a, T: Trigger> {
    entry: &'a mut StateEntry<T>,
}

impl<'a, T: Trigger> StateBuilder<'a, T> {
    pub(crate) fn new(entry: &'a mut StateEntry<T>) -> Self {
        Self { entry }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Mark the state as an intentional sink with no outgoing transitions.
    ///
    /// Advisory only; transitions may still be added.
    pub fn as_terminal(self) -> Self {
        self.entry.is_terminal = true;
        self
    }

    /// Add an action run every time the state is entered.
    pub fn on_enter<F>(self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.entry
            .entry_actions
            .push(TransitionAction::new(name, action));
        self
    }

    /// Add an action run every time the state is left.
    pub fn on_exit<F>(self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.entry
            .exit_actions
            .push(TransitionAction::new(name, action));
        self
    }

    /// Start declaring a transition fired by `trigger`.
    pub fn on(self, trigger: T) -> TransitionBuilder<'a, T> {
        TransitionBuilder::new(self, trigger)
    }

    pub(crate) fn push_transition(&mut self, pending: PendingTransition<T>) {
        self.entry.transitions.push(pending);
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::StateMachineBuilder;

    #[test]
    fn state_builder_records_actions_and_flags() {
        let mut builder = StateMachineBuilder::<u32>::new("machine").unwrap();
        builder
            .state("Done", true)
            .unwrap()
            .on_enter("celebrate", || {})
            .on_exit("cleanup", || {})
            .as_terminal();

        let graph = builder.build().unwrap();
        let done = graph.get("Done").unwrap();

        assert!(done.is_terminal());
        assert_eq!(done.entry_actions()[0].name(), "celebrate");
        assert_eq!(done.exit_actions()[0].name(), "cleanup");
    }

    #[test]
    fn go_to_returns_to_state_for_further_transitions() {
        let mut builder = StateMachineBuilder::<u32>::new("machine").unwrap();
        builder
            .state("A", true)
            .unwrap()
            .on(1)
            .go_to("B")
            .unwrap()
            .on(2)
            .go_to("A")
            .unwrap();
        builder.state("B", false).unwrap();

        let graph = builder.build().unwrap();
        let triggers: Vec<u32> = graph
            .get("A")
            .unwrap()
            .transitions()
            .iter()
            .map(|t| *t.trigger())
            .collect();
        assert_eq!(triggers, vec![1, 2]);
    }
}
