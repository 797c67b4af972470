//! Immutable nodes of the state graph.

use super::action::TransitionAction;
use super::transition::Transition;
use super::trigger::Trigger;

/// A named state with its outgoing transitions and entry/exit actions.
///
/// States are usually produced by
/// [`StateMachineBuilder`](crate::builder::StateMachineBuilder), but can be
/// assembled by hand and validated through
/// [`Graph::new`](crate::core::Graph::new).
///
/// # Example
///
/// ```rust
/// use active_machine::core::{State, Transition};
///
/// let locked = State::new("Locked")
///     .as_default()
///     .with_transition(Transition::new("coin", "Locked", "Unlocked"));
///
/// assert_eq!(locked.name(), "Locked");
/// assert!(locked.is_default());
/// assert_eq!(locked.transitions_for(&"coin").count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct State<T: Trigger> {
    name: String,
    transitions: Vec<Transition<T>>,
    entry_actions: Vec<TransitionAction>,
    exit_actions: Vec<TransitionAction>,
    is_default: bool,
    is_terminal: bool,
}

impl<T: Trigger> State<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            is_default: false,
            is_terminal: false,
        }
    }

    /// Mark this state as the one a machine starts in.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Mark this state as an intentional sink.
    ///
    /// The flag is advisory. The runtime never consults it; it is carried
    /// for export and diagnostics.
    pub fn as_terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }

    pub fn with_transition(mut self, transition: Transition<T>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn with_entry_action(mut self, action: TransitionAction) -> Self {
        self.entry_actions.push(action);
        self
    }

    pub fn with_exit_action(mut self, action: TransitionAction) -> Self {
        self.exit_actions.push(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions(&self) -> &[Transition<T>] {
        &self.transitions
    }

    pub fn entry_actions(&self) -> &[TransitionAction] {
        &self.entry_actions
    }

    pub fn exit_actions(&self) -> &[TransitionAction] {
        &self.exit_actions
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Outgoing transitions fired by `trigger`, in declaration order.
    pub fn transitions_for<'a>(&'a self, trigger: &'a T) -> impl Iterator<Item = &'a Transition<T>> {
        self.transitions
            .iter()
            .filter(move |t| t.trigger() == trigger)
    }

    pub(crate) fn run_entry_actions(&self) {
        for action in &self.entry_actions {
            action.execute();
        }
    }

    pub(crate) fn run_exit_actions(&self) {
        for action in &self.exit_actions {
            action.execute();
        }
    }
}
