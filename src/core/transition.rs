//! Immutable edges of the state graph.

use super::action::{TransitionAction, TransitionPrecondition};
use super::trigger::Trigger;

/// Directed edge from a source state to a target state.
///
/// A transition is a candidate whenever the machine sits in its source
/// state and a trigger equal to [`Transition::trigger`] is dequeued.
/// Preconditions are checked in declaration order and actions run in
/// declaration order.
#[derive(Clone, Debug)]
pub struct Transition<T: Trigger> {
    name: String,
    trigger: T,
    source: String,
    target: String,
    preconditions: Vec<TransitionPrecondition>,
    actions: Vec<TransitionAction>,
}

impl<T: Trigger> Transition<T> {
    /// Create a transition with no preconditions and no actions.
    ///
    /// The name defaults to `"<source> --<trigger>--> <target>"`.
    pub fn new(trigger: T, source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        let name = format!("{} --{}--> {}", source, trigger.name(), target);
        Self {
            name,
            trigger,
            source,
            target,
            preconditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Replace the diagnostic label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_precondition(mut self, precondition: TransitionPrecondition) -> Self {
        self.preconditions.push(precondition);
        self
    }

    pub fn with_action(mut self, action: TransitionAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    /// Name of the state this transition leaves.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the state this transition enters.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn preconditions(&self) -> &[TransitionPrecondition] {
        &self.preconditions
    }

    pub fn actions(&self) -> &[TransitionAction] {
        &self.actions
    }

    /// First precondition that does not hold, if any.
    pub fn first_unmet_precondition(&self) -> Option<&TransitionPrecondition> {
        self.preconditions.iter().find(|p| !p.is_valid())
    }

    /// Run every transition action in declaration order.
    pub fn execute_actions(&self) {
        for action in &self.actions {
            action.execute();
        }
    }
}
