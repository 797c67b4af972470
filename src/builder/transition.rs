//! Builder for transitions scoped to a state.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::{Transition, TransitionAction, TransitionPrecondition, Trigger};

/// Transition declaration kept by the builder until `build()`.
#[derive(Clone)]
pub(crate) struct PendingTransition<T: Trigger> {
    pub(crate) name: Option<String>,
    pub(crate) trigger: T,
    pub(crate) target: String,
    pub(crate) preconditions: Vec<TransitionPrecondition>,
    pub(crate) actions: Vec<TransitionAction>,
}

impl<T: Trigger> PendingTransition<T> {
    pub(crate) fn materialize(&self, source: &str) -> Transition<T> {
        let mut transition = Transition::new(self.trigger.clone(), source, self.target.clone());
        if let Some(name) = &self.name {
            transition = transition.with_name(name.clone());
        }
        for precondition in &self.preconditions {
            transition = transition.with_precondition(precondition.clone());
        }
        for action in &self.actions {
            transition = transition.with_action(action.clone());
        }
        transition
    }
}

/// Fluent builder for one outgoing transition.
///
/// Created by [`StateBuilder::on`]. Nothing is recorded until
/// [`go_to`](TransitionBuilder::go_to) is called.
pub struct TransitionBuilder<'a, T: Trigger> {
    parent: StateBuilder<'a, T>,
    name: Option<String>,
    trigger: T,
    preconditions: Vec<TransitionPrecondition>,
    actions: Vec<TransitionAction>,
}

impl<'a, T: Trigger> TransitionBuilder<'a, T> {
    pub(crate) fn new(parent: StateBuilder<'a, T>, trigger: T) -> Self {
        Self {
            parent,
            name: None,
            trigger,
            preconditions: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Set the diagnostic label of the transition.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a named precondition. All preconditions must hold.
    pub fn when<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.preconditions
            .push(TransitionPrecondition::new(name, predicate));
        self
    }

    /// Add a named action run while the transition executes.
    pub fn action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.actions.push(TransitionAction::new(name, action));
        self
    }

    /// Record the transition with `target` as destination.
    ///
    /// The target only has to exist by the time the graph is built.
    pub fn go_to(self, target: impl Into<String>) -> Result<StateBuilder<'a, T>, BuildError> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(BuildError::MissingTarget {
                state: self.parent.name().to_string(),
            });
        }

        let Self {
            mut parent,
            name,
            trigger,
            preconditions,
            actions,
        } = self;

        parent.push_transition(PendingTransition {
            name,
            trigger,
            target,
            preconditions,
            actions,
        });
        Ok(parent)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{BuildError, StateMachineBuilder};

    #[test]
    fn go_to_requires_target() {
        let mut builder = StateMachineBuilder::<&str>::new("machine").unwrap();
        let result = builder.state("A", true).unwrap().on("go").go_to("  ");

        assert!(matches!(
            result,
            Err(BuildError::MissingTarget { state }) if state == "A"
        ));
    }

    #[test]
    fn abandoned_transition_is_not_recorded() {
        let mut builder = StateMachineBuilder::<&str>::new("machine").unwrap();
        let _ = builder.state("A", true).unwrap().on("go").when("never", || false);

        let graph = builder.build().unwrap();
        assert!(graph.default_state().transitions().is_empty());
    }

    #[test]
    fn preconditions_and_actions_keep_order() {
        let mut builder = StateMachineBuilder::<&str>::new("machine").unwrap();
        builder
            .state("A", true)
            .unwrap()
            .on("go")
            .when("first", || true)
            .when("second", || true)
            .action("one", || {})
            .action("two", || {})
            .named("a-to-b")
            .go_to("B")
            .unwrap();
        builder.state("B", false).unwrap();

        let graph = builder.build().unwrap();
        let transition = &graph.default_state().transitions()[0];

        assert_eq!(transition.name(), "a-to-b");
        let preconditions: Vec<&str> = transition.preconditions().iter().map(|p| p.name()).collect();
        let actions: Vec<&str> = transition.actions().iter().map(|a| a.name()).collect();
        assert_eq!(preconditions, vec!["first", "second"]);
        assert_eq!(actions, vec!["one", "two"]);
    }
}
