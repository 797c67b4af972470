//! Validated, immutable state graphs.

use super::state::State;
use super::trigger::Trigger;
use crate::builder::error::{BuildError, GraphViolation};
use std::collections::HashSet;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<GraphViolation>>;

/// Directed multigraph of states keyed by name.
///
/// A graph always satisfies three invariants: exactly one default state,
/// unique state names, and every transition target names a state of the
/// graph. Cloning is cheap; clones share the same states.
///
/// # Example
///
/// ```rust
/// use active_machine::core::{Graph, State, Transition};
///
/// let graph = Graph::new(vec![
///     State::new("A").as_default().with_transition(Transition::new("go", "A", "B")),
///     State::new("B"),
/// ])
/// .unwrap();
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.default_state().name(), "A");
/// assert!(graph.get("B").is_some());
/// ```
#[derive(Debug)]
pub struct Graph<T: Trigger> {
    states: Arc<[Arc<State<T>>]>,
    default_index: usize,
}

impl<T: Trigger> Clone for Graph<T> {
    fn clone(&self) -> Self {
        Self {
            states: Arc::clone(&self.states),
            default_index: self.default_index,
        }
    }
}

impl<T: Trigger> Graph<T> {
    /// Validate `states` and freeze them into a graph.
    ///
    /// Every violation is collected; the error lists all of them rather
    /// than only the first one found.
    pub fn new(states: Vec<State<T>>) -> Result<Self, BuildError> {
        let checks: Vec<Check> = vec![
            check_default_state(&states),
            check_unique_names(&states),
            check_targets(&states),
        ];

        if let Validation::Failure(violations) = Validation::all_vec(checks) {
            return Err(BuildError::InvalidGraph(
                violations.iter().cloned().collect(),
            ));
        }

        let default_index = states
            .iter()
            .position(State::is_default)
            .ok_or_else(|| BuildError::InvalidGraph(vec![GraphViolation::NoDefaultState]))?;

        Ok(Self {
            states: states.into_iter().map(Arc::new).collect(),
            default_index,
        })
    }

    /// Freeze `states` without validating them.
    #[cfg(test)]
    pub(crate) fn unchecked(states: Vec<State<T>>, default_index: usize) -> Self {
        Self {
            states: states.into_iter().map(Arc::new).collect(),
            default_index,
        }
    }

    /// States in declaration order.
    pub fn states(&self) -> &[Arc<State<T>>] {
        &self.states
    }

    pub fn default_state(&self) -> &Arc<State<T>> {
        &self.states[self.default_index]
    }

    pub fn get(&self, name: &str) -> Option<&Arc<State<T>>> {
        self.states.iter().find(|s| s.name() == name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<State<T>>> {
        self.states.iter()
    }
}

fn check_default_state<T: Trigger>(states: &[State<T>]) -> Check {
    let defaults: Vec<String> = states
        .iter()
        .filter(|s| s.is_default())
        .map(|s| s.name().to_string())
        .collect();

    match defaults.len() {
        1 => Validation::success(()),
        0 => Validation::fail(GraphViolation::NoDefaultState),
        _ => Validation::fail(GraphViolation::MultipleDefaultStates(defaults)),
    }
}

fn check_unique_names<T: Trigger>(states: &[State<T>]) -> Check {
    let mut seen = HashSet::new();
    let mut checks: Vec<Check> = Vec::new();
    for state in states {
        if !seen.insert(state.name()) {
            checks.push(Validation::fail(GraphViolation::DuplicateStateName(
                state.name().to_string(),
            )));
        }
    }
    Validation::all_vec(checks).map(|_| ())
}

fn check_targets<T: Trigger>(states: &[State<T>]) -> Check {
    let names: HashSet<&str> = states.iter().map(State::name).collect();
    let mut checks: Vec<Check> = Vec::new();
    for state in states {
        for transition in state.transitions() {
            if !names.contains(transition.target()) {
                checks.push(Validation::fail(GraphViolation::UnknownTarget {
                    state: state.name().to_string(),
                    transition: transition.name().to_string(),
                    target: transition.target().to_string(),
                }));
            }
        }
    }
    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;

    fn violations(result: Result<Graph<&'static str>, BuildError>) -> Vec<GraphViolation> {
        match result {
            Err(BuildError::InvalidGraph(v)) => v,
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected invalid graph"),
        }
    }

    #[test]
    fn valid_graph_keeps_declaration_order() {
        let graph: Graph<&str> = Graph::new(vec![
            State::new("A").as_default(),
            State::new("B"),
            State::new("C"),
        ])
        .unwrap();

        let names: Vec<&str> = graph.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(graph.default_state().name(), "A");
    }

    #[test]
    fn missing_default_is_rejected() {
        let found = violations(Graph::new(vec![State::new("A"), State::new("B")]));
        assert_eq!(found, vec![GraphViolation::NoDefaultState]);
    }

    #[test]
    fn empty_graph_is_rejected() {
        let found = violations(Graph::new(Vec::new()));
        assert_eq!(found, vec![GraphViolation::NoDefaultState]);
    }

    #[test]
    fn multiple_defaults_are_rejected() {
        let found = violations(Graph::new(vec![
            State::new("A").as_default(),
            State::new("B").as_default(),
        ]));

        assert_eq!(
            found,
            vec![GraphViolation::MultipleDefaultStates(vec![
                "A".to_string(),
                "B".to_string()
            ])]
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let found = violations(Graph::new(vec![
            State::new("A").as_default(),
            State::new("A"),
        ]));

        assert_eq!(found, vec![GraphViolation::DuplicateStateName("A".to_string())]);
    }

    #[test]
    fn all_violations_are_accumulated() {
        let found = violations(Graph::new(vec![
            State::new("A").with_transition(Transition::new("x", "A", "Nowhere")),
            State::new("B").with_transition(Transition::new("y", "B", "Elsewhere")),
        ]));

        assert_eq!(found.len(), 3);
        assert!(found.contains(&GraphViolation::NoDefaultState));
        assert!(found
            .iter()
            .any(|v| matches!(v, GraphViolation::UnknownTarget { target, .. } if target == "Nowhere")));
        assert!(found
            .iter()
            .any(|v| matches!(v, GraphViolation::UnknownTarget { target, .. } if target == "Elsewhere")));
    }

    #[test]
    fn clones_share_states() {
        let graph = Graph::new(vec![State::<&str>::new("A").as_default()]).unwrap();
        let clone = graph.clone();

        assert!(Arc::ptr_eq(graph.default_state(), clone.default_state()));
    }
}
