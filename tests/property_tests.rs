//! Property-based tests for graph validation and histories.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use active_machine::builder::{BuildError, GraphViolation, StateMachineBuilder};
use active_machine::core::{Graph, History, HistoryRetention, State, Transition};
use active_machine::export::to_graphml;
use proptest::prelude::*;
use std::collections::HashSet;

/// Distinct state names, the target indices of each state's transitions,
/// and the index of the default state.
fn arbitrary_graph_shape() -> impl Strategy<Value = (Vec<String>, Vec<Vec<usize>>, usize)> {
    prop::collection::hash_set("[a-z]{1,6}", 1..8)
        .prop_map(|names| names.into_iter().collect::<Vec<_>>())
        .prop_flat_map(|names| {
            let count = names.len();
            (
                Just(names),
                prop::collection::vec(prop::collection::vec(0..count, 0..4), count),
                0..count,
            )
        })
}

fn builder_for(
    names: &[String],
    edges: &[Vec<usize>],
    default: Option<usize>,
) -> StateMachineBuilder<String> {
    let mut builder = StateMachineBuilder::new("generated").unwrap();
    for (index, name) in names.iter().enumerate() {
        let mut state = builder.state(name.clone(), default == Some(index)).unwrap();
        for (edge, &target) in edges[index].iter().enumerate() {
            state = state.on(format!("t{edge}")).go_to(names[target].clone()).unwrap();
        }
    }
    builder
}

proptest! {
    #[test]
    fn one_default_and_known_targets_always_build(
        (names, edges, default) in arbitrary_graph_shape()
    ) {
        let graph = builder_for(&names, &edges, Some(default)).build().unwrap();

        prop_assert_eq!(graph.len(), names.len());
        prop_assert_eq!(graph.default_state().name(), names[default].as_str());

        let built: HashSet<&str> = graph.iter().map(|state| state.name()).collect();
        let declared: HashSet<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(built, declared);

        let transitions: usize = graph.iter().map(|state| state.transitions().len()).sum();
        let expected: usize = edges.iter().map(Vec::len).sum();
        prop_assert_eq!(transitions, expected);
    }

    #[test]
    fn missing_default_never_builds(
        (names, edges, _default) in arbitrary_graph_shape()
    ) {
        let result = builder_for(&names, &edges, None).build();

        match result {
            Err(BuildError::InvalidGraph(violations)) => {
                prop_assert!(violations.contains(&GraphViolation::NoDefaultState));
            }
            other => prop_assert!(false, "expected InvalidGraph, got {:?}", other.map(|g| g.len())),
        }
    }

    #[test]
    fn unknown_target_never_builds(
        (names, edges, default) in arbitrary_graph_shape()
    ) {
        let mut builder = builder_for(&names, &edges, Some(default));
        builder
            .state(names[0].clone(), default == 0)
            .unwrap()
            .on("stray".to_string())
            .go_to("no-such-state!")
            .unwrap();

        let is_unknown_target = matches!(
            builder.build(),
            Err(BuildError::InvalidGraph(ref violations))
                if violations.iter().any(|v| matches!(v, GraphViolation::UnknownTarget { .. }))
        );
        prop_assert!(is_unknown_target);
    }

    #[test]
    fn graphml_has_a_node_per_state_and_an_edge_per_transition(
        (names, edges, default) in arbitrary_graph_shape()
    ) {
        let graph = builder_for(&names, &edges, Some(default)).build().unwrap();
        let xml = to_graphml("generated", &graph);

        let expected_edges: usize = edges.iter().map(Vec::len).sum();
        prop_assert_eq!(xml.matches("<node ").count(), names.len());
        prop_assert_eq!(xml.matches("<edge ").count(), expected_edges);
    }

    #[test]
    fn multiple_defaults_are_reported(count in 2..6usize) {
        let states: Vec<State<&'static str>> = (0..count)
            .map(|i| State::new(format!("s{i}")).as_default())
            .collect();

        match Graph::new(states) {
            Err(BuildError::InvalidGraph(violations)) => {
                let reported = violations.iter().find_map(|v| match v {
                    GraphViolation::MultipleDefaultStates(names) => Some(names.len()),
                    _ => None,
                });
                prop_assert_eq!(reported, Some(count));
            }
            other => prop_assert!(false, "expected InvalidGraph, got {:?}", other.map(|g| g.len())),
        }
    }

    #[test]
    fn window_keeps_most_recent_entries(
        entries in prop::collection::vec(any::<u16>(), 0..50),
        window in 1..20usize,
    ) {
        let mut history = History::new(HistoryRetention::Window(window));
        for entry in &entries {
            history.push(*entry);
        }

        let keep = entries.len().min(window);
        prop_assert_eq!(history.len(), keep);
        prop_assert_eq!(history.to_vec(), entries[entries.len() - keep..].to_vec());
    }

    #[test]
    fn tail_returns_last_entries_in_order(
        entries in prop::collection::vec(any::<u16>(), 0..50),
        count in 0..60usize,
    ) {
        let mut history = History::default();
        for entry in &entries {
            history.push(*entry);
        }

        let take = count.min(entries.len());
        prop_assert_eq!(history.tail(Some(count)), entries[entries.len() - take..].to_vec());
        prop_assert_eq!(history.tail(None), entries.clone());
    }

    #[test]
    fn default_transition_name_spells_out_the_edge(
        source in "[A-Z][a-z]{0,4}",
        target in "[A-Z][a-z]{0,4}",
        trigger in "[a-z]{1,5}",
    ) {
        let expected = format!("{source} --{trigger}--> {target}");
        let transition = Transition::new(trigger, source, target);
        prop_assert_eq!(transition.name(), expected.as_str());
    }
}
