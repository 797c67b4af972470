//! Build errors for state graphs.

use thiserror::Error;

/// Errors raised while declaring or building a state graph.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("{what} name must not be blank")]
    BlankName { what: &'static str },

    #[error("Default state already set to '{existing}', cannot also make '{requested}' the default")]
    DefaultStateConflict { existing: String, requested: String },

    #[error("Transition from state '{state}' has no target. Call .go_to(name) with a state name")]
    MissingTarget { state: String },

    #[error("State graph is invalid: {}", format_violations(.0))]
    InvalidGraph(Vec<GraphViolation>),
}

/// A single broken graph invariant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphViolation {
    #[error("exactly one default state is required, none was declared")]
    NoDefaultState,

    #[error("exactly one default state is required, found {}", .0.join(", "))]
    MultipleDefaultStates(Vec<String>),

    #[error("state name '{0}' is declared more than once")]
    DuplicateStateName(String),

    #[error("state '{state}' has transition '{transition}' to undefined target '{target}'")]
    UnknownTarget {
        state: String,
        transition: String,
        target: String,
    },
}

fn format_violations(violations: &[GraphViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
