//! Serializable description of a graph.

use crate::core::{Graph, State, Transition, Trigger};
use serde::{Deserialize, Serialize};

/// Plain-data view of a [`Graph`], for tooling that cannot hold closures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub default_state: String,
    pub states: Vec<StateSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub name: String,
    pub is_default: bool,
    pub is_terminal: bool,
    pub entry_actions: Vec<String>,
    pub exit_actions: Vec<String>,
    pub transitions: Vec<TransitionSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSnapshot {
    pub name: String,
    pub trigger: String,
    pub source: String,
    pub target: String,
    pub preconditions: Vec<String>,
    pub actions: Vec<String>,
}

impl GraphSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn state(&self, name: &str) -> Option<&StateSnapshot> {
        self.states.iter().find(|state| state.name == name)
    }
}

impl<T: Trigger> From<&Graph<T>> for GraphSnapshot {
    fn from(graph: &Graph<T>) -> Self {
        Self {
            default_state: graph.default_state().name().to_string(),
            states: graph.iter().map(|state| StateSnapshot::from(state.as_ref())).collect(),
        }
    }
}

impl<T: Trigger> From<&State<T>> for StateSnapshot {
    fn from(state: &State<T>) -> Self {
        Self {
            name: state.name().to_string(),
            is_default: state.is_default(),
            is_terminal: state.is_terminal(),
            entry_actions: state.entry_actions().iter().map(|a| a.name().to_string()).collect(),
            exit_actions: state.exit_actions().iter().map(|a| a.name().to_string()).collect(),
            transitions: state.transitions().iter().map(TransitionSnapshot::from).collect(),
        }
    }
}

impl<T: Trigger> From<&Transition<T>> for TransitionSnapshot {
    fn from(transition: &Transition<T>) -> Self {
        Self {
            name: transition.name().to_string(),
            trigger: transition.trigger().name().into_owned(),
            source: transition.source().to_string(),
            target: transition.target().to_string(),
            preconditions: transition
                .preconditions()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
            actions: transition.actions().iter().map(|a| a.name().to_string()).collect(),
        }
    }
}
