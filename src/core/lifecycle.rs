//! Lifecycle of a running machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actor-wide lifecycle value of a [`StateMachine`](crate::runtime::StateMachine).
///
/// This is distinct from the graph state the machine currently occupies:
/// a machine can sit in graph state `Locked` while being `Paused`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateMachineState {
    Initialized,
    Running,
    Paused,
    Stopped,
    Completed,
}

impl StateMachineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
        }
    }

    /// `Stopped` and `Completed` are final; no lifecycle call leaves them.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Stopped | Self::Completed)
    }

    pub fn can_start(&self) -> bool {
        matches!(self, Self::Initialized | Self::Paused)
    }

    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Paused)
    }
}

impl fmt::Display for StateMachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
