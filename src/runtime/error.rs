//! Errors raised while constructing a machine.

use crate::builder::BuildError;
use thiserror::Error;

/// Errors that prevent a [`StateMachine`](crate::runtime::StateMachine)
/// from being created.
///
/// Once a machine exists, nothing on its public API returns an error:
/// misuse is logged and ignored, and transition problems are reported as
/// `error` events.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Machine name must not be blank")]
    BlankName,

    #[error("Queue capacity must be at least 1")]
    InvalidQueueCapacity,

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Errors raised while loading a [`MachineConfig`](crate::runtime::MachineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Queue capacity must be at least 1")]
    InvalidQueueCapacity,
}
