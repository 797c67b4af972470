//! Runtime configuration for a machine.

use crate::core::HistoryRetention;
use crate::runtime::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default number of triggers the queue holds before `fire` waits.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Tunables of a [`StateMachine`](crate::runtime::StateMachine).
///
/// Every field has a default, so a partial JSON document is enough.
///
/// # Example
///
/// ```rust
/// use active_machine::core::HistoryRetention;
/// use active_machine::runtime::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "queue_capacity": 8 }"#).unwrap();
/// assert_eq!(config.queue_capacity, 8);
/// assert_eq!(config.message_retention, HistoryRetention::Unbounded);
///
/// let config = MachineConfig::default().with_message_retention(HistoryRetention::Window(100));
/// assert_eq!(config.message_retention, HistoryRetention::Window(100));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Capacity of the bounded trigger queue.
    pub queue_capacity: usize,
    /// Retention of the state history. The current state is always kept.
    pub state_retention: HistoryRetention,
    /// Retention of the message history.
    pub message_retention: HistoryRetention,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            state_retention: HistoryRetention::Unbounded,
            message_retention: HistoryRetention::Unbounded,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity);
        }
        Ok(config)
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_state_retention(mut self, retention: HistoryRetention) -> Self {
        self.state_retention = retention;
        self
    }

    pub fn with_message_retention(mut self, retention: HistoryRetention) -> Self {
        self.message_retention = retention;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded() {
        let config = MachineConfig::default();

        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert_eq!(config.state_retention, HistoryRetention::Unbounded);
        assert_eq!(config.message_retention, HistoryRetention::Unbounded);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn json_overrides_fields() {
        let config = MachineConfig::from_json(
            r#"{ "queue_capacity": 2, "state_retention": { "window": 5 } }"#,
        )
        .unwrap();

        assert_eq!(config.queue_capacity, 2);
        assert_eq!(config.state_retention, HistoryRetention::Window(5));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            MachineConfig::from_json(r#"{ "queue_capacity": 0 }"#),
            Err(ConfigError::InvalidQueueCapacity)
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = MachineConfig::from_json("{ not json").unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse machine configuration"));
    }
}
