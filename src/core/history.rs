//! Append-only history logs.
//!
//! Both the state history and the message history of a machine are
//! [`History`] values. Entries are only ever pushed at the end; reads see
//! them in append order. Growth is unbounded unless a
//! [`HistoryRetention::Window`] is configured.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How many entries a history keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRetention {
    /// Keep every entry for the lifetime of the machine.
    #[default]
    Unbounded,
    /// Keep only the most recent `n` entries. A window of zero is treated
    /// as a window of one.
    Window(usize),
}

impl HistoryRetention {
    fn limit(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Window(n) => Some((*n).max(1)),
        }
    }
}

/// Ordered, append-only sequence of entries.
///
/// # Example
///
/// ```rust
/// use active_machine::core::{History, HistoryRetention};
///
/// let mut history = History::new(HistoryRetention::Window(2));
/// history.push("a");
/// history.push("b");
/// history.push("c");
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.to_vec(), vec!["b", "c"]);
/// assert_eq!(history.last(), Some(&"c"));
/// ```
#[derive(Clone, Debug)]
pub struct History<E> {
    entries: VecDeque<E>,
    retention: HistoryRetention,
}

impl<E> Default for History<E> {
    fn default() -> Self {
        Self::new(HistoryRetention::Unbounded)
    }
}

impl<E> History<E> {
    pub fn new(retention: HistoryRetention) -> Self {
        Self {
            entries: VecDeque::new(),
            retention,
        }
    }

    /// Append an entry, evicting the oldest one if the window is full.
    pub fn push(&mut self, entry: E) {
        self.entries.push_back(entry);
        if let Some(limit) = self.retention.limit() {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&E> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }

    pub fn retention(&self) -> HistoryRetention {
        self.retention
    }
}

impl<E: Clone> History<E> {
    /// Copy every retained entry, oldest first.
    pub fn to_vec(&self) -> Vec<E> {
        self.entries.iter().cloned().collect()
    }

    /// Copy the most recent `count` entries, oldest first.
    ///
    /// `None` returns everything. A count larger than the history returns
    /// everything.
    pub fn tail(&self, count: Option<usize>) -> Vec<E> {
        let take = count.map_or(self.entries.len(), |n| n.min(self.entries.len()));
        let skip = self.entries.len() - take;
        self.entries.iter().skip(skip).cloned().collect()
    }
}
