//! Named callables attached to states and transitions.
//!
//! Actions are units of work run on entry, exit, or while a transition
//! executes. Preconditions are boolean guards evaluated right before a
//! transition is allowed to run. Both carry a name so that rejections and
//! exports can refer to them.

use std::fmt;
use std::sync::Arc;

/// Named unit of work executed by the runtime.
///
/// Cloning an action shares the underlying callable.
///
/// # Example
///
/// ```rust
/// use active_machine::core::TransitionAction;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let counter = Arc::new(AtomicUsize::new(0));
/// let c = Arc::clone(&counter);
/// let action = TransitionAction::new("count", move || {
///     c.fetch_add(1, Ordering::SeqCst);
/// });
///
/// action.execute();
/// assert_eq!(action.name(), "count");
/// assert_eq!(counter.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct TransitionAction {
    name: String,
    action: Arc<dyn Fn() + Send + Sync>,
}

impl TransitionAction {
    /// Wrap a callable under the given name.
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            action: Arc::new(action),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the wrapped callable.
    pub fn execute(&self) {
        (self.action)()
    }
}

impl fmt::Debug for TransitionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionAction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Named guard that must hold for a transition to execute.
///
/// # Example
///
/// ```rust
/// use active_machine::core::TransitionPrecondition;
///
/// let always = TransitionPrecondition::new("always", || true);
/// let never = TransitionPrecondition::new("never", || false);
///
/// assert!(always.is_valid());
/// assert!(!never.is_valid());
/// ```
#[derive(Clone)]
pub struct TransitionPrecondition {
    name: String,
    predicate: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl TransitionPrecondition {
    /// Wrap a predicate under the given name.
    ///
    /// The predicate is evaluated on the worker every time a candidate
    /// transition is considered, so it should be cheap and must not block.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate.
    pub fn is_valid(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for TransitionPrecondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionPrecondition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn action_runs_callable_every_time() {
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        let action = TransitionAction::new("tick", move || {
            r.fetch_add(1, Ordering::SeqCst);
        });

        action.execute();
        action.execute();

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cloned_action_shares_callable() {
        let runs = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&runs);
        let action = TransitionAction::new("tick", move || {
            r.fetch_add(1, Ordering::SeqCst);
        });
        let cloned = action.clone();

        action.execute();
        cloned.execute();

        assert_eq!(cloned.name(), "tick");
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn precondition_reads_external_flag() {
        let ready = Arc::new(AtomicBool::new(false));
        let r = Arc::clone(&ready);
        let precondition = TransitionPrecondition::new("ready", move || r.load(Ordering::SeqCst));

        assert!(!precondition.is_valid());
        ready.store(true, Ordering::SeqCst);
        assert!(precondition.is_valid());
    }

    #[test]
    fn debug_output_names_the_callable() {
        let action = TransitionAction::new("log", || {});
        let precondition = TransitionPrecondition::new("armed", || true);

        assert!(format!("{action:?}").contains("log"));
        assert!(format!("{precondition:?}").contains("armed"));
    }
}
