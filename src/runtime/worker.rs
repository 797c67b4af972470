//! The worker loop that drains the trigger queue.

use crate::core::{Transition, Trigger};
use crate::messages::Fault;
use crate::runtime::machine::Shared;
use crate::runtime::observer::panic_message;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};

/// Marks the worker as gone when the task ends, including by unwinding or
/// by the runtime dropping it before the first poll.
struct ExitGuard<T: Trigger>(Arc<Shared<T>>);

impl<T: Trigger> Drop for ExitGuard<T> {
    fn drop(&mut self) {
        self.0.worker_exited();
    }
}

/// Spawn the worker task on the current Tokio runtime.
pub(crate) fn spawn<T: Trigger>(shared: Arc<Shared<T>>, queue: mpsc::Receiver<T>) {
    let exit = ExitGuard(Arc::clone(&shared));
    tokio::spawn(async move {
        let _exit = exit;
        run(shared, queue).await;
    });
}

/// Process triggers until the machine is cancelled or the queue is closed
/// and empty.
async fn run<T: Trigger>(shared: Arc<Shared<T>>, mut queue: mpsc::Receiver<T>) {
    debug!(machine = %shared.name, "worker started");

    loop {
        let trigger = tokio::select! {
            biased;
            _ = shared.cancel.cancelled() => {
                debug!(machine = %shared.name, "worker cancelled");
                return;
            }
            next = queue.recv() => match next {
                Some(trigger) => trigger,
                None => break,
            },
        };

        tokio::select! {
            biased;
            _ = shared.cancel.cancelled() => {
                debug!(machine = %shared.name, "worker cancelled while paused");
                return;
            }
            _ = shared.gate.wait_open() => {}
        }

        let processed = panic::catch_unwind(AssertUnwindSafe(|| process(&shared, &trigger)));
        if let Err(payload) = processed {
            let message = panic_message(payload.as_ref());
            error!(
                machine = %shared.name,
                trigger = %trigger.name(),
                "unhandled failure in worker: {message}"
            );
            shared.fail(message);
            return;
        }
    }

    debug!(machine = %shared.name, "queue drained");
    shared.drained();
}

/// Apply the first eligible transition of the current state for `trigger`.
///
/// Candidates are tried in declaration order. A candidate whose source is
/// not the current state, or whose preconditions are unmet, is reported as
/// an `error` event and the next one is tried.
fn process<T: Trigger>(shared: &Shared<T>, trigger: &T) {
    let current = shared.current_state();
    let candidates: Vec<&Transition<T>> = current.transitions_for(trigger).collect();
    if candidates.is_empty() {
        debug!(
            machine = %shared.name,
            state = current.name(),
            trigger = %trigger.name(),
            "no transition for trigger"
        );
        return;
    }

    for transition in candidates {
        if current.name() != transition.source() {
            warn!(
                machine = %shared.name,
                transition = transition.name(),
                "transition expects state {} but current state is {}",
                transition.source(),
                current.name()
            );
            shared.error(
                Fault::WrongSourceState {
                    transition: transition.name().to_string(),
                    current: current.name().to_string(),
                    expected: transition.source().to_string(),
                },
                "Transition was in wrong state.",
            );
            continue;
        }

        if let Some(unmet) = transition.first_unmet_precondition() {
            warn!(
                machine = %shared.name,
                transition = transition.name(),
                "precondition {} not met",
                unmet.name()
            );
            shared.error(
                Fault::PreconditionFailed {
                    transition: transition.name().to_string(),
                    precondition: unmet.name().to_string(),
                },
                format!("Precondition {} not met.", unmet.name()),
            );
            continue;
        }

        // Unreachable for a validated graph.
        let Some(target) = shared.graph.get(transition.target()).cloned() else {
            warn!(
                machine = %shared.name,
                transition = transition.name(),
                "unknown target state {}",
                transition.target()
            );
            shared.error(
                Fault::UnknownTarget {
                    transition: transition.name().to_string(),
                    target: transition.target().to_string(),
                },
                format!("Target state {} does not exist.", transition.target()),
            );
            continue;
        };

        trace!(machine = %shared.name, transition = transition.name(), "preconditions met");

        shared.info("leaving state");
        current.run_exit_actions();

        info!(
            machine = %shared.name,
            transition = transition.name(),
            from = current.name(),
            to = target.name(),
            "executing transition"
        );
        shared.info("transitioning state");
        transition.execute_actions();

        shared.enter(Arc::clone(&target));
        shared.info("entering state");
        target.run_entry_actions();
        return;
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Graph, State, StateMachineState, Transition};
    use crate::messages::{Event, Fault};
    use crate::runtime::{FireOutcome, MachineConfig, StateMachine};
    use std::time::Duration;

    #[tokio::test]
    async fn unresolved_target_is_reported_and_state_kept() {
        let graph = Graph::unchecked(
            vec![State::new("A")
                .as_default()
                .with_transition(Transition::new("go", "A", "Missing"))],
            0,
        );
        let machine = StateMachine::new("m", graph, MachineConfig::default()).unwrap();

        machine.start();
        assert_eq!(machine.fire("go").await, FireOutcome::Enqueued);

        let reported = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                let fault = machine.message_history().iter().find_map(|message| {
                    match message.as_event() {
                        Some(Event::Error(fault)) => Some(fault.clone()),
                        _ => None,
                    }
                });
                if let Some(fault) = fault {
                    return fault;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        assert_eq!(
            reported,
            Fault::UnknownTarget {
                transition: "A --go--> Missing".to_string(),
                target: "Missing".to_string(),
            }
        );
        assert_eq!(machine.current_state().name(), "A");
        assert_eq!(machine.lifecycle(), StateMachineState::Running);
    }
}
