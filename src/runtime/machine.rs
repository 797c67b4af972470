//! The state machine actor.

use crate::builder::StateMachineBuilder;
use crate::core::{Graph, History, State, StateMachineState, Trigger};
use crate::messages::{Command, Event, Fault, Message, MessageKind, Reply, Request};
use crate::runtime::config::MachineConfig;
use crate::runtime::error::MachineError;
use crate::runtime::gate::PauseGate;
use crate::runtime::observer::{Observer, Observers, Subscription};
use crate::runtime::worker;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// What happened to a trigger passed to [`StateMachine::fire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    /// The trigger is in the queue.
    Enqueued,
    /// The machine was not running; the trigger was dropped.
    NotRunning,
    /// The queue was closed before the trigger could be enqueued.
    Closed,
}

struct Inner<T: Trigger> {
    lifecycle: StateMachineState,
    state_history: History<Arc<State<T>>>,
    message_history: History<Arc<Message<T>>>,
}

impl<T: Trigger> Inner<T> {
    /// Append `message` to the history and hand it back for delivery.
    fn record(&mut self, message: Message<T>) -> Arc<Message<T>> {
        let message = Arc::new(message);
        self.message_history.push(Arc::clone(&message));
        message
    }
}

/// State shared between the public handle and the worker task.
pub(crate) struct Shared<T: Trigger> {
    pub(crate) name: String,
    pub(crate) graph: Graph<T>,
    inner: Mutex<Inner<T>>,
    observers: Arc<Observers<T>>,
    pub(crate) gate: PauseGate,
    pub(crate) cancel: CancellationToken,
    queue: Mutex<Option<mpsc::Sender<T>>>,
    worker_running: watch::Sender<bool>,
}

impl<T: Trigger> Shared<T> {
    pub(crate) fn lifecycle(&self) -> StateMachineState {
        self.inner.lock().lifecycle
    }

    pub(crate) fn current_state(&self) -> Arc<State<T>> {
        self.inner
            .lock()
            .state_history
            .last()
            .cloned()
            .unwrap_or_else(|| Arc::clone(self.graph.default_state()))
    }

    pub(crate) fn enter(&self, state: Arc<State<T>>) {
        self.inner.lock().state_history.push(state);
    }

    /// Record `message` and deliver it to the current observers.
    ///
    /// The history lock is released before any observer runs.
    pub(crate) fn notify(&self, message: Message<T>) {
        let message = self.inner.lock().record(message);
        self.broadcast(&message);
    }

    /// Deliver a message that is already in the history.
    fn broadcast(&self, message: &Message<T>) {
        self.observers.notify(&self.name, message);
    }

    pub(crate) fn info(&self, info: &str) {
        self.notify(Message::event(&self.name, Event::Info).with_info(info));
    }

    pub(crate) fn error(&self, fault: Fault, info: impl Into<String>) {
        self.notify(Message::event(&self.name, Event::Error(fault)).with_info(info));
    }

    fn record_inbound(&self, message: Arc<Message<T>>) {
        self.inner.lock().message_history.push(message);
    }

    fn close_queue(&self) {
        self.queue.lock().take();
    }

    /// Move into a final lifecycle state and announce it, unless the
    /// machine already reached one. The event is recorded under the same
    /// lock that changes the lifecycle.
    fn finish(&self, state: StateMachineState, event: Event) {
        let finished = {
            let mut inner = self.inner.lock();
            if inner.lifecycle.is_final() {
                return;
            }
            inner.lifecycle = state;
            inner.record(Message::event(&self.name, event))
        };
        info!(machine = %self.name, lifecycle = %state, "machine finished");
        self.broadcast(&finished);
    }

    /// The worker task is gone, whichever way it ended.
    pub(crate) fn worker_exited(&self) {
        self.worker_running.send_replace(false);
    }

    /// The worker drained a closed queue.
    pub(crate) fn drained(&self) {
        self.finish(StateMachineState::Completed, Event::Completed);
    }

    /// The worker hit an unrecoverable failure: stop, then report it.
    pub(crate) fn fail(&self, message: String) {
        self.cancel.cancel();
        self.close_queue();
        self.finish(StateMachineState::Stopped, Event::Stopped);
        self.error(
            Fault::WorkerPanic { message },
            "Unhandled worker exception.",
        );
    }
}

/// A running finite state machine.
///
/// The machine owns an immutable [`Graph`], a bounded trigger queue and a
/// worker task that processes triggers one at a time. Everything the
/// machine does is published as a [`Message`] to its observers and kept
/// in the message history.
///
/// Lifecycle: `Initialized` → `Running` ⇄ `Paused` → `Stopped` or
/// `Completed`. Illegal lifecycle calls are logged and ignored.
///
/// Dropping the machine cancels its worker.
///
/// # Example
///
/// ```rust
/// use active_machine::builder::StateMachineBuilder;
/// use active_machine::core::StateMachineState;
/// use active_machine::runtime::{MachineConfig, StateMachine};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut builder = StateMachineBuilder::new("door").unwrap();
/// builder.state("Closed", true).unwrap().on("open").go_to("Open").unwrap();
/// builder.state("Open", false).unwrap().on("close").go_to("Closed").unwrap();
///
/// let machine = StateMachine::from_builder(&builder, MachineConfig::default()).unwrap();
/// assert_eq!(machine.lifecycle(), StateMachineState::Initialized);
///
/// machine.start();
/// machine.fire("open").await;
/// machine.stop().await;
/// assert_eq!(machine.lifecycle(), StateMachineState::Stopped);
/// # }
/// ```
pub struct StateMachine<T: Trigger> {
    shared: Arc<Shared<T>>,
    config: MachineConfig,
    receiver: Mutex<Option<mpsc::Receiver<T>>>,
}

impl<T: Trigger> StateMachine<T> {
    /// Create a machine over `graph`. The default state becomes the
    /// current state and an `initialized` event is recorded.
    pub fn new(
        name: impl Into<String>,
        graph: Graph<T>,
        config: MachineConfig,
    ) -> Result<Self, MachineError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MachineError::BlankName);
        }
        if config.queue_capacity == 0 {
            return Err(MachineError::InvalidQueueCapacity);
        }

        let (sender, receiver) = mpsc::channel(config.queue_capacity);
        let (worker_running, _) = watch::channel(false);
        let mut state_history = History::new(config.state_retention);
        state_history.push(Arc::clone(graph.default_state()));

        let shared = Arc::new(Shared {
            name,
            graph,
            inner: Mutex::new(Inner {
                lifecycle: StateMachineState::Initialized,
                state_history,
                message_history: History::new(config.message_retention),
            }),
            observers: Observers::new(),
            gate: PauseGate::new(),
            cancel: CancellationToken::new(),
            queue: Mutex::new(Some(sender)),
            worker_running,
        });

        debug!(
            machine = %shared.name,
            states = shared.graph.len(),
            initial = shared.graph.default_state().name(),
            "machine initialized"
        );
        shared.notify(Message::event(&shared.name, Event::Initialized));

        Ok(Self {
            shared,
            config,
            receiver: Mutex::new(Some(receiver)),
        })
    }

    /// Validate the builder's graph and create a machine named after it.
    pub fn from_builder(
        builder: &StateMachineBuilder<T>,
        config: MachineConfig,
    ) -> Result<Self, MachineError> {
        let graph = builder.build()?;
        Self::new(builder.machine_name(), graph, config)
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Lifecycle state of the machine.
    pub fn lifecycle(&self) -> StateMachineState {
        self.shared.lifecycle()
    }

    /// Graph state the machine is in.
    pub fn current_state(&self) -> Arc<State<T>> {
        self.shared.current_state()
    }

    /// Visited states, oldest first. The first entry is the default state
    /// unless retention has evicted it.
    pub fn state_history(&self) -> Vec<Arc<State<T>>> {
        self.shared.inner.lock().state_history.to_vec()
    }

    /// Recorded messages, oldest first.
    pub fn message_history(&self) -> Vec<Arc<Message<T>>> {
        self.shared.inner.lock().message_history.to_vec()
    }

    /// The immutable graph the machine runs.
    pub fn possible_states(&self) -> &Graph<T> {
        &self.shared.graph
    }

    /// Register an observer for every subsequent event and reply.
    pub fn subscribe(&self, observer: impl Observer<T> + 'static) -> Subscription {
        self.shared.observers.subscribe(Arc::new(observer))
    }

    pub fn observer_count(&self) -> usize {
        self.shared.observers.len()
    }

    /// Begin (or continue) processing triggers.
    ///
    /// Legal from `Initialized` and `Paused`. The worker task is spawned on
    /// the first start, which therefore needs a Tokio runtime; without one
    /// the call is logged and ignored.
    pub fn start(&self) {
        if self.receiver.lock().is_some() && Handle::try_current().is_err() {
            warn!(
                machine = %self.shared.name,
                "Could not start because no Tokio runtime is running"
            );
            return;
        }

        let started = {
            let mut inner = self.shared.inner.lock();
            if !inner.lifecycle.can_start() {
                self.rejected("start", inner.lifecycle);
                return;
            }
            self.shared.gate.open();
            inner.lifecycle = StateMachineState::Running;
            inner.record(Message::event(&self.shared.name, Event::Started))
        };

        self.spawn_worker();
        info!(machine = %self.shared.name, "machine started");
        self.shared.broadcast(&started);
    }

    /// Close the gate. Queued triggers wait; a transition already executing
    /// finishes. Legal only from `Running`.
    pub fn pause(&self) {
        let paused = {
            let mut inner = self.shared.inner.lock();
            if !inner.lifecycle.can_pause() {
                self.rejected("pause", inner.lifecycle);
                return;
            }
            self.shared.gate.close();
            inner.lifecycle = StateMachineState::Paused;
            inner.record(Message::event(&self.shared.name, Event::Paused))
        };

        info!(machine = %self.shared.name, "machine paused");
        self.shared.broadcast(&paused);
    }

    /// Reopen the gate. Legal only from `Paused`.
    pub fn resume(&self) {
        let resumed = {
            let mut inner = self.shared.inner.lock();
            if !inner.lifecycle.can_resume() {
                self.rejected("resume", inner.lifecycle);
                return;
            }
            self.shared.gate.open();
            inner.lifecycle = StateMachineState::Running;
            inner.record(Message::event(&self.shared.name, Event::Resumed))
        };

        info!(machine = %self.shared.name, "machine resumed");
        self.shared.broadcast(&resumed);
    }

    /// Cancel the worker, discard queued triggers and wait for the worker
    /// to exit. A no-op once the machine is `Stopped` or `Completed`.
    ///
    /// Concurrent callers all wait for the worker; every call returns with
    /// the machine in a final state and only one `stopped` event recorded.
    pub async fn stop(&self) {
        if self.lifecycle().is_final() {
            debug!(machine = %self.shared.name, "stop ignored, machine already finished");
            return;
        }

        self.shared.cancel.cancel();
        self.shared.close_queue();

        let mut running = self.shared.worker_running.subscribe();
        if running.wait_for(|running| !running).await.is_err() {
            debug!(machine = %self.shared.name, "worker status channel closed");
        }

        self.shared.finish(StateMachineState::Stopped, Event::Stopped);
    }

    /// Stop accepting triggers and let the worker drain the queue. Once it
    /// is empty the machine becomes `Completed`. Legal from `Running` and
    /// `Paused`; triggers queued behind a closed gate wait for `resume`.
    pub fn complete(&self) {
        let lifecycle = self.lifecycle();
        if !matches!(
            lifecycle,
            StateMachineState::Running | StateMachineState::Paused
        ) {
            self.rejected("complete", lifecycle);
            return;
        }

        self.shared.close_queue();
        info!(machine = %self.shared.name, "queue closed, draining");
    }

    /// Enqueue `trigger` for the worker.
    ///
    /// Waits while the queue is full. Triggers fired while the machine is
    /// not `Running` are dropped.
    pub async fn fire(&self, trigger: T) -> FireOutcome {
        let lifecycle = self.lifecycle();
        if lifecycle != StateMachineState::Running {
            debug!(
                machine = %self.shared.name,
                trigger = %trigger.name(),
                lifecycle = %lifecycle,
                "trigger dropped, machine not running"
            );
            return FireOutcome::NotRunning;
        }

        let sender = self.shared.queue.lock().clone();
        let Some(sender) = sender else {
            return FireOutcome::Closed;
        };

        let name = trigger.name().into_owned();
        tokio::select! {
            sent = sender.send(trigger) => match sent {
                Ok(()) => {
                    debug!(machine = %self.shared.name, trigger = %name, "trigger enqueued");
                    FireOutcome::Enqueued
                }
                Err(_) => FireOutcome::Closed,
            },
            _ = self.shared.cancel.cancelled() => FireOutcome::Closed,
        }
    }

    /// Deliver a command or request addressed to this machine.
    ///
    /// Messages for another target are dropped without a trace in the
    /// history. Accepted commands and requests are recorded; requests are
    /// answered with a reply addressed to the requester. Events and replies
    /// sent to the machine are ignored.
    pub async fn send(&self, message: Message<T>) {
        if message.target() != self.shared.name {
            trace!(
                machine = %self.shared.name,
                addressed_to = message.target(),
                "message for another machine dropped"
            );
            return;
        }

        let message = Arc::new(message);
        match message.kind() {
            MessageKind::Command(command) => {
                self.shared.record_inbound(Arc::clone(&message));
                match command {
                    Command::Start => self.start(),
                    Command::Pause => self.pause(),
                    Command::Resume => self.resume(),
                    Command::Stop => self.stop().await,
                    Command::Fire(trigger) => {
                        self.fire(trigger.clone()).await;
                    }
                }
            }
            MessageKind::Request(request) => {
                self.shared.record_inbound(Arc::clone(&message));
                self.answer(message.source(), *request);
            }
            MessageKind::Event(_) | MessageKind::Reply(_) => {
                trace!(machine = %self.shared.name, kind = message.name(), "message ignored");
            }
        }
    }

    fn answer(&self, requester: &str, request: Request) {
        let reply = match request {
            Request::GetState => Reply::State(self.lifecycle()),
            Request::GetStateHistory => Reply::StateHistory(
                self.state_history()
                    .iter()
                    .map(|state| state.name().to_string())
                    .collect(),
            ),
            Request::GetPossibleStates => Reply::PossibleStates(self.shared.graph.clone()),
            Request::GetMessageHistory { maximum_count } => Reply::MessageHistory(
                self.shared.inner.lock().message_history.tail(maximum_count),
            ),
        };

        self.shared
            .notify(Message::reply(&self.shared.name, requester, reply));
    }

    fn spawn_worker(&self) {
        let Some(receiver) = self.receiver.lock().take() else {
            return;
        };

        self.shared.worker_running.send_replace(true);
        worker::spawn(Arc::clone(&self.shared), receiver);
    }

    fn rejected(&self, operation: &str, lifecycle: StateMachineState) {
        warn!(
            machine = %self.shared.name,
            "Could not {operation} because current state is {lifecycle}"
        );
    }
}

impl<T: Trigger> Drop for StateMachine<T> {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

impl<T: Trigger> std::fmt::Debug for StateMachine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.shared.name)
            .field("lifecycle", &self.lifecycle())
            .field("gate_open", &self.shared.gate.is_open())
            .field("current_state", &self.current_state().name())
            .finish()
    }
}
