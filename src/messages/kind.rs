//! Message kinds understood and produced by a machine.

use crate::core::{Graph, StateMachineState, Trigger};
use crate::messages::envelope::Message;
use std::sync::Arc;
use thiserror::Error;

/// Payload of a [`Message`].
#[derive(Clone, Debug)]
pub enum MessageKind<T: Trigger> {
    Command(Command<T>),
    Request(Request),
    Event(Event),
    Reply(Reply<T>),
}

impl<T: Trigger> MessageKind<T> {
    /// Wire name of the message, e.g. `"fire"` or `"state-history"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Command(command) => command.name(),
            Self::Request(request) => request.name(),
            Self::Event(event) => event.name(),
            Self::Reply(reply) => reply.name(),
        }
    }
}

/// Inbound instruction changing the machine's lifecycle or firing a trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum Command<T: Trigger> {
    Start,
    Pause,
    Resume,
    Stop,
    Fire(T),
}

impl<T: Trigger> Command<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Stop => "stop",
            Self::Fire(_) => "fire",
        }
    }
}

/// Inbound query answered synchronously with a [`Reply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    GetState,
    GetStateHistory,
    GetPossibleStates,
    /// `None` asks for the whole history.
    GetMessageHistory { maximum_count: Option<usize> },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetState => "get-state",
            Self::GetStateHistory => "get-state-history",
            Self::GetPossibleStates => "get-possible-states",
            Self::GetMessageHistory { .. } => "get-message-history",
        }
    }
}

/// Outbound notification about something the machine did.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Initialized,
    Started,
    Paused,
    Resumed,
    Stopped,
    Completed,
    /// Progress of a transition; the phase is in the message info.
    Info,
    Error(Fault),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Started => "started",
            Self::Paused => "paused",
            Self::Resumed => "resumed",
            Self::Stopped => "stopped",
            Self::Completed => "completed",
            Self::Info => "info",
            Self::Error(_) => "error",
        }
    }
}

/// Outbound answer to a [`Request`], addressed to the requester.
#[derive(Clone, Debug)]
pub enum Reply<T: Trigger> {
    State(StateMachineState),
    /// Names of the visited states, oldest first.
    StateHistory(Vec<String>),
    PossibleStates(Graph<T>),
    MessageHistory(Vec<Arc<Message<T>>>),
}

impl<T: Trigger> Reply<T> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::State(_) => "state",
            Self::StateHistory(_) => "state-history",
            Self::PossibleStates(_) => "possible-states",
            Self::MessageHistory(_) => "message-history",
        }
    }
}

/// Reason carried by an `error` event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Fault {
    #[error("Transition '{transition}' rejected: current state is '{current}', expected source '{expected}'")]
    WrongSourceState {
        transition: String,
        current: String,
        expected: String,
    },

    #[error("Transition '{transition}' rejected: precondition '{precondition}' not met")]
    PreconditionFailed {
        transition: String,
        precondition: String,
    },

    #[error("Transition '{transition}' rejected: target state '{target}' does not exist")]
    UnknownTarget { transition: String, target: String },

    #[error("Unhandled failure in worker: {message}")]
    WorkerPanic { message: String },
}
