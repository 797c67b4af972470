//! The addressed, timestamped message envelope.

use crate::core::Trigger;
use crate::messages::kind::{Command, Event, MessageKind, Reply, Request};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Version stamped on every message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

impl Version {
    pub const CURRENT: Version = Version { major: 1, minor: 0 };
}

impl Default for Version {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Addressing and identity fields shared by every message.
///
/// The header carries no payload and is serializable on its own, which
/// makes it the natural record for external logs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageHeader {
    pub id: Uuid,
    pub timestamp_utc: DateTime<Utc>,
    pub version: Version,
    pub name: String,
    pub source: String,
    pub target: String,
    pub message_info: String,
}

/// Immutable message exchanged with a machine.
///
/// Commands and requests flow in through
/// [`StateMachine::send`](crate::runtime::StateMachine::send); events and
/// replies flow out to observers. The id and timestamp are assigned once,
/// at construction.
///
/// # Example
///
/// ```rust
/// use active_machine::messages::{Command, Message, MessageKind};
///
/// let message: Message<&str> = Message::fire("operator", "turnstile", "coin");
///
/// assert_eq!(message.name(), "fire");
/// assert_eq!(message.target(), "turnstile");
/// assert!(matches!(message.kind(), MessageKind::Command(Command::Fire("coin"))));
/// ```
#[derive(Clone, Debug)]
pub struct Message<T: Trigger> {
    header: MessageHeader,
    kind: MessageKind<T>,
}

impl<T: Trigger> Message<T> {
    /// Build a message of any kind. The name is derived from the kind.
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: MessageKind<T>) -> Self {
        Self {
            header: MessageHeader {
                id: Uuid::new_v4(),
                timestamp_utc: Utc::now(),
                version: Version::CURRENT,
                name: kind.name().to_string(),
                source: source.into(),
                target: target.into(),
                message_info: String::new(),
            },
            kind,
        }
    }

    /// Attach free-form information.
    pub fn with_info(mut self, message_info: impl Into<String>) -> Self {
        self.header.message_info = message_info.into();
        self
    }

    pub fn command(source: impl Into<String>, target: impl Into<String>, command: Command<T>) -> Self {
        Self::new(source, target, MessageKind::Command(command))
    }

    pub fn request(source: impl Into<String>, target: impl Into<String>, request: Request) -> Self {
        Self::new(source, target, MessageKind::Request(request))
    }

    /// Events are broadcast, so they carry no target.
    pub fn event(source: impl Into<String>, event: Event) -> Self {
        Self::new(source, String::new(), MessageKind::Event(event))
    }

    pub fn reply(source: impl Into<String>, target: impl Into<String>, reply: Reply<T>) -> Self {
        Self::new(source, target, MessageKind::Reply(reply))
    }

    pub fn start(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::command(source, target, Command::Start)
    }

    pub fn pause(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::command(source, target, Command::Pause)
    }

    pub fn resume(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::command(source, target, Command::Resume)
    }

    pub fn stop(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::command(source, target, Command::Stop)
    }

    pub fn fire(source: impl Into<String>, target: impl Into<String>, trigger: T) -> Self {
        Self::command(source, target, Command::Fire(trigger))
    }

    pub fn get_state(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::request(source, target, Request::GetState)
    }

    pub fn get_state_history(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::request(source, target, Request::GetStateHistory)
    }

    pub fn get_possible_states(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::request(source, target, Request::GetPossibleStates)
    }

    /// Request the most recent `maximum_count` messages, or all of them.
    pub fn get_message_history(
        source: impl Into<String>,
        target: impl Into<String>,
        maximum_count: Option<usize>,
    ) -> Self {
        Self::request(source, target, Request::GetMessageHistory { maximum_count })
    }

    pub fn header(&self) -> &MessageHeader {
        &self.header
    }

    pub fn kind(&self) -> &MessageKind<T> {
        &self.kind
    }

    pub fn id(&self) -> Uuid {
        self.header.id
    }

    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        self.header.timestamp_utc
    }

    pub fn version(&self) -> Version {
        self.header.version
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn source(&self) -> &str {
        &self.header.source
    }

    pub fn target(&self) -> &str {
        &self.header.target
    }

    pub fn message_info(&self) -> &str {
        &self.header.message_info
    }

    pub fn as_event(&self) -> Option<&Event> {
        match &self.kind {
            MessageKind::Event(event) => Some(event),
            _ => None,
        }
    }

    pub fn as_reply(&self) -> Option<&Reply<T>> {
        match &self.kind {
            MessageKind::Reply(reply) => Some(reply),
            _ => None,
        }
    }
}
