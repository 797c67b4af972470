//! Observer registry and subscription handles.

use crate::core::Trigger;
use crate::messages::Message;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use tracing::error;

/// Receiver of the events and replies a machine emits.
///
/// Observers are called on whichever task produced the message: the
/// worker for transition events, the caller for lifecycle events and
/// replies. They must return quickly and must not block.
///
/// Any `Fn(&Message<T>) + Send + Sync` closure is an observer.
pub trait Observer<T: Trigger>: Send + Sync {
    fn on_next(&self, message: &Message<T>);
}

impl<T, F> Observer<T> for F
where
    T: Trigger,
    F: Fn(&Message<T>) + Send + Sync,
{
    fn on_next(&self, message: &Message<T>) {
        self(message)
    }
}

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64);
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle (or calling [`Subscription::unsubscribe`]) removes
/// the observer. An observer removed while a notification is in flight
/// may still receive that one message.
#[must_use = "dropping a Subscription unsubscribes the observer immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Unsubscribe>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

struct Entries<T: Trigger> {
    next_id: u64,
    observers: Vec<(u64, Arc<dyn Observer<T>>)>,
}

pub(crate) struct Observers<T: Trigger> {
    entries: Mutex<Entries<T>>,
}

impl<T: Trigger> Observers<T> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(Entries {
                next_id: 0,
                observers: Vec::new(),
            }),
        })
    }

    pub(crate) fn subscribe(self: &Arc<Self>, observer: Arc<dyn Observer<T>>) -> Subscription {
        let id = {
            let mut entries = self.entries.lock();
            let id = entries.next_id;
            entries.next_id += 1;
            entries.observers.push((id, observer));
            id
        };

        let weak: Weak<Self> = Arc::downgrade(self);
        let registry: Weak<dyn Unsubscribe> = weak;
        Subscription { id, registry }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().observers.len()
    }

    /// Deliver `message` to the observers registered right now.
    ///
    /// The list is copied before delivery, so observers may subscribe or
    /// unsubscribe from inside `on_next`. A panicking observer is logged
    /// and skipped.
    pub(crate) fn notify(&self, machine: &str, message: &Message<T>) {
        let snapshot: Vec<Arc<dyn Observer<T>>> = self
            .entries
            .lock()
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in snapshot {
            let delivered = panic::catch_unwind(AssertUnwindSafe(|| observer.on_next(message)));
            if let Err(payload) = delivered {
                error!(
                    machine,
                    kind = message.name(),
                    "observer panicked: {}",
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

impl<T: Trigger> Unsubscribe for Observers<T> {
    fn remove(&self, id: u64) {
        self.entries.lock().observers.retain(|(entry, _)| *entry != id);
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
