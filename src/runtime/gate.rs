//! Open/closed gate the worker waits on while the machine is paused.

use tokio::sync::watch;

pub(crate) struct PauseGate {
    open: watch::Sender<bool>,
}

impl PauseGate {
    pub(crate) fn new() -> Self {
        let (open, _) = watch::channel(true);
        Self { open }
    }

    pub(crate) fn open(&self) {
        self.open.send_replace(true);
    }

    pub(crate) fn close(&self) {
        self.open.send_replace(false);
    }

    pub(crate) fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    /// Resolve as soon as the gate is open. Returns immediately if it
    /// already is.
    pub(crate) async fn wait_open(&self) {
        let mut receiver = self.open.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = receiver.wait_for(|open| *open).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn open_gate_does_not_wait() {
        let gate = PauseGate::new();
        assert!(gate.is_open());

        tokio::time::timeout(Duration::from_millis(100), gate.wait_open())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn closed_gate_waits_until_opened() {
        let gate = Arc::new(PauseGate::new());
        gate.close();
        assert!(!gate.is_open());

        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.wait_open().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        gate.open();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
