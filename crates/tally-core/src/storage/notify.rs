//! Change notification channel.
//!
//! Stores signal "something changed" with no payload; consumers respond by
//! fetching a fresh snapshot. Delivery is at-least-once and duplicates are
//! harmless because refresh is idempotent.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

/// Push side of the refresh channel.
pub trait ChangeNotifier: Send + Sync {
    /// Signal that the store changed. Carries no payload.
    fn notify_changed(&self);
}

/// mpsc-backed notifier handed to a store.
#[derive(Debug, Clone)]
pub struct RefreshChannel {
    sender: Sender<()>,
}

/// Consumer side of the refresh channel.
#[derive(Debug)]
pub struct RefreshListener {
    receiver: Receiver<()>,
}

impl RefreshChannel {
    /// Create a connected notifier/listener pair.
    pub fn new() -> (RefreshChannel, RefreshListener) {
        let (sender, receiver) = channel();
        (RefreshChannel { sender }, RefreshListener { receiver })
    }
}

impl ChangeNotifier for RefreshChannel {
    fn notify_changed(&self) {
        // A hung-up listener just means nobody is watching; dropping the
        // signal is fine.
        let _ = self.sender.send(());
    }
}

impl RefreshListener {
    /// Drain pending signals, collapsing duplicates into one refresh.
    ///
    /// Returns true if at least one change was signaled since the last
    /// drain.
    pub fn drain(&self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(()) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// Block until the next change signal, or until all notifiers are
    /// dropped (returns false).
    pub fn wait(&self) -> bool {
        self.receiver.recv().is_ok()
    }
}
