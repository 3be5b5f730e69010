use std::mem;
use std::sync::Arc;

use tokio::sync::watch;

use crate::common::ChatEvent;

use super::state::ChatSnapshot;

/// Single owner of the client snapshot.
///
/// Events from every task are applied one at a time inside the watch channel's
/// lock, so readers always see either the old or the new snapshot. Once the
/// snapshot is disposed, late completions are dropped.
#[derive(Clone)]
pub struct ChatStore {
    tx: Arc<watch::Sender<ChatSnapshot>>,
}

impl ChatStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ChatSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    /// Applies `event`. Returns `false` if the store was already disposed.
    pub fn dispatch(&self, event: impl Into<ChatEvent>) -> bool {
        self.dispatch_if(|_| true, event)
    }

    /// Applies `event` only when `guard` accepts the current snapshot.
    pub fn dispatch_if(
        &self,
        guard: impl FnOnce(&ChatSnapshot) -> bool,
        event: impl Into<ChatEvent>,
    ) -> bool {
        let event = event.into();
        self.tx.send_if_modified(|snapshot| {
            if snapshot.is_disposed() {
                log::trace!("Dropping {event:?} after dispose");
                return false;
            }
            if !guard(snapshot) {
                return false;
            }
            *snapshot = mem::take(snapshot).apply(event);
            true
        })
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.tx.borrow().clone()
    }

    /// Reads the current snapshot without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&ChatSnapshot) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.tx.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.read(ChatSnapshot::is_disposed)
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}
