// src/store/watch.rs
//
// Watcher registry behind the request-collection subscription. Every
// successful write publishes the full, freshly-queried snapshot to all
// registered watchers; there is no diffing. A watcher that cancels (or
// whose receiver is gone) is pruned on the next publish.
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::db::requests::RequestRow;

/// What a subscriber receives on each store change: the whole current
/// snapshot, or the error that stopped it from being built.
pub type SnapshotEvent = Result<Vec<RequestRow>, String>;

#[derive(Default)]
struct WatchState {
    next_id: u64,
    senders: Vec<(u64, Sender<SnapshotEvent>)>,
}

#[derive(Clone, Default)]
pub struct Watchers {
    inner: Arc<Mutex<WatchState>>,
}

impl Watchers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a watcher and return its id plus the receiving end.
    pub fn add(&self) -> (u64, Receiver<SnapshotEvent>) {
        let (tx, rx) = channel();
        let mut state = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        state.next_id += 1;
        let id = state.next_id;
        state.senders.push((id, tx));
        (id, rx)
    }

    /// Drop a watcher. Its receiver disconnects, which is how consumers
    /// learn the subscription ended.
    pub fn remove(&self, id: u64) {
        let mut state = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        state.senders.retain(|(wid, _)| *wid != id);
    }

    /// Deliver one event to a single watcher (used for the initial
    /// snapshot right after subscribing).
    pub fn send_to(&self, id: u64, event: SnapshotEvent) {
        let state = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        if let Some((_, tx)) = state.senders.iter().find(|(wid, _)| *wid == id) {
            let _ = tx.send(event);
        }
    }

    /// Fan an event out to every live watcher, pruning dead ones.
    pub fn publish(&self, event: SnapshotEvent) {
        let mut state = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        state
            .senders
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    pub fn count(&self) -> usize {
        let state = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        state.senders.len()
    }
}
