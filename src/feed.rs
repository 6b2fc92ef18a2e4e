// src/feed.rs
//
// Live view of the request collection for the staff dashboard. While the
// store is live we hold one standing subscription; a background thread
// applies every pushed snapshot as a fresh pending/completed partition
// (no diffing). In local mode there is a single one-shot read and no
// further updates.
use std::sync::{Arc, Mutex};
use std::thread;

use crate::clock;
use crate::db::requests::RequestRow;
use crate::store::watch::Watchers;
use crate::store::{LocalRecord, Store, Subscription};

/// What the dashboard renders for one request, whichever backend it came
/// from. Local records carry no id, so they expose no actions.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub id: Option<i64>,
    pub name: String,
    pub phone: String,
    pub category: String,
    pub description: String,
    pub submitted: String,
    pub resolved: bool,
    pub completed_by: Option<String>,
}

impl From<RequestRow> for FeedItem {
    fn from(row: RequestRow) -> Self {
        FeedItem {
            id: Some(row.id),
            name: row.name,
            phone: row.phone,
            category: row.category,
            description: row.description,
            submitted: clock::format_unix(row.created_at),
            resolved: row.resolved,
            completed_by: row.resolved_by.map(|s| s.display_name),
        }
    }
}

impl From<LocalRecord> for FeedItem {
    fn from(record: LocalRecord) -> Self {
        FeedItem {
            id: None,
            name: record.name,
            phone: record.phone,
            category: record.category,
            description: record.description,
            submitted: record.created_at,
            resolved: record.resolved,
            completed_by: None,
        }
    }
}

/// One rendered snapshot, already split into the two dashboard buckets.
/// Order within each bucket is the store's delivery order.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub pending: Vec<FeedItem>,
    pub completed: Vec<FeedItem>,
}

impl FeedSnapshot {
    pub fn partition(items: impl IntoIterator<Item = FeedItem>) -> Self {
        let mut snap = FeedSnapshot::default();
        for item in items {
            if item.resolved {
                snap.completed.push(item);
            } else {
                snap.pending.push(item);
            }
        }
        snap
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn total(&self) -> usize {
        self.pending.len() + self.completed.len()
    }
}

#[derive(Default)]
struct FeedInner {
    latest: FeedSnapshot,
    error: Option<String>,
    cancel: Option<(Watchers, u64)>,
    running: bool,
    // bumped on every start so a superseded consumer thread stops writing
    epoch: u64,
}

#[derive(Clone, Default)]
pub struct RequestFeed {
    inner: Arc<Mutex<FeedInner>>,
}

impl RequestFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the dashboard: live store gets a standing subscription, local
    /// mode gets one read. Restarts cleanly if already running.
    pub fn start(&self, store: &Store) {
        self.stop();

        if store.is_live() {
            match store.subscribe() {
                Ok(sub) => self.run_consumer(sub),
                Err(e) => {
                    tracing::error!("feed subscription failed: {e}");
                    let mut inner = self.lock();
                    inner.error = Some(e.to_string());
                }
            }
        } else {
            self.load_local(store);
        }
    }

    fn run_consumer(&self, sub: Subscription) {
        let epoch = {
            let mut inner = self.lock();
            inner.epoch += 1;
            inner.cancel = Some(sub.canceller());
            inner.running = true;
            inner.error = None;
            inner.epoch
        };

        let shared = self.inner.clone();
        thread::spawn(move || {
            while let Ok(event) = sub.rx.recv() {
                let mut inner = shared.lock().unwrap_or_else(|p| p.into_inner());
                if inner.epoch != epoch {
                    break;
                }
                match event {
                    Ok(rows) => {
                        inner.latest =
                            FeedSnapshot::partition(rows.into_iter().map(FeedItem::from));
                        inner.error = None;
                    }
                    Err(msg) => {
                        tracing::error!("live update error: {msg}");
                        inner.error = Some(msg);
                    }
                }
            }
        });
    }

    fn load_local(&self, store: &Store) {
        let Some(local) = store.local() else {
            return;
        };
        let mut inner = self.lock();
        match local.records_desc() {
            Ok(records) => {
                inner.latest = FeedSnapshot::partition(
                    records.into_iter().map(|(_, record)| FeedItem::from(record)),
                );
                inner.error = None;
            }
            Err(e) => {
                tracing::error!("local store read failed: {e}");
                inner.error = Some(e.to_string());
            }
        }
    }

    /// Cancel the standing subscription. Safe to call when idle; called on
    /// logout.
    pub fn stop(&self) {
        let mut inner = self.lock();
        if let Some((watchers, id)) = inner.cancel.take() {
            watchers.remove(id);
        }
        inner.running = false;
        inner.latest = FeedSnapshot::default();
        inner.error = None;
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn latest(&self) -> FeedSnapshot {
        self.lock().latest.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FeedInner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}
