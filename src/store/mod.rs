// src/store/mod.rs
//
// Gateway to persistence. On startup we try to open the sqlite request
// database and apply the schema; if that fails the app degrades to a
// local-only mode backed by a JSON key-value file instead of exiting.
// Local mode is permanent for the process: customer submissions still
// work, staff sign-in and mutations do not.
pub mod connection;
pub mod local;
pub mod watch;

use std::path::Path;
use std::sync::mpsc::Receiver;

use rusqlite::Connection;

pub use connection::{init_db, Database};
pub use local::{LocalRecord, LocalStore};
pub use watch::{SnapshotEvent, Watchers};

use crate::config::Config;
use crate::db::requests;
use crate::errors::ServerError;

#[derive(Clone)]
enum Backend {
    Live(Database),
    Local(LocalStore),
}

#[derive(Clone)]
pub struct Store {
    backend: Backend,
    watchers: Watchers,
}

/// A standing subscription to the request collection. Cancel it (or drop
/// it) and the receiver disconnects, ending the consumer loop.
pub struct Subscription {
    id: u64,
    watchers: Watchers,
    pub rx: Receiver<SnapshotEvent>,
}

impl Subscription {
    /// Handle for cancelling this subscription from another thread.
    pub fn canceller(&self) -> (Watchers, u64) {
        (self.watchers.clone(), self.id)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.watchers.remove(self.id);
    }
}

impl Store {
    /// Open the primary store, falling back to local mode on any error.
    /// Never fails hard.
    pub fn open(cfg: &Config) -> Store {
        let db = Database::new(&cfg.db_path);
        match init_db(&db, &cfg.schema_path) {
            Ok(()) => Store {
                backend: Backend::Live(db),
                watchers: Watchers::new(),
            },
            Err(e) => {
                tracing::warn!(
                    "request database unavailable ({e}); running in local mode with {}",
                    cfg.local_store_path.display()
                );
                Store::local_only(&cfg.local_store_path)
            }
        }
    }

    pub fn local_only(path: &Path) -> Store {
        Store {
            backend: Backend::Local(LocalStore::new(path)),
            watchers: Watchers::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self.backend, Backend::Live(_))
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        match &self.backend {
            Backend::Live(db) => db.with_conn(f),
            Backend::Local(_) => Err(ServerError::Unavailable(
                "request database is not configured".into(),
            )),
        }
    }

    pub fn local(&self) -> Option<&LocalStore> {
        match &self.backend {
            Backend::Local(store) => Some(store),
            Backend::Live(_) => None,
        }
    }

    /// Subscribe to the request collection, ordered by creation time
    /// descending. The current snapshot is queued immediately, then one
    /// event per store change until cancelled.
    pub fn subscribe(&self) -> Result<Subscription, ServerError> {
        if !self.is_live() {
            return Err(ServerError::Unavailable(
                "live updates require the request database".into(),
            ));
        }
        let (id, rx) = self.watchers.add();
        let initial = self.with_conn(requests::list_all_desc);
        match initial {
            Ok(rows) => self.watchers.send_to(id, Ok(rows)),
            Err(e) => self.watchers.send_to(id, Err(e.to_string())),
        }
        Ok(Subscription {
            id,
            watchers: self.watchers.clone(),
            rx,
        })
    }

    /// Re-query the request collection and push the snapshot to every
    /// watcher. Called after each successful write; failures are reported
    /// to subscribers and logged, never bubbled to the writer (whose write
    /// already succeeded).
    pub fn publish_requests(&self) {
        if self.watchers.count() == 0 {
            return;
        }
        match self.with_conn(requests::list_all_desc) {
            Ok(rows) => self.watchers.publish(Ok(rows)),
            Err(e) => {
                tracing::error!("snapshot query failed: {e}");
                self.watchers.publish(Err(e.to_string()));
            }
        }
    }
}
