// src/state.rs
use crate::auth::SessionRegistry;
use crate::feed::RequestFeed;
use crate::store::Store;

/// Everything a request handler needs; cheap to clone (all handles).
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub sessions: SessionRegistry,
    pub feed: RequestFeed,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            sessions: SessionRegistry::new(),
            feed: RequestFeed::new(),
        }
    }
}
