// src/auth/sessions.rs
//
// Staff sessions live only in this map: no expiry, no persistence,
// destroyed on logout or process restart. The cookie carries a random
// token; we keep its SHA-256 so the raw value never sits in memory
// longer than the lookup.
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::db::staff::StaffRef;

const TOKEN_BYTES: usize = 32;

/// Generate a URL-safe random session token (cookie value).
fn generate_token() -> String {
    let mut raw = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut raw);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
}

fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<[u8; 32], StaffRef>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a session and return the raw token for the cookie.
    pub fn create(&self, identity: StaffRef) -> String {
        let token = generate_token();
        let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        map.insert(hash_token(&token), identity);
        token
    }

    pub fn get(&self, token: &str) -> Option<StaffRef> {
        let map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        map.get(&hash_token(token)).cloned()
    }

    /// Idempotent; removing an unknown token is a no-op.
    pub fn remove(&self, token: &str) {
        let mut map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        map.remove(&hash_token(token));
    }

    pub fn len(&self) -> usize {
        let map = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
