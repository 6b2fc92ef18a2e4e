// src/store/local.rs
//
// Fallback persistence when the request database cannot be opened: a
// string-keyed map serialized to one JSON file. Keys are
// "local-<unix_millis>" so a reverse lexicographic walk yields
// most-recent-first, the same trick the key prefix is for.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::errors::ServerError;

pub const LOCAL_KEY_PREFIX: &str = "local-";

/// A request record as stored in the fallback file. Field names follow the
/// wire shape of the request collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalRecord {
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "desc")]
    pub description: String,
    /// Client-assigned ISO timestamp; there is no server to assign one.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub resolved: bool,
}

#[derive(Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn key_for(millis: i64) -> String {
        format!("{LOCAL_KEY_PREFIX}{millis}")
    }

    fn load(&self) -> Result<BTreeMap<String, LocalRecord>, ServerError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| ServerError::DbError(format!("local store parse failed: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ServerError::DbError(format!(
                "local store read failed: {e}"
            ))),
        }
    }

    fn save(&self, map: &BTreeMap<String, LocalRecord>) -> Result<(), ServerError> {
        let text = serde_json::to_string_pretty(map)
            .map_err(|e| ServerError::DbError(format!("local store encode failed: {e}")))?;
        fs::write(&self.path, text)
            .map_err(|e| ServerError::DbError(format!("local store write failed: {e}")))
    }

    pub fn put(&self, key: &str, record: &LocalRecord) -> Result<(), ServerError> {
        let mut map = self.load()?;
        map.insert(key.to_string(), record.clone());
        self.save(&map)
    }

    /// All records, most recent first (keys descending).
    pub fn records_desc(&self) -> Result<Vec<(String, LocalRecord)>, ServerError> {
        let map = self.load()?;
        Ok(map
            .into_iter()
            .filter(|(k, _)| k.starts_with(LOCAL_KEY_PREFIX))
            .rev()
            .collect())
    }
}
