// src/clock.rs
use chrono::{DateTime, Local, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix timestamp in seconds. Handlers grab this once and pass it
/// down so db helpers stay deterministic in tests.
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Milliseconds variant, used for local fallback record keys.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Client-side ISO timestamp for records written to the local store.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Human display form of a server-assigned unix timestamp.
pub fn format_unix(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => String::new(),
    }
}
