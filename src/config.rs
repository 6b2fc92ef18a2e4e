// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime settings, read once at startup. Everything has a default so the
/// app runs with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub addr: SocketAddr,
    /// Path to the sqlite request database.
    pub db_path: PathBuf,
    /// Schema applied on startup.
    pub schema_path: PathBuf,
    /// JSON file used by the local fallback store when the database
    /// cannot be opened.
    pub local_store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".parse().expect("static addr"),
            db_path: PathBuf::from("service_desk.sqlite3"),
            schema_path: PathBuf::from("sql/schema.sql"),
            local_store_path: PathBuf::from("service_desk_local.json"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut cfg = Config::default();
        if let Ok(addr) = env::var("SERVICE_DESK_ADDR") {
            match addr.parse() {
                Ok(a) => cfg.addr = a,
                Err(e) => tracing::warn!("ignoring bad SERVICE_DESK_ADDR {addr:?}: {e}"),
            }
        }
        if let Ok(p) = env::var("SERVICE_DESK_DB") {
            cfg.db_path = PathBuf::from(p);
        }
        if let Ok(p) = env::var("SERVICE_DESK_SCHEMA") {
            cfg.schema_path = PathBuf::from(p);
        }
        if let Ok(p) = env::var("SERVICE_DESK_LOCAL_STORE") {
            cfg.local_store_path = PathBuf::from(p);
        }
        cfg
    }
}
