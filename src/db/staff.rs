// src/db/staff.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

/// One row of the staff_users collection. This app only ever reads it;
/// accounts are provisioned directly in the database.
#[derive(Debug, Clone)]
pub struct StaffRow {
    pub id: i64,
    pub username: String,
    /// Stored and compared as plaintext. Known weakness carried over from
    /// the system this replaces; do not "fix" silently.
    pub password: String,
    pub display_name: Option<String>,
    /// Absent or true means usable; explicitly false blocks sign-in.
    /// Option so absence and false stay distinguishable.
    pub active: Option<bool>,
}

impl StaffRow {
    /// Display name falls back to the username when not set.
    pub fn display_name_or_username(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }
}

/// Snapshot of the staff identity attached to resolved requests and
/// activity log entries, and held by the in-memory session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffRef {
    pub staff_id: i64,
    pub username: String,
    pub display_name: String,
}

impl From<&StaffRow> for StaffRef {
    fn from(row: &StaffRow) -> Self {
        StaffRef {
            staff_id: row.id,
            username: row.username.clone(),
            display_name: row.display_name_or_username().to_string(),
        }
    }
}

/// Exact-match lookup, limited to one row. Username uniqueness is an
/// external assumption (the schema enforces it here).
pub fn find_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<StaffRow>, ServerError> {
    conn.query_row(
        "select id, username, password, display_name, active
         from staff_users
         where username = ?
         limit 1",
        params![username],
        |r| {
            Ok(StaffRow {
                id: r.get(0)?,
                username: r.get(1)?,
                password: r.get(2)?,
                display_name: r.get(3)?,
                active: r.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select staff user failed: {e}")))
}

#[cfg(test)]
pub(crate) fn insert_staff(
    conn: &Connection,
    username: &str,
    password: &str,
    display_name: Option<&str>,
    active: Option<bool>,
) -> i64 {
    conn.execute(
        "insert into staff_users (username, password, display_name, active, created_at)
         values (?, ?, ?, ?, 0)",
        params![username, password, display_name, active],
    )
    .unwrap();
    conn.last_insert_rowid()
}
