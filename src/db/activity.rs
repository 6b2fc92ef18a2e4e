// src/db/activity.rs
//
// Append-only audit trail of staff actions. Nothing in the app reads it
// back; it exists for the operator.
use rusqlite::{params, Connection};

use crate::db::staff::StaffRef;
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MarkCompleted,
    Delete,
}

impl Action {
    /// Wire value stored in the action column.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::MarkCompleted => "markCompleted",
            Action::Delete => "delete",
        }
    }
}

pub fn append(
    conn: &Connection,
    request_id: i64,
    action: Action,
    performed_by: &StaffRef,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into activity_logs
           (request_id, action, performed_by_id, performed_by_username,
            performed_by_display_name, created_at)
         values (?, ?, ?, ?, ?, ?)",
        params![
            request_id,
            action.as_str(),
            performed_by.staff_id,
            performed_by.username,
            performed_by.display_name,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert activity log failed: {e}")))?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn count_for_request(conn: &Connection, request_id: i64, action: Action) -> i64 {
    conn.query_row(
        "select count(*) from activity_logs where request_id = ? and action = ?",
        params![request_id, action.as_str()],
        |r| r.get(0),
    )
    .unwrap()
}
