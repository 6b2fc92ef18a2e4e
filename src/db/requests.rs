// src/db/requests.rs
use rusqlite::{params, Connection, Row};

use crate::db::staff::StaffRef;
use crate::errors::ServerError;

/// One customer service request. Created unresolved; the only mutation is
/// a single transition to resolved, which attaches who did it and when.
#[derive(Debug, Clone)]
pub struct RequestRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub description: String,
    pub created_at: i64,
    pub resolved: bool,
    pub resolved_by: Option<StaffRef>,
    pub resolved_at: Option<i64>,
}

/// Validated intake payload, ready to insert.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub description: String,
}

fn row_to_request(r: &Row) -> rusqlite::Result<RequestRow> {
    let resolved_by_id: Option<i64> = r.get(8)?;
    let resolved_by = match resolved_by_id {
        Some(staff_id) => Some(StaffRef {
            staff_id,
            username: r.get::<_, Option<String>>(9)?.unwrap_or_default(),
            display_name: r.get::<_, Option<String>>(10)?.unwrap_or_default(),
        }),
        None => None,
    };
    Ok(RequestRow {
        id: r.get(0)?,
        name: r.get(1)?,
        phone: r.get(2)?,
        address: r.get(3)?,
        category: r.get(4)?,
        description: r.get(5)?,
        created_at: r.get(6)?,
        resolved: r.get(7)?,
        resolved_by,
        resolved_at: r.get(11)?,
    })
}

const REQUEST_COLUMNS: &str = "id, name, phone, address, category, description, created_at, \
     resolved, resolved_by_id, resolved_by_username, resolved_by_display_name, resolved_at";

pub fn insert(conn: &Connection, new: &NewRequest, now: i64) -> Result<i64, ServerError> {
    conn.execute(
        "insert into service_requests
           (name, phone, address, category, description, created_at, resolved)
         values (?, ?, ?, ?, ?, ?, 0)",
        params![
            new.name,
            new.phone,
            new.address,
            new.category,
            new.description,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert request failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// Full collection snapshot, newest first. Id breaks ties so same-second
/// inserts keep a stable order.
pub fn list_all_desc(conn: &mut Connection) -> Result<Vec<RequestRow>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {REQUEST_COLUMNS} from service_requests
             order by created_at desc, id desc"
        ))
        .map_err(|e| ServerError::DbError(format!("prepare request list failed: {e}")))?;

    let rows = stmt
        .query_map([], |r| row_to_request(r))
        .map_err(|e| ServerError::DbError(format!("query requests failed: {e}")))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(format!("read request row failed: {e}")))?;

    Ok(rows)
}

/// Flip a request to resolved, recording the acting staff snapshot and the
/// server-assigned resolution time. Returns the number of rows touched
/// (zero when the request is gone).
pub fn mark_resolved(
    conn: &Connection,
    request_id: i64,
    staff: &StaffRef,
    now: i64,
) -> Result<usize, ServerError> {
    conn.execute(
        "update service_requests
         set resolved = 1,
             resolved_by_id = ?,
             resolved_by_username = ?,
             resolved_by_display_name = ?,
             resolved_at = ?
         where id = ?",
        params![
            staff.staff_id,
            staff.username,
            staff.display_name,
            now,
            request_id
        ],
    )
    .map_err(|e| ServerError::DbError(format!("mark resolved failed: {e}")))
}

pub fn delete(conn: &Connection, request_id: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from service_requests where id = ?",
        params![request_id],
    )
    .map_err(|e| ServerError::DbError(format!("delete request failed: {e}")))
}
