// src/actions.rs
//
// Staff-only mutations on a single request, each paired with one audit
// log append. The request write and the log append are two independent
// calls with no transaction across them; a crash in between leaves the
// mutation without its log entry. Accepted risk, not compensated.
use thiserror::Error;

use crate::db::activity::{self, Action};
use crate::db::requests;
use crate::db::staff::StaffRef;
use crate::errors::ServerError;
use crate::store::Store;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("This action is not available in local mode")]
    StoreUnavailable,
    #[error("Please sign in as staff to perform this action")]
    NotSignedIn,
    #[error("Request not found")]
    RequestGone,
    #[error("{0}")]
    Store(#[from] ServerError),
}

fn preconditions<'a>(
    store: &Store,
    staff: Option<&'a StaffRef>,
) -> Result<&'a StaffRef, ActionError> {
    if !store.is_live() {
        return Err(ActionError::StoreUnavailable);
    }
    staff.ok_or(ActionError::NotSignedIn)
}

/// Resolve a request: set the flag, attach the acting staff snapshot and
/// the server-assigned resolution time, then append the audit entry.
pub fn mark_completed(
    store: &Store,
    staff: Option<&StaffRef>,
    request_id: i64,
    now: i64,
) -> Result<(), ActionError> {
    let staff = preconditions(store, staff)?;

    let touched =
        store.with_conn(|conn| requests::mark_resolved(conn, request_id, staff, now))?;
    if touched == 0 {
        return Err(ActionError::RequestGone);
    }
    store.publish_requests();

    store.with_conn(|conn| activity::append(conn, request_id, Action::MarkCompleted, staff, now))?;
    tracing::info!(request_id, staff = %staff.username, "request marked completed");
    Ok(())
}

/// Delete a request, then append the audit entry. The user-facing confirm
/// step happens in the browser before this is ever called.
pub fn delete_request(
    store: &Store,
    staff: Option<&StaffRef>,
    request_id: i64,
    now: i64,
) -> Result<(), ActionError> {
    let staff = preconditions(store, staff)?;

    let touched = store.with_conn(|conn| requests::delete(conn, request_id))?;
    if touched == 0 {
        return Err(ActionError::RequestGone);
    }
    store.publish_requests();

    store.with_conn(|conn| activity::append(conn, request_id, Action::Delete, staff, now))?;
    tracing::info!(request_id, staff = %staff.username, "request deleted");
    Ok(())
}
