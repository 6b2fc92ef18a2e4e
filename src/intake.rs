// src/intake.rs
use thiserror::Error;

use crate::clock;
use crate::db::requests::{self, NewRequest};
use crate::errors::ServerError;
use crate::store::{LocalRecord, LocalStore, Store};

/// Raw intake form values as posted by the customer.
#[derive(Debug, Default, Clone)]
pub struct IntakeForm {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub description: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Written to the request database; the feed will pick it up.
    Stored,
    /// No database configured; saved to the local fallback file.
    SavedLocally,
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Please fill all required fields")]
    MissingFields,
    #[error("Failed to submit request: {0}")]
    Store(#[from] ServerError),
}

/// Trim the four required fields; any of them empty blocks the submit
/// with no write. Category comes from a fixed select, so it passes
/// through as-is.
fn validate(form: &IntakeForm) -> Result<NewRequest, IntakeError> {
    let name = form.name.trim();
    let phone = form.phone.trim();
    let address = form.address.trim();
    let description = form.description.trim();

    if name.is_empty() || phone.is_empty() || address.is_empty() || description.is_empty() {
        return Err(IntakeError::MissingFields);
    }

    Ok(NewRequest {
        name: name.to_string(),
        phone: phone.to_string(),
        address: address.to_string(),
        category: form.category.trim().to_string(),
        description: description.to_string(),
    })
}

/// Submit one service request. Exactly one record per success, resolved
/// false, timestamp server-assigned when live and client ISO otherwise.
pub fn submit(store: &Store, form: &IntakeForm, now: i64) -> Result<SubmitOutcome, IntakeError> {
    let new = validate(form)?;

    match store.local() {
        None => {
            store.with_conn(|conn| requests::insert(conn, &new, now))?;
            store.publish_requests();
            Ok(SubmitOutcome::Stored)
        }
        Some(local) => {
            save_locally(local, &new)?;
            Ok(SubmitOutcome::SavedLocally)
        }
    }
}

fn save_locally(local: &LocalStore, new: &NewRequest) -> Result<(), ServerError> {
    let record = LocalRecord {
        name: new.name.clone(),
        phone: new.phone.clone(),
        address: new.address.clone(),
        category: new.category.clone(),
        description: new.description.clone(),
        created_at: clock::now_iso(),
        resolved: false,
    };
    local.put(&LocalStore::key_for(clock::now_millis()), &record)
}
