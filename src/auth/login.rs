// src/auth/login.rs
use thiserror::Error;

use crate::db::staff::{self, StaffRef};
use crate::errors::ServerError;
use crate::store::Store;

/// Sign-in failures, worded exactly as shown to the user. Unknown
/// username and wrong password share one message on purpose so a probe
/// cannot tell which half failed.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please enter username and password")]
    MissingFields,
    #[error("Incorrect username or password")]
    IncorrectCredentials,
    #[error("This staff account is inactive")]
    Inactive,
    #[error("Staff sign-in is not available without the request database")]
    StoreUnavailable,
    #[error("Login failed: {0}")]
    Store(#[from] ServerError),
}

/// Credential check against the staff_users collection:
/// - store must be live (local mode cannot authenticate anyone)
/// - both fields non-empty, checked before any store call
/// - exact username match, limit 1
/// - `active` explicitly false blocks the account with its own message
/// - plaintext equality on the password (preserved behavior)
pub fn login(store: &Store, username: &str, password: &str) -> Result<StaffRef, LoginError> {
    if !store.is_live() {
        return Err(LoginError::StoreUnavailable);
    }

    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LoginError::MissingFields);
    }

    let row = store.with_conn(|conn| staff::find_by_username(conn, username))?;
    let Some(row) = row else {
        return Err(LoginError::IncorrectCredentials);
    };

    if row.active == Some(false) {
        return Err(LoginError::Inactive);
    }

    if row.password != password {
        return Err(LoginError::IncorrectCredentials);
    }

    Ok(StaffRef::from(&row))
}
