use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Hashed once with the same cost as real passwords.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("orderdesk-no-such-user", DEFAULT_COST).ok());

/// Spends the same bcrypt work as [`verify_password`] and discards the
/// result. Login calls this for unknown usernames so they take as long as a
/// wrong password.
pub fn verify_dummy_password(password: &str) {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
}
