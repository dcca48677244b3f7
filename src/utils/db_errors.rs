use orderdesk_core::AppError;

/// Maps constraint violations on insert/update to client errors.
///
/// Unique violations become 409 with `conflict`; broken foreign keys and
/// check constraints become 400. Anything else stays a 500.
pub fn map_write_error(e: sqlx::Error, conflict: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow::anyhow!(conflict));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow::anyhow!("Referenced record does not exist"));
        }
        if db_err.is_check_violation() {
            return AppError::bad_request(anyhow::anyhow!("Value violates a constraint"));
        }
    }
    AppError::from(e)
}

/// Deletes fail with 409 while other rows still reference the target.
pub fn map_delete_error(e: sqlx::Error, in_use: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::conflict(anyhow::anyhow!(in_use));
    }
    AppError::from(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_non_database_error_is_internal() {
        let err = map_write_error(sqlx::Error::RowNotFound, "duplicate");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
