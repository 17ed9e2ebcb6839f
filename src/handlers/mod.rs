pub mod booking;
pub mod calendar;
pub mod closed_day;
pub mod export;
pub mod package;
pub mod report;
pub mod settings;
pub mod shift;
pub mod transaction;
pub mod user;

use crate::error::AppError;
use sqlx::Error as SqlxError;

/// Map a Postgres unique violation to a conflict with a friendly message.
pub(crate) fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}
