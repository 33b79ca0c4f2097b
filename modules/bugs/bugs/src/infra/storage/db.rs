use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Map a storage error to a domain error.
pub fn db_err(e: DbErr) -> DomainError {
    DomainError::from(e)
}

/// Map a unique-constraint violation to `on_conflict`; anything else is a database error.
///
/// Unique indexes back the in-transaction checks, so a violation here means a
/// concurrent writer won the race.
pub fn unique_or(e: DbErr, on_conflict: DomainError) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => on_conflict,
        _ => db_err(e),
    }
}
