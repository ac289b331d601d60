//! Mapping of sqlx failures onto the domain error taxonomy.

use crate::domain::foundation::{DomainError, ErrorCode};

/// Converts a sqlx error into a domain error.
///
/// Pool exhaustion and I/O failures are transient and surface as
/// `Unavailable`; everything else is an internal database error.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DomainError::new(
                ErrorCode::Unavailable,
                format!("Database unavailable while trying to {}: {}", context, err),
            )
        }
        other => DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to {}: {}", context, other),
        ),
    }
}

/// Whether the error is a unique violation of the named constraint.
pub(crate) fn violates_constraint(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation() && db.constraint() == Some(constraint))
        .unwrap_or(false)
}

/// Reads a column, reporting decode failures as database errors.
pub(crate) fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    use sqlx::Row;
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to decode column '{}': {}", name, e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCategory;

    #[test]
    fn pool_timeout_is_unavailable() {
        let err = db_error("load crop cycle", sqlx::Error::PoolTimedOut);
        assert_eq!(err.category(), ErrorCategory::Unavailable);
    }

    #[test]
    fn missing_row_is_internal() {
        let err = db_error("load crop cycle", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("load crop cycle"));
    }

    #[test]
    fn non_database_error_violates_nothing() {
        assert!(!violates_constraint(&sqlx::Error::RowNotFound, "any"));
    }
}
