//! Mapping from SQLite plumbing errors onto the domain taxonomy.
//!
//! The `SchoolStore` contract exposes [`campus_core::Error`] directly, so
//! this backend has no public error type of its own: plumbing failures are
//! lowered into the opaque `Storage` variant, and constraint violations are
//! recognised here so callers see typed conflicts instead.

use campus_core::Error;

/// Lower a backend error into the opaque storage variant.
pub(crate) fn storage(e: tokio_rusqlite::Error) -> Error {
  Error::Storage(e.to_string())
}

/// A column value that failed to decode into its domain type.
pub(crate) fn decode(column: &str, value: &str) -> Error {
  Error::Storage(format!("invalid {column} in database: {value:?}"))
}

/// True when `e` is a violation of a unique constraint whose message names
/// `column` (SQLite reports `UNIQUE constraint failed: table.column`).
pub(crate) fn is_unique_violation(e: &rusqlite::Error, column: &str) -> bool {
  match e {
    rusqlite::Error::SqliteFailure(f, Some(message)) => {
      f.code == rusqlite::ErrorCode::ConstraintViolation
        && message.contains(column)
    }
    _ => false,
  }
}
