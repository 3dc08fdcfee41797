//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum CatalogError {
    /// A caller supplied a value that does not resolve to a stored entity,
    /// or an input that fails validation. Unresolved natural keys and
    /// wrong-shaped input surface as the same kind on purpose.
    InvalidArgument(String),
    /// An attempted creation would violate a uniqueness constraint
    /// (author name, library location, username).
    UniquenessViolation(String),
    /// Entity does not exist by primary key
    NotFound,
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CatalogError::UniquenessViolation(msg) => {
                write!(f, "Uniqueness violation: {}", msg)
            }
            CatalogError::NotFound => write!(f, "Resource not found"),
            CatalogError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

// Uniqueness is enforced by the store, not by application-level pre-checks,
// so the UNIQUE failure has to be picked out of the driver error here.
impl From<sea_orm::DbErr> for CatalogError {
    fn from(e: sea_orm::DbErr) -> Self {
        let msg = e.to_string();
        if msg.contains("UNIQUE constraint failed") {
            CatalogError::UniquenessViolation(msg)
        } else if msg.contains("FOREIGN KEY constraint failed") {
            // A stale entity reference (row deleted out from under the
            // caller) is a caller problem, same as an unresolved key
            CatalogError::InvalidArgument(msg)
        } else {
            CatalogError::Database(msg)
        }
    }
}
