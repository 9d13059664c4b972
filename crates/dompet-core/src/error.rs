//! Error types for Dompet core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.
//!
//! Lookups and deletes of a missing id are not errors: `get_*` returns
//! `Ok(None)` and `delete_*`/`update_*` are silent no-ops.

use thiserror::Error;

/// Result type alias for Dompet operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Core error type for Dompet operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller supplied an out-of-domain value
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl LedgerError {
    /// True for errors caused by caller input rather than the storage engine.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = LedgerError::Validation("amount must be positive".to_string());
        assert_eq!(err.to_string(), "Validation error: amount must be positive");
        assert!(err.is_validation());
    }

    #[test]
    fn test_sqlite_error_converts() {
        let err: LedgerError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, LedgerError::Sqlite { .. }));
        assert!(!err.is_validation());
    }
}
