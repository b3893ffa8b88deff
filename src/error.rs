//! Custom error types for coa-ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions. Business-rule violations (duplicate ids,
//! unreachable parents, lookup misses) are ordinary `Err` values; only file
//! failures abort an operation outright.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A line in the account source or posting log could not be parsed
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An account with this number already exists somewhere in the forest
    #[error("Account already exists: {number}")]
    Duplicate { number: u64 },

    /// The account cannot be attached below any existing account
    #[error("Invalid parent for account {number}: {reason}")]
    InvalidParent { number: u64, reason: String },

    /// Applying an amount would push a balance outside the representable range
    #[error("Balance overflow on account {number}")]
    BalanceOverflow { number: u64 },

    /// Direction symbol other than D or C
    #[error("Invalid direction '{0}': use 'D' for debit or 'C' for credit")]
    InvalidDirection(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for a posting index on an account
    pub fn posting_not_found(account: impl ToString, index: usize) -> Self {
        Self::NotFound {
            entity_type: "Posting",
            identifier: format!("#{} on account {}", index, account.to_string()),
        }
    }

    /// Create an invalid-parent error
    pub fn invalid_parent(number: u64, reason: impl Into<String>) -> Self {
        Self::InvalidParent {
            number,
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate-id error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is an invalid-parent error
    pub fn is_invalid_parent(&self) -> bool {
        matches!(self, Self::InvalidParent { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::account_not_found(1100);
        assert_eq!(err.to_string(), "Account not found: 1100");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_posting_not_found_error() {
        let err = LedgerError::posting_not_found(1110, 3);
        assert_eq!(err.to_string(), "Posting not found: #3 on account 1110");
    }

    #[test]
    fn test_parse_error_display() {
        let err = LedgerError::Parse {
            line: 4,
            reason: "missing balance".into(),
        };
        assert_eq!(err.to_string(), "Parse error on line 4: missing balance");
    }

    #[test]
    fn test_classifiers() {
        assert!(LedgerError::Duplicate { number: 1 }.is_duplicate());
        assert!(LedgerError::invalid_parent(123, "gap").is_invalid_parent());
        assert!(!LedgerError::Validation("x".into()).is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }
}
