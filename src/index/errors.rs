//! Index error types
//!
//! Error codes:
//! - VENUE_INDEX_KEY_NOT_FOUND (ERROR)
//! - VENUE_INDEX_RECORD_NOT_FOUND (ERROR)
//! - VENUE_INDEX_UNKNOWN_ORDERING (ERROR)
//!
//! Every index error is recovered at the operation boundary. None of them
//! leaves a tree partially mutated.

use std::fmt;

use crate::observability::Severity;

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// No node exists for the requested key
    KeyNotFound,
    /// The node exists but no bucket entry matches name and location
    RecordNotFound,
    /// Ordering mode name not recognised
    UnknownOrderingMode,
}

impl IndexErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::KeyNotFound => "VENUE_INDEX_KEY_NOT_FOUND",
            IndexErrorCode::RecordNotFound => "VENUE_INDEX_RECORD_NOT_FOUND",
            IndexErrorCode::UnknownOrderingMode => "VENUE_INDEX_UNKNOWN_ORDERING",
        }
    }

    /// Severity used when this error is logged and displayed
    pub fn severity(&self) -> Severity {
        match self {
            IndexErrorCode::KeyNotFound
            | IndexErrorCode::RecordNotFound
            | IndexErrorCode::UnknownOrderingMode => Severity::Error,
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with full context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexError {
    code: IndexErrorCode,
    message: String,
}

impl IndexError {
    /// No node holds `key` in the tree ordered by `ordering`
    pub fn key_not_found(ordering: &str, key: &str) -> Self {
        Self {
            code: IndexErrorCode::KeyNotFound,
            message: format!("no results for {} '{}'", ordering, key),
        }
    }

    /// A node matched the key but held no record with this identity
    pub fn record_not_found(name: &str, location: &str) -> Self {
        Self {
            code: IndexErrorCode::RecordNotFound,
            message: format!("venue not found: '{}' in '{}'", name, location),
        }
    }

    /// Ordering mode text did not name a known mode
    pub fn unknown_ordering(mode: &str) -> Self {
        Self {
            code: IndexErrorCode::UnknownOrderingMode,
            message: format!("unknown ordering mode: '{}'", mode),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for either of the two "nothing to remove" outcomes
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            IndexErrorCode::KeyNotFound | IndexErrorCode::RecordNotFound
        )
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
