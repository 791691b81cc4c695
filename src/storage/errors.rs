//! # Catalog File Errors
//!
//! Error codes:
//! - VENUE_STORAGE_IO_ERROR: file cannot be opened, read or written
//! - VENUE_STORAGE_MALFORMED_RECORD: file content does not parse
//! - VENUE_STORAGE_UNWRITABLE_RECORD: a record the file format cannot hold
//!
//! All abort the operation before any catalog mutation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::venue::VenueError;

/// Result type for catalog file operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Catalog file errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Record {position} cannot be written: {source}")]
    UnwritableRecord {
        position: usize,
        #[source]
        source: VenueError,
    },
}

impl StorageError {
    /// I/O failure on `path`
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Parse failure at 1-based `line`
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        StorageError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Record at 1-based `position` in name order cannot be persisted
    pub fn unwritable(position: usize, source: VenueError) -> Self {
        StorageError::UnwritableRecord { position, source }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "VENUE_STORAGE_IO_ERROR",
            StorageError::MalformedRecord { .. } => "VENUE_STORAGE_MALFORMED_RECORD",
            StorageError::UnwritableRecord { .. } => "VENUE_STORAGE_UNWRITABLE_RECORD",
        }
    }
}
