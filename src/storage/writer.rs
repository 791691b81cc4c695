//! Catalog file writer
//!
//! Writes `Catalog::serialize` output verbatim and syncs the file before
//! reporting success.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::index::Catalog;
use crate::observability::{Event, Logger};

use super::errors::{StorageError, StorageResult};

/// Writes catalog files to disk.
pub struct CatalogWriter {
    path: PathBuf,
}

impl CatalogWriter {
    /// Writer targeting `path`. Nothing is touched until a write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this writer writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the name tree of `catalog` and writes it, replacing any
    /// existing file. Returns the number of bytes written.
    ///
    /// Every record is checked first; a record with a blank name or
    /// location fails the write and leaves any existing file untouched.
    pub fn write_catalog(&self, catalog: &Catalog) -> StorageResult<usize> {
        for (idx, venue) in catalog.venues().iter().enumerate() {
            if let Err(e) = venue.validate_keys() {
                let err = StorageError::unwritable(idx + 1, e);
                self.log_failure(&err);
                return Err(err);
            }
        }
        self.write_text(&catalog.serialize())
    }

    /// Writes already serialized catalog text.
    pub fn write_text(&self, text: &str) -> StorageResult<usize> {
        let path = self.path.display().to_string();

        match self.write_synced(text) {
            Ok(()) => {
                let bytes = text.len().to_string();
                Logger::info(
                    Event::CatalogWriteComplete,
                    &[("bytes", bytes.as_str()), ("path", path.as_str())],
                );
                Ok(text.len())
            }
            Err(e) => {
                self.log_failure(&e);
                Err(e)
            }
        }
    }

    fn log_failure(&self, err: &StorageError) {
        let path = self.path.display().to_string();
        let message = err.to_string();
        Logger::error(
            Event::CatalogWriteFailed,
            &[("message", message.as_str()), ("path", path.as_str())],
        );
    }

    fn write_synced(&self, text: &str) -> StorageResult<()> {
        let mut file = File::create(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.sync_all().map_err(|e| StorageError::io(&self.path, e))?;
        Ok(())
    }
}
