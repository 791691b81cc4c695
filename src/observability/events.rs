//! Observable catalog events
//!
//! Every line the logger emits names one of these.

use std::fmt;

/// Observable events in venuedb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded and validated
    ConfigLoaded,

    // Catalog file
    /// Catalog load started
    CatalogLoadStart,
    /// Catalog load finished, trees populated
    CatalogLoadComplete,
    /// Catalog load aborted, nothing inserted
    CatalogLoadFailed,
    /// Catalog written to disk
    CatalogWriteComplete,
    /// Catalog write failed
    CatalogWriteFailed,

    // Index
    /// Venue inserted into both trees
    VenueInserted,
    /// Venue removed from one tree
    VenueRemoved,
    /// A tree node was unlinked after its bucket emptied
    IndexNodeExcised,
    /// No node for the requested key
    IndexKeyNotFound,
    /// Node found, no matching venue in its bucket
    IndexRecordNotFound,
    /// Ordering mode text not recognised
    UnknownOrderingMode,

    // Console
    /// Console loop entered
    ConsoleStart,
    /// Console loop left
    ConsoleExit,
    /// Unrecognised console command
    UnknownCommand,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::CatalogLoadStart => "CATALOG_LOAD_BEGIN",
            Event::CatalogLoadComplete => "CATALOG_LOAD_COMPLETE",
            Event::CatalogLoadFailed => "CATALOG_LOAD_FAILED",
            Event::CatalogWriteComplete => "CATALOG_WRITE_COMPLETE",
            Event::CatalogWriteFailed => "CATALOG_WRITE_FAILED",

            Event::VenueInserted => "VENUE_INSERTED",
            Event::VenueRemoved => "VENUE_REMOVED",
            Event::IndexNodeExcised => "INDEX_NODE_EXCISED",
            Event::IndexKeyNotFound => "INDEX_KEY_NOT_FOUND",
            Event::IndexRecordNotFound => "INDEX_RECORD_NOT_FOUND",
            Event::UnknownOrderingMode => "UNKNOWN_ORDERING_MODE",

            Event::ConsoleStart => "CONSOLE_START",
            Event::ConsoleExit => "CONSOLE_EXIT",
            Event::UnknownCommand => "UNKNOWN_COMMAND",
        }
    }

    /// Failure events are logged at ERROR or WARN, never INFO
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::CatalogLoadFailed
                | Event::CatalogWriteFailed
                | Event::IndexKeyNotFound
                | Event::IndexRecordNotFound
                | Event::UnknownOrderingMode
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
