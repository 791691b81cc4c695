//! venuedb - a venue catalog indexed by name and by location
//!
//! Records live once, behind shared handles; two unbalanced binary search
//! trees order them by name and by location. The catalog is loaded from and
//! written to a plain 7-line-per-record text file.

pub mod cli;
pub mod index;
pub mod observability;
pub mod search;
pub mod storage;
pub mod venue;
