//! The pair of trees that make up a venue catalog
//!
//! # API
//!
//! - `insert(venue)` - Share one record between both trees
//! - `remove(name, location)` - Remove from each tree independently
//! - `serialize()` - Name-ordered persisted text
//! - `venues()` / `search(criteria)` - Flat views for filtering
//!
//! The trees never coordinate with each other. Removal runs against the
//! name tree and then, as a separate operation, against the location tree;
//! each reports its own outcome.

use crate::observability::{Event, Logger};
use crate::search::{self, SearchCriteria};
use crate::venue::{Venue, VenueRef};

use super::btree::{IndexTree, KeySelector, Removal};
use super::bucket::DEFAULT_BUCKET_CAPACITY;
use super::errors::{IndexErrorCode, IndexResult};

/// Per-tree outcome of a catalog removal
#[derive(Debug)]
pub struct RemoveReport {
    /// Outcome in the name-ordered tree
    pub by_name: IndexResult<Removal>,
    /// Outcome in the location-ordered tree
    pub by_location: IndexResult<Removal>,
}

impl RemoveReport {
    /// True if at least one tree dropped something
    pub fn removed_any(&self) -> bool {
        self.by_name.is_ok() || self.by_location.is_ok()
    }
}

/// Name and location indexes over shared venue records
#[derive(Debug)]
pub struct Catalog {
    by_name: IndexTree,
    by_location: IndexTree,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::with_bucket_capacity(DEFAULT_BUCKET_CAPACITY)
    }

    /// Creates an empty catalog whose buckets start at `capacity`
    pub fn with_bucket_capacity(capacity: usize) -> Self {
        Self {
            by_name: IndexTree::with_bucket_capacity(KeySelector::Name, capacity),
            by_location: IndexTree::with_bucket_capacity(KeySelector::Location, capacity),
        }
    }

    /// Inserts a new record into both trees and returns its shared handle
    pub fn insert(&mut self, venue: Venue) -> VenueRef {
        let venue = venue.into_ref();
        self.insert_ref(VenueRef::clone(&venue));
        venue
    }

    /// Inserts an existing handle into both trees
    pub fn insert_ref(&mut self, venue: VenueRef) {
        Logger::trace(
            Event::VenueInserted,
            &[("location", venue.location.as_str()), ("name", venue.name.as_str())],
        );
        self.by_name.insert(VenueRef::clone(&venue));
        self.by_location.insert(venue);
    }

    /// Removes `name` at `location` from the name tree, then from the
    /// location tree.
    pub fn remove(&mut self, name: &str, location: &str) -> RemoveReport {
        let by_name = remove_logged(&mut self.by_name, name, location);
        let by_location = remove_logged(&mut self.by_location, name, location);
        RemoveReport {
            by_name,
            by_location,
        }
    }

    /// Name-ordered tree
    pub fn by_name(&self) -> &IndexTree {
        &self.by_name
    }

    /// Location-ordered tree
    pub fn by_location(&self) -> &IndexTree {
        &self.by_location
    }

    /// Tree ordered by `selector`
    pub fn tree(&self, selector: KeySelector) -> &IndexTree {
        match selector {
            KeySelector::Name => &self.by_name,
            KeySelector::Location => &self.by_location,
        }
    }

    /// Record count as tracked by the name tree
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// True if the name tree is empty
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Persisted text of every venue in name order
    pub fn serialize(&self) -> String {
        self.by_name.serialize()
    }

    /// Every venue in name order
    pub fn venues(&self) -> Vec<VenueRef> {
        self.by_name.venues()
    }

    /// Runs `criteria` over the name-ordered venue list
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<VenueRef> {
        search::search(&self.venues(), criteria)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_logged(tree: &mut IndexTree, name: &str, location: &str) -> IndexResult<Removal> {
    let ordering = tree.selector().as_str();
    let result = tree.remove(name, location);

    match &result {
        Ok(removal) => {
            let removed = removal.removed().to_string();
            let fields = [
                ("location", location),
                ("name", name),
                ("removed", removed.as_str()),
                ("tree", ordering),
            ];
            Logger::info(Event::VenueRemoved, &fields);
            if let Removal::Excised { case, .. } = removal {
                let case = format!("{:?}", case);
                Logger::trace(
                    Event::IndexNodeExcised,
                    &[("case", case.as_str()), ("tree", ordering)],
                );
            }
        }
        Err(e) => {
            let event = match e.code() {
                IndexErrorCode::KeyNotFound => Event::IndexKeyNotFound,
                IndexErrorCode::RecordNotFound => Event::IndexRecordNotFound,
                IndexErrorCode::UnknownOrderingMode => Event::UnknownOrderingMode,
            };
            Logger::log(e.severity(), event, &[("message", e.message()), ("tree", ordering)]);
        }
    }

    result
}
