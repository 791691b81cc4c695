//! Growable membership list for records sharing one key
//!
//! A bucket holds handles, never the records themselves. Growth doubles the
//! capacity when the list is full, starting from `DEFAULT_BUCKET_CAPACITY`.

use crate::venue::{normalize, VenueRef};

use super::errors::{IndexError, IndexResult};

/// Initial capacity of a freshly created bucket
pub const DEFAULT_BUCKET_CAPACITY: usize = 10;

/// Ordered list of venue handles.
///
/// Iteration order is insertion order. While owned by a tree node a bucket
/// is never empty; emptying it is what removes the node.
#[derive(Debug)]
pub struct Bucket {
    entries: Vec<VenueRef>,
}

impl Bucket {
    /// Creates an empty bucket with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUCKET_CAPACITY)
    }

    /// Creates an empty bucket with the given initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Appends a handle at the end, doubling capacity when full.
    pub fn append(&mut self, venue: VenueRef) {
        if self.entries.len() == self.entries.capacity() {
            let grow_by = self.entries.capacity().max(1);
            self.entries.reserve_exact(grow_by);
        }
        self.entries.push(venue);
    }

    /// Returns the handle at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`. Callers check bounds first.
    pub fn get(&self, index: usize) -> &VenueRef {
        &self.entries[index]
    }

    /// Returns the first handle, the representative of the bucket's key
    pub fn first(&self) -> Option<&VenueRef> {
        self.entries.first()
    }

    /// Number of handles held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bucket holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current allocated capacity
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Iterates handles in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, VenueRef> {
        self.entries.iter()
    }

    /// Borrows the handles as a slice
    pub fn as_slice(&self) -> &[VenueRef] {
        &self.entries
    }

    /// Position of the first entry whose name and location both match.
    ///
    /// Stored text is compared after stripping one trailing `\r`.
    pub fn find_by_keys(&self, name: &str, location: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|v| normalize(&v.name) == name && normalize(&v.location) == location)
    }

    /// Removes every entry matching name and location, keeping the order of
    /// the rest. Returns how many were removed.
    ///
    /// A bucket may legitimately hold several records with the same name and
    /// location that differ in other fields; one request clears the whole
    /// cluster. Fails with `RecordNotFound` only when nothing matched.
    pub fn remove_by_keys(&mut self, name: &str, location: &str) -> IndexResult<usize> {
        let mut removed = 0;
        while let Some(pos) = self.find_by_keys(name, location) {
            self.entries.remove(pos);
            removed += 1;
        }

        if removed == 0 {
            return Err(IndexError::record_not_found(name, location));
        }
        Ok(removed)
    }

    /// Copies the handle list into a new bucket. The records are shared,
    /// not cloned.
    pub fn duplicate(&self) -> Self {
        let mut target = Self::with_capacity(self.entries.capacity());
        for venue in &self.entries {
            target.append(VenueRef::clone(venue));
        }
        target
    }

    /// Appends the persisted form of every member to `out`
    pub fn write_persisted(&self, out: &mut String) {
        for venue in &self.entries {
            venue.write_persisted(out);
        }
    }
}

impl Default for Bucket {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Bucket {
    type Item = &'a VenueRef;
    type IntoIter = std::slice::Iter<'a, VenueRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
