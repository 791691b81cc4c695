//! Unbalanced binary search tree over venue handles
//!
//! Each node owns one `Bucket` of venues sharing a key under the tree's
//! `KeySelector`. Left subtree keys compare less than the node's key, right
//! subtree keys compare greater. Equal keys join the existing node's bucket.
//!
//! Descent, removal and traversal are iterative, so a degenerate tree built
//! from sorted input cannot exhaust the stack. Parent links are not stored:
//! removal walks down holding the `&mut` slot that owns the current node,
//! which finds the node and its parent link in a single pass.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::venue::{normalize, Venue, VenueRef};

use super::bucket::{Bucket, DEFAULT_BUCKET_CAPACITY};
use super::errors::{IndexError, IndexResult};

/// Which field of a venue orders a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySelector {
    /// Order by venue name
    Name,
    /// Order by venue location
    Location,
}

impl KeySelector {
    /// Extracts the comparison key from a venue.
    pub fn key<'a>(&self, venue: &'a Venue) -> &'a str {
        match self {
            KeySelector::Name => normalize(&venue.name),
            KeySelector::Location => normalize(&venue.location),
        }
    }

    /// Picks the identity field this selector orders by
    pub fn pick<'a>(&self, name: &'a str, location: &'a str) -> &'a str {
        match self {
            KeySelector::Name => name,
            KeySelector::Location => location,
        }
    }

    /// Lower-case mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySelector::Name => "name",
            KeySelector::Location => "location",
        }
    }
}

impl fmt::Display for KeySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KeySelector {
    type Err = IndexError;

    fn from_str(s: &str) -> IndexResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(KeySelector::Name),
            "location" | "city" => Ok(KeySelector::Location),
            _ => Err(IndexError::unknown_ordering(s.trim())),
        }
    }
}

type Link = Option<Box<IndexNode>>;

/// A tree node: two owned children and one non-empty bucket.
#[derive(Debug)]
pub struct IndexNode {
    left: Link,
    right: Link,
    bucket: Bucket,
}

impl IndexNode {
    fn new(venue: VenueRef, capacity: usize) -> Self {
        let mut bucket = Bucket::with_capacity(capacity);
        bucket.append(venue);
        Self {
            left: None,
            right: None,
            bucket,
        }
    }

    /// The key shared by every venue in this node's bucket
    pub fn key(&self, selector: KeySelector) -> &str {
        match self.bucket.first() {
            Some(venue) => selector.key(venue),
            None => "",
        }
    }

    /// Left child
    pub fn left(&self) -> Option<&IndexNode> {
        self.left.as_deref()
    }

    /// Right child
    pub fn right(&self) -> Option<&IndexNode> {
        self.right.as_deref()
    }

    /// The node's bucket
    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }
}

/// The branch of node deletion taken when a bucket empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcisionCase {
    /// Both children present: the in-order successor's bucket moved up and
    /// the successor node was unlinked instead.
    TwoChildren,
    /// The node was the root with at most one child, which became the root.
    Root,
    /// Only a left child: it takes the node's place under the parent.
    LeftChildOnly,
    /// Only a right child, or a leaf: the right link (possibly empty) takes
    /// the node's place under the parent.
    RightChildOrLeaf,
}

/// Outcome of a successful `IndexTree::remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Matching venues were dropped but others still share the key
    Shrunk { removed: usize, remaining: usize },
    /// The bucket emptied and its node was removed from the tree
    Excised { removed: usize, case: ExcisionCase },
}

impl Removal {
    /// Number of venue handles removed
    pub fn removed(&self) -> usize {
        match self {
            Removal::Shrunk { removed, .. } | Removal::Excised { removed, .. } => *removed,
        }
    }
}

/// Binary search tree keyed by one venue field.
#[derive(Debug)]
pub struct IndexTree {
    root: Link,
    selector: KeySelector,
    /// Inserted minus removed. A sizing hint, not a dedup count.
    count: usize,
    bucket_capacity: usize,
}

impl IndexTree {
    /// Creates an empty tree ordered by `selector`
    pub fn new(selector: KeySelector) -> Self {
        Self::with_bucket_capacity(selector, DEFAULT_BUCKET_CAPACITY)
    }

    /// Creates an empty tree whose new buckets start at `capacity`
    pub fn with_bucket_capacity(selector: KeySelector, capacity: usize) -> Self {
        Self {
            root: None,
            selector,
            count: 0,
            bucket_capacity: capacity.max(1),
        }
    }

    /// The ordering field of this tree
    pub fn selector(&self) -> KeySelector {
        self.selector
    }

    /// Number of venue handles held
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root node, for read-only inspection
    pub fn root(&self) -> Option<&IndexNode> {
        self.root.as_deref()
    }

    /// Inserts a venue. Equal keys append to the existing node's bucket;
    /// a new key becomes a new leaf.
    pub fn insert(&mut self, venue: VenueRef) {
        let selector = self.selector;
        let capacity = self.bucket_capacity;
        let mut slot = &mut self.root;

        while let Some(node) = slot {
            match selector.key(&venue).cmp(node.key(selector)) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Greater => slot = &mut node.right,
                Ordering::Equal => {
                    node.bucket.append(venue);
                    self.count += 1;
                    return;
                }
            }
        }

        *slot = Some(Box::new(IndexNode::new(venue, capacity)));
        self.count += 1;
    }

    /// Finds the node holding `key`
    pub fn search(&self, key: &str) -> Option<&IndexNode> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key(self.selector)) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Returns a copy of the bucket holding `key`
    pub fn lookup(&self, key: &str) -> Option<Bucket> {
        self.search(key).map(|node| node.bucket.duplicate())
    }

    /// Removes every venue matching `name` and `location`.
    ///
    /// The node is located by this tree's ordering field, then its bucket
    /// drops all entries with that exact identity. If the bucket empties the
    /// node is unlinked. Nothing is mutated on error.
    pub fn remove(&mut self, name: &str, location: &str) -> IndexResult<Removal> {
        let selector = self.selector;
        let target = selector.pick(name, location);

        let (slot, at_root) = locate(&mut self.root, selector, target)
            .ok_or_else(|| IndexError::key_not_found(selector.as_str(), target))?;
        let node = slot
            .as_deref_mut()
            .ok_or_else(|| IndexError::key_not_found(selector.as_str(), target))?;

        let removed = node.bucket.remove_by_keys(name, location)?;
        let remaining = node.bucket.len();

        let outcome = if remaining > 0 {
            Removal::Shrunk { removed, remaining }
        } else {
            Removal::Excised {
                removed,
                case: excise(slot, at_root),
            }
        };

        self.count = self.count.saturating_sub(removed);
        Ok(outcome)
    }

    /// In-order flat list of every venue handle
    pub fn venues(&self) -> Vec<VenueRef> {
        let mut out = Vec::with_capacity(self.count);
        self.for_each_in_order(|node| out.extend_from_slice(node.bucket.as_slice()));
        out
    }

    /// In-order text of every venue in the persisted 7-line format, with the
    /// final blank separator line omitted. Empty tree yields "".
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.count * 64);
        self.for_each_in_order(|node| node.bucket.write_persisted(&mut out));
        if out.ends_with("\n\n") {
            out.pop();
        }
        out
    }

    /// Number of nodes (distinct keys)
    pub fn node_count(&self) -> usize {
        let mut nodes = 0;
        self.for_each_in_order(|_| nodes += 1);
        nodes
    }

    /// Length of the longest root-to-leaf path, counted in nodes
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&IndexNode, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        max
    }

    /// Distinct keys in order
    pub fn keys(&self) -> Vec<String> {
        let selector = self.selector;
        let mut keys = Vec::new();
        self.for_each_in_order(|node| keys.push(node.key(selector).to_string()));
        keys
    }

    fn for_each_in_order<'a>(&'a self, mut visit: impl FnMut(&'a IndexNode)) {
        let mut stack: Vec<&IndexNode> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    visit(node);
                    current = node.right.as_deref();
                }
                None => break,
            }
        }
    }
}

impl Drop for IndexTree {
    fn drop(&mut self) {
        // Unlink iteratively; a degenerate chain would overflow the stack in
        // the default recursive drop.
        let mut stack: Vec<Box<IndexNode>> = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// Walks from `slot` to the link that owns the node keyed `target`.
///
/// Also reports whether that link is the tree root. An absent subtree ends
/// the walk before any key comparison is made against it.
fn locate<'a>(
    mut slot: &'a mut Link,
    selector: KeySelector,
    target: &str,
) -> Option<(&'a mut Link, bool)> {
    let mut at_root = true;
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => target.cmp(node.key(selector)),
            None => return None,
        };
        slot = match (ordering, slot) {
            (Ordering::Equal, slot) => return Some((slot, at_root)),
            (Ordering::Less, Some(node)) => &mut node.left,
            (Ordering::Greater, Some(node)) => &mut node.right,
            (_, None) => return None,
        };
        at_root = false;
    }
}

/// Unlinks the node owned by `slot`, whose bucket has emptied.
fn excise(slot: &mut Link, at_root: bool) -> ExcisionCase {
    let mut node = match slot.take() {
        Some(node) => node,
        None => return ExcisionCase::RightChildOrLeaf,
    };

    if node.left.is_some() && node.right.is_some() {
        if let Some(bucket) = take_leftmost(&mut node.right) {
            node.bucket = bucket;
        }
        *slot = Some(node);
        ExcisionCase::TwoChildren
    } else if at_root {
        *slot = node.left.take().or_else(|| node.right.take());
        ExcisionCase::Root
    } else if node.left.is_some() {
        *slot = node.left.take();
        ExcisionCase::LeftChildOnly
    } else {
        *slot = node.right.take();
        ExcisionCase::RightChildOrLeaf
    }
}

/// Unlinks the leftmost node under `slot` and returns its bucket. That node
/// has no left child, so its right link takes its place.
fn take_leftmost(mut slot: &mut Link) -> Option<Bucket> {
    while slot.as_ref().map_or(false, |node| node.left.is_some()) {
        slot = &mut slot.as_mut()?.left;
    }
    let mut successor = slot.take()?;
    *slot = successor.right.take();
    Some(successor.bucket)
}
