//! Dual index over venue records
//!
//! A catalog keeps two unbalanced binary search trees over the same shared
//! records: one ordered by name, one by location.
//!
//! # Invariants
//!
//! - Left subtree keys < node key < right subtree keys (byte-wise)
//! - Every venue in a node's bucket has the node's key
//! - A bucket owned by a node is never empty
//! - No node is reachable from two parents
//!
//! Neither tree rebalances. Height depends only on insertion and removal
//! history.

mod btree;
mod bucket;
mod catalog;
mod errors;

pub use btree::{ExcisionCase, IndexNode, IndexTree, KeySelector, Removal};
pub use bucket::{Bucket, DEFAULT_BUCKET_CAPACITY};
pub use catalog::{Catalog, RemoveReport};
pub use errors::{IndexError, IndexErrorCode, IndexResult};
