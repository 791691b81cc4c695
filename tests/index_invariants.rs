//! Index Invariant Tests
//!
//! Tests for tree invariants:
//! - Every left key < node key < every right key
//! - Every venue in a bucket carries the node's key
//! - No bucket reachable from the root is empty
//! - Duplicate keys share one node, in insertion order

use std::rc::Rc;

use venuedb::index::{IndexNode, IndexTree, KeySelector, Removal};
use venuedb::venue::{PriceTier, Venue, VenueRef};

// =============================================================================
// Helper Functions
// =============================================================================

fn venue(name: &str, location: &str) -> VenueRef {
    Venue::new(name, location, vec!["Food".into()], PriceTier::Moderate, 4.0, 10).into_ref()
}

/// Walks the tree and asserts every structural invariant. Returns the
/// number of records seen.
fn check_invariants(tree: &IndexTree) -> usize {
    let selector = tree.selector();
    let mut seen = 0;
    let mut stack: Vec<(&IndexNode, Option<String>, Option<String>)> = Vec::new();

    if let Some(root) = tree.root() {
        stack.push((root, None, None));
    }

    while let Some((node, low, high)) = stack.pop() {
        let key = node.key(selector).to_string();

        if let Some(low) = &low {
            assert!(key.as_str() > low.as_str(), "{} must sort after {}", key, low);
        }
        if let Some(high) = &high {
            assert!(key.as_str() < high.as_str(), "{} must sort before {}", key, high);
        }

        assert!(!node.bucket().is_empty(), "bucket for {} is empty", key);
        for venue in node.bucket() {
            assert_eq!(selector.key(venue), key);
        }
        seen += node.bucket().len();

        if let Some(left) = node.left() {
            stack.push((left, low.clone(), Some(key.clone())));
        }
        if let Some(right) = node.right() {
            stack.push((right, Some(key), high));
        }
    }

    assert_eq!(seen, tree.len());
    seen
}

/// Deterministic pseudo-random sequence
fn sequence(seed: u64, len: usize) -> Vec<u64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            state >> 33
        })
        .collect()
}

// =============================================================================
// Grouping Tests
// =============================================================================

/// Records sharing a name land in one node, in insertion order.
#[test]
fn test_duplicate_names_share_a_node() {
    let mut tree = IndexTree::new(KeySelector::Name);
    tree.insert(venue("Pizza Place", "NYC"));
    tree.insert(venue("Sushi Spot", "LA"));
    tree.insert(venue("Pizza Place", "Chicago"));

    assert_eq!(tree.node_count(), 2);
    let root = tree.root().unwrap();
    assert_eq!(root.key(KeySelector::Name), "Pizza Place");
    assert_eq!(root.right().unwrap().key(KeySelector::Name), "Sushi Spot");
    assert!(root.left().is_none());

    let locations: Vec<&str> = root.bucket().iter().map(|v| v.location.as_str()).collect();
    assert_eq!(locations, vec!["NYC", "Chicago"]);
    check_invariants(&tree);
}

/// Removing both duplicates shrinks, then excises the node.
#[test]
fn test_duplicate_removal_shrinks_then_excises() {
    let mut tree = IndexTree::new(KeySelector::Name);
    tree.insert(venue("Pizza Place", "NYC"));
    tree.insert(venue("Sushi Spot", "LA"));
    tree.insert(venue("Pizza Place", "Chicago"));

    let first = tree.remove("Pizza Place", "NYC").unwrap();
    assert_eq!(first, Removal::Shrunk { removed: 1, remaining: 1 });
    let bucket = tree.lookup("Pizza Place").unwrap();
    assert_eq!(bucket.get(0).location, "Chicago");

    let second = tree.remove("Pizza Place", "Chicago").unwrap();
    assert!(matches!(second, Removal::Excised { removed: 1, .. }));
    assert_eq!(tree.keys(), vec!["Sushi Spot"]);
    assert_eq!(tree.root().unwrap().key(KeySelector::Name), "Sushi Spot");
    check_invariants(&tree);
}

/// Both trees hold the same handle for a record.
#[test]
fn test_trees_share_handles() {
    let mut by_name = IndexTree::new(KeySelector::Name);
    let mut by_location = IndexTree::new(KeySelector::Location);
    let record = venue("Diner", "Austin");

    by_name.insert(Rc::clone(&record));
    by_location.insert(Rc::clone(&record));

    let a = by_name.search("Diner").unwrap().bucket().get(0);
    let b = by_location.search("Austin").unwrap().bucket().get(0);
    assert!(Rc::ptr_eq(a, b));
}

// =============================================================================
// Ordering Under Churn
// =============================================================================

/// Invariants hold after every insert and removal in a mixed workload.
#[test]
fn test_invariants_survive_churn() {
    let mut tree = IndexTree::with_bucket_capacity(KeySelector::Name, 1);
    let mut live: Vec<(String, String)> = Vec::new();

    for (i, n) in sequence(7, 400).into_iter().enumerate() {
        let name = format!("venue-{:03}", n % 60);
        let location = format!("city-{}", i % 5);
        tree.insert(venue(&name, &location));
        live.push((name, location));
        check_invariants(&tree);
    }

    // Each removal clears a whole (name, location) cluster, so `live`
    // shrinks by at least one per step and 400 picks are enough to drain it.
    let mut picks = sequence(11, 400).into_iter();
    while !live.is_empty() {
        let n = picks.next().expect("enough picks to drain the tree");
        let (name, location) = live.swap_remove((n as usize) % live.len());
        let still_present = live.iter().filter(|(a, b)| *a == name && *b == location).count();

        let removal = tree.remove(&name, &location).unwrap();
        live.retain(|(a, b)| !(*a == name && *b == location));
        assert_eq!(removal.removed(), still_present + 1);

        check_invariants(&tree);
        assert_eq!(tree.len(), live.len());
    }

    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.node_count(), 0);
}

/// In-order keys come out strictly ascending.
#[test]
fn test_keys_ascend() {
    let mut tree = IndexTree::new(KeySelector::Location);
    for n in sequence(3, 200) {
        tree.insert(venue("Any", &format!("loc-{}", n % 97)));
    }

    let keys = tree.keys();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(keys.len(), tree.node_count());
}

/// Rebuilding from the same sequence gives the same shape.
#[test]
fn test_same_inserts_same_shape() {
    let build = || {
        let mut tree = IndexTree::new(KeySelector::Name);
        for n in sequence(42, 100) {
            tree.insert(venue(&format!("v{}", n % 31), "X"));
        }
        tree
    };

    let a = build();
    let b = build();
    assert_eq!(a.height(), b.height());
    assert_eq!(a.serialize(), b.serialize());
    assert_eq!(a.keys(), b.keys());
}
