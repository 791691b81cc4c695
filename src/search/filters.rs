//! Linear-scan filters and identity intersection
//!
//! Filters never clone venues: results hold the same handles as the input,
//! and `intersect` compares handles with `Rc::ptr_eq`.

use std::rc::Rc;

use crate::venue::{normalize, PriceTier, VenueRef};

use super::criteria::SearchCriteria;

/// Venues located exactly in `city`
pub fn by_city(data: &[VenueRef], city: &str) -> Vec<VenueRef> {
    data.iter()
        .filter(|v| normalize(&v.location) == city)
        .cloned()
        .collect()
}

/// Venues priced at or below `ceiling`.
///
/// `$` keeps only `$`, `$$` keeps `$` and `$$`, `$$$` keeps everything.
pub fn by_max_price(data: &[VenueRef], ceiling: PriceTier) -> Vec<VenueRef> {
    data.iter().filter(|v| v.price <= ceiling).cloned().collect()
}

/// Venues carrying at least one of `categories`
pub fn by_any_category(data: &[VenueRef], categories: &[String]) -> Vec<VenueRef> {
    data.iter()
        .filter(|v| categories.iter().any(|c| v.has_category(c)))
        .cloned()
        .collect()
}

/// Keeps the members of `one` that also appear, by identity, in `two`.
/// Order follows `one`.
pub fn intersect(one: &[VenueRef], two: &[VenueRef]) -> Vec<VenueRef> {
    one.iter()
        .filter(|a| two.iter().any(|b| Rc::ptr_eq(*a, b)))
        .cloned()
        .collect()
}

/// Applies every active criterion and folds the results by intersection.
/// Wildcard criteria are skipped outright rather than scanned.
pub fn search(data: &[VenueRef], criteria: &SearchCriteria) -> Vec<VenueRef> {
    let mut candidates: Vec<Vec<VenueRef>> = Vec::with_capacity(3);

    if let Some(city) = &criteria.city {
        candidates.push(by_city(data, city));
    }
    if let Some(ceiling) = criteria.max_price {
        candidates.push(by_max_price(data, ceiling));
    }
    if let Some(categories) = &criteria.categories {
        candidates.push(by_any_category(data, categories));
    }

    let mut sets = candidates.into_iter();
    match sets.next() {
        Some(first) => sets.fold(first, |acc, next| intersect(&acc, &next)),
        None => data.to_vec(),
    }
}
