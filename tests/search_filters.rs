//! Search Filter Tests
//!
//! Tests for the combined search:
//! - Wildcards switch a criterion off
//! - Active criteria combine by identity intersection
//! - Results keep name order and never copy records

use std::rc::Rc;

use venuedb::index::Catalog;
use venuedb::search::{by_any_category, by_city, by_max_price, intersect, search, SearchCriteria};
use venuedb::venue::{PriceTier, Venue, VenueRef};

// =============================================================================
// Helper Functions
// =============================================================================

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for (name, city, categories, price) in [
        ("Pizza Place", "NYC", "Pizza, Italian", PriceTier::Moderate),
        ("Burger Joint", "Chicago", "Burgers", PriceTier::Cheap),
        ("Sushi Bar", "NYC", "Sushi, Japanese", PriceTier::Expensive),
        ("Noodle House", "NYC", "Japanese, Noodles", PriceTier::Cheap),
        ("Trattoria", "Chicago", "Italian", PriceTier::Expensive),
    ] {
        let categories = categories.split(", ").map(String::from).collect();
        catalog.insert(Venue::new(name, city, categories, price, 4.0, 10));
    }
    catalog
}

fn names(venues: &[VenueRef]) -> Vec<&str> {
    venues.iter().map(|v| v.name.as_str()).collect()
}

// =============================================================================
// Combined Search
// =============================================================================

#[test]
fn test_all_wildcards_return_everything_in_name_order() {
    let catalog = sample_catalog();

    let results = catalog.search(&SearchCriteria::parse("*", "*", "*").unwrap());

    assert_eq!(
        names(&results),
        vec!["Burger Joint", "Noodle House", "Pizza Place", "Sushi Bar", "Trattoria"]
    );
}

#[test]
fn test_city_and_price() {
    let catalog = sample_catalog();

    let results = catalog.search(&SearchCriteria::parse("NYC", "$$", "*").unwrap());

    assert_eq!(names(&results), vec!["Noodle House", "Pizza Place"]);
}

#[test]
fn test_all_three_criteria() {
    let catalog = sample_catalog();

    let results = catalog.search(&SearchCriteria::parse("NYC", "$$$", "Japanese").unwrap());

    assert_eq!(names(&results), vec!["Noodle House", "Sushi Bar"]);
}

#[test]
fn test_category_list_matches_any() {
    let catalog = sample_catalog();

    let results = catalog.search(&SearchCriteria::parse("*", "*", "Burgers,  Sushi").unwrap());

    assert_eq!(names(&results), vec!["Burger Joint", "Sushi Bar"]);
}

#[test]
fn test_no_match_is_empty() {
    let catalog = sample_catalog();

    let results = catalog.search(&SearchCriteria::parse("Boston", "*", "*").unwrap());

    assert!(results.is_empty());
}

#[test]
fn test_unknown_tier_is_rejected() {
    assert!(SearchCriteria::parse("*", "$$$$", "*").is_err());
    assert!(SearchCriteria::parse("*", "cheap", "*").is_err());
}

// =============================================================================
// Individual Filters
// =============================================================================

#[test]
fn test_price_ceiling_is_inclusive() {
    let data = sample_catalog().venues();

    assert_eq!(by_max_price(&data, PriceTier::Cheap).len(), 2);
    assert_eq!(by_max_price(&data, PriceTier::Moderate).len(), 3);
    assert_eq!(by_max_price(&data, PriceTier::Expensive).len(), 5);
}

#[test]
fn test_filters_share_handles() {
    let data = sample_catalog().venues();

    let in_nyc = by_city(&data, "NYC");
    let italian = by_any_category(&data, &["Italian".to_string()]);
    let both = intersect(&in_nyc, &italian);

    assert_eq!(names(&both), vec!["Pizza Place"]);
    let original = data.iter().find(|v| v.name == "Pizza Place").unwrap();
    assert!(Rc::ptr_eq(&both[0], original));
}

#[test]
fn test_intersection_uses_identity_not_equality() {
    let a = Venue::new("Twin", "NYC", vec![], PriceTier::Cheap, 4.0, 1).into_ref();
    let b = Venue::new("Twin", "NYC", vec![], PriceTier::Cheap, 4.0, 1).into_ref();

    assert!(intersect(&[Rc::clone(&a)], &[b]).is_empty());
    assert_eq!(intersect(&[Rc::clone(&a)], &[a]).len(), 1);
}

#[test]
fn test_search_over_plain_list() {
    let data = sample_catalog().venues();
    let criteria = SearchCriteria::any()
        .with_city("Chicago")
        .with_max_price(PriceTier::Cheap);

    assert_eq!(names(&search(&data, &criteria)), vec!["Burger Joint"]);
}
