//! Venue records shared by both catalog indexes
//!
//! A `Venue` is created once and handed out as a `VenueRef` (reference
//! counted). The name index, the location index and any search result all
//! hold the same allocation, so identity comparisons use `Rc::ptr_eq`.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{VenueError, VenueResult};

/// Shared handle to an immutable venue record.
pub type VenueRef = Rc<Venue>;

/// Price tier tokens. Ordering follows cost: `$ < $$ < $$$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    /// `$`
    #[serde(rename = "$")]
    Cheap,
    /// `$$`
    #[serde(rename = "$$")]
    Moderate,
    /// `$$$`
    #[serde(rename = "$$$")]
    Expensive,
}

impl PriceTier {
    /// Returns the persisted token for this tier
    pub fn token(&self) -> &'static str {
        match self {
            PriceTier::Cheap => "$",
            PriceTier::Moderate => "$$",
            PriceTier::Expensive => "$$$",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for PriceTier {
    type Err = VenueError;

    fn from_str(s: &str) -> VenueResult<Self> {
        match s.trim() {
            "$" => Ok(PriceTier::Cheap),
            "$$" => Ok(PriceTier::Moderate),
            "$$$" => Ok(PriceTier::Expensive),
            other => Err(VenueError::UnknownPriceTier(other.to_string())),
        }
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Display name, first sort key
    pub name: String,
    /// City, second sort key
    pub location: String,
    /// Categories in insertion order
    pub categories: Vec<String>,
    /// Price tier
    pub price: PriceTier,
    /// Rating, conventionally 0.0 to 5.0
    pub rating: f32,
    /// Number of reviews behind the rating
    pub reviews: u32,
}

impl Venue {
    /// Creates a new venue record
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        categories: Vec<String>,
        price: PriceTier,
        rating: f32,
        reviews: u32,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            categories,
            price,
            rating,
            reviews,
        }
    }

    /// Wraps the record in a shared handle
    pub fn into_ref(self) -> VenueRef {
        Rc::new(self)
    }

    /// Returns true if this venue carries the given category
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Writes the record in its persisted 7-line form (name, location,
    /// categories, tier, rating, reviews, blank separator).
    pub fn write_persisted(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push('\n');
        out.push_str(&self.location);
        out.push('\n');
        out.push_str(&self.categories.join(", "));
        out.push('\n');
        out.push_str(self.price.token());
        out.push('\n');
        out.push_str(&format!("{:.1}", self.rating));
        out.push('\n');
        out.push_str(&self.reviews.to_string());
        out.push('\n');
        out.push('\n');
    }

    /// Checks that name and location are both non-blank. A blank line at
    /// the start of a persisted record reads as a separator, so such a
    /// record could be written but never loaded back.
    pub fn validate_keys(&self) -> VenueResult<()> {
        require_text("name", &self.name)?;
        require_text("location", &self.location)?;
        Ok(())
    }

    /// Returns the persisted form as an owned string
    pub fn to_persisted(&self) -> String {
        let mut out = String::with_capacity(64);
        self.write_persisted(&mut out);
        out
    }
}

/// Returns `s` unchanged, or `EmptyField` if it is blank
pub fn require_text<'a>(field: &'static str, s: &'a str) -> VenueResult<&'a str> {
    if s.trim().is_empty() {
        return Err(VenueError::EmptyField(field));
    }
    Ok(s)
}

/// Parses a rating field
pub fn parse_rating(s: &str) -> VenueResult<f32> {
    s.trim()
        .parse::<f32>()
        .map_err(|_| VenueError::InvalidRating(s.trim().to_string()))
}

/// Parses a review count field
pub fn parse_reviews(s: &str) -> VenueResult<u32> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| VenueError::InvalidReviewCount(s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Venue {
        Venue::new(
            "Pizza Place",
            "NYC",
            vec!["Pizza".to_string(), "Italian".to_string()],
            PriceTier::Moderate,
            4.3,
            120,
        )
    }

    #[test]
    fn test_price_tier_tokens() {
        for tier in [PriceTier::Cheap, PriceTier::Moderate, PriceTier::Expensive] {
            assert_eq!(tier.token().parse::<PriceTier>().unwrap(), tier);
        }
        assert!(PriceTier::Cheap < PriceTier::Moderate);
        assert!(PriceTier::Moderate < PriceTier::Expensive);
    }

    #[test]
    fn test_unknown_price_tier() {
        let err = "$$$$".parse::<PriceTier>().unwrap_err();
        assert!(matches!(err, VenueError::UnknownPriceTier(ref t) if t == "$$$$"));
    }

    #[test]
    fn test_persisted_form() {
        let text = sample().to_persisted();
        assert_eq!(text, "Pizza Place\nNYC\nPizza, Italian\n$$\n4.3\n120\n\n");
    }

    #[test]
    fn test_has_category() {
        let venue = sample();
        assert!(venue.has_category("Italian"));
        assert!(!venue.has_category("italian"));
    }

    #[test]
    fn test_parse_numeric_fields() {
        assert_eq!(parse_rating(" 3.5 ").unwrap(), 3.5);
        assert_eq!(parse_reviews("17").unwrap(), 17);
        assert!(parse_rating("four").is_err());
        assert!(parse_reviews("-3").is_err());
    }

    #[test]
    fn test_blank_keys_rejected() {
        assert!(sample().validate_keys().is_ok());

        let nameless = Venue::new("", "Austin", vec![], PriceTier::Cheap, 3.9, 40);
        assert_eq!(nameless.validate_keys(), Err(VenueError::EmptyField("name")));

        let nowhere = Venue::new("Diner", " \r", vec![], PriceTier::Cheap, 3.9, 40);
        assert_eq!(nowhere.validate_keys(), Err(VenueError::EmptyField("location")));

        assert_eq!(require_text("name", "Zed").unwrap(), "Zed");
    }

    #[test]
    fn test_json_uses_tier_tokens() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["price"], "$$");
        assert_eq!(json["categories"][1], "Italian");
    }
}
