//! Search criteria parsed from user input
//!
//! Each criterion is either a concrete value or the wildcard `*`, which
//! switches that filter off.

use crate::venue::{parse_category_list, PriceTier, VenueResult};

/// Token that disables a criterion
pub const WILDCARD: &str = "*";

/// Up to three independent criteria. `None` means "match everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Exact city
    pub city: Option<String>,
    /// Most expensive tier accepted
    pub max_price: Option<PriceTier>,
    /// Venue must carry at least one of these
    pub categories: Option<Vec<String>>,
}

impl SearchCriteria {
    /// Criteria that match every venue
    pub fn any() -> Self {
        Self::default()
    }

    /// Parses the three raw console answers.
    ///
    /// Fails only when the cost answer is neither `*` nor a tier token.
    pub fn parse(city: &str, cost: &str, categories: &str) -> VenueResult<Self> {
        let city = city.trim();
        let cost = cost.trim();
        let categories = categories.trim();

        let city = (city != WILDCARD).then(|| city.to_string());
        let max_price = if cost == WILDCARD {
            None
        } else {
            Some(cost.parse::<PriceTier>()?)
        };
        let categories = (categories != WILDCARD).then(|| parse_category_list(categories));

        Ok(Self {
            city,
            max_price,
            categories,
        })
    }

    /// Restrict to one city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Restrict to tiers at or below `tier`
    pub fn with_max_price(mut self, tier: PriceTier) -> Self {
        self.max_price = Some(tier);
        self
    }

    /// Require one of `categories`
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// True if no criterion is active
    pub fn is_wildcard(&self) -> bool {
        self.city.is_none() && self.max_price.is_none() && self.categories.is_none()
    }
}
