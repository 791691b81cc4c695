//! # Venue Field Errors

use thiserror::Error;

/// Result type for venue field parsing
pub type VenueResult<T> = Result<T, VenueError>;

/// Errors raised while turning text into venue fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    #[error("Unknown price tier: '{0}' (expected $, $$ or $$$)")]
    UnknownPriceTier(String),

    #[error("Invalid rating: '{0}'")]
    InvalidRating(String),

    #[error("Invalid review count: '{0}'")]
    InvalidReviewCount(String),

    #[error("{0} must not be blank")]
    EmptyField(&'static str),
}
