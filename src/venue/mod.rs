//! Venue records
//!
//! Records are immutable once built and shared by reference between the
//! name index, the location index and search results.

mod errors;
mod record;
mod text;

pub use errors::{VenueError, VenueResult};
pub use record::{parse_rating, parse_reviews, require_text, PriceTier, Venue, VenueRef};
pub use text::{normalize, parse_category_list};
