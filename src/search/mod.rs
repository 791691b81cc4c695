//! Search over flat venue collections
//!
//! Not tree aware: callers hand in a slice (usually `IndexTree::venues`).
//! Three filters (city, price ceiling, any-of categories) each produce a
//! candidate list; active ones are intersected by identity.

mod criteria;
mod filters;

pub use criteria::{SearchCriteria, WILDCARD};
pub use filters::{by_any_category, by_city, by_max_price, intersect, search};
