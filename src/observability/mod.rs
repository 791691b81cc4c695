//! Observability for venuedb
//!
//! Structured JSON logging of typed events. Logging never changes what an
//! operation does and never fails it.
//!
//! ```ignore
//! use venuedb::observability::{Event, Logger};
//!
//! Logger::info(Event::VenueInserted, &[("name", "Pizza Place")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
