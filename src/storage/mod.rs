//! Catalog file storage
//!
//! Loads and writes the plain-text catalog format. This layer only talks to
//! the index through `Catalog::insert` and `Catalog::serialize`.

mod errors;
mod reader;
mod writer;

pub use errors::{StorageError, StorageResult};
pub use reader::{parse_catalog, CatalogReader, FIELDS_PER_RECORD};
pub use writer::CatalogWriter;
