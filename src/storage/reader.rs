//! Catalog file reader
//!
//! Each record is six lines followed by a blank separator:
//!
//! ```text
//! <name>
//! <location>
//! <category>, <category>, ...
//! <$ | $$ | $$$>
//! <rating>
//! <review count>
//!
//! ```
//!
//! LF and CRLF endings are both accepted. The separator after the last
//! record may be missing, and runs of blank lines between records are
//! skipped. The whole file is parsed before anything is inserted, so a
//! malformed file leaves the catalog untouched.

use std::fs;
use std::path::{Path, PathBuf};

use crate::index::Catalog;
use crate::observability::{Event, Logger};
use crate::venue::{
    normalize, parse_category_list, parse_rating, parse_reviews, PriceTier, Venue,
};

use super::errors::{StorageError, StorageResult};

/// Lines of data per record, separator excluded
pub const FIELDS_PER_RECORD: usize = 6;

/// Reads catalog files from disk.
pub struct CatalogReader {
    path: PathBuf,
}

impl CatalogReader {
    /// Reader for the catalog file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this reader reads
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses every record.
    pub fn read_all(&self) -> StorageResult<Vec<Venue>> {
        let text =
            fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        parse_catalog(&text)
    }

    /// Parses the file and inserts every record into both trees of
    /// `catalog`. Returns the number of records loaded.
    pub fn load_into(&self, catalog: &mut Catalog) -> StorageResult<usize> {
        let path = self.path.display().to_string();
        Logger::info(Event::CatalogLoadStart, &[("path", path.as_str())]);

        let venues = match self.read_all() {
            Ok(venues) => venues,
            Err(e) => {
                let message = e.to_string();
                Logger::error(
                    Event::CatalogLoadFailed,
                    &[("message", message.as_str()), ("path", path.as_str())],
                );
                return Err(e);
            }
        };

        let loaded = venues.len();
        for venue in venues {
            catalog.insert(venue);
        }

        let count = loaded.to_string();
        Logger::info(
            Event::CatalogLoadComplete,
            &[("path", path.as_str()), ("records", count.as_str())],
        );
        Ok(loaded)
    }
}

/// Parses catalog text into venues, in file order.
pub fn parse_catalog(text: &str) -> StorageResult<Vec<Venue>> {
    let mut venues = Vec::new();
    let mut fields: Vec<&str> = Vec::with_capacity(FIELDS_PER_RECORD);
    let mut record_start = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line = normalize(raw);

        if fields.is_empty() {
            if line.trim().is_empty() {
                continue;
            }
            record_start = idx + 1;
        }

        fields.push(line);
        if fields.len() == FIELDS_PER_RECORD {
            venues.push(build_venue(&fields, record_start)?);
            fields.clear();
        }
    }

    if !fields.is_empty() {
        return Err(StorageError::malformed(
            record_start,
            format!(
                "truncated record: {} of {} lines present",
                fields.len(),
                FIELDS_PER_RECORD
            ),
        ));
    }

    Ok(venues)
}

fn build_venue(fields: &[&str], start: usize) -> StorageResult<Venue> {
    let price = fields[3]
        .parse::<PriceTier>()
        .map_err(|e| StorageError::malformed(start + 3, format!("{}", e)))?;
    let rating =
        parse_rating(fields[4]).map_err(|e| StorageError::malformed(start + 4, e.to_string()))?;
    let reviews =
        parse_reviews(fields[5]).map_err(|e| StorageError::malformed(start + 5, e.to_string()))?;

    Ok(Venue::new(
        fields[0],
        fields[1],
        parse_category_list(fields[2]),
        price,
        rating,
        reviews,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = "Pizza Place\nNYC\nPizza, Italian\n$$\n4.5\n120\n\n\
                               Sushi Spot\nLA\nSushi\n$$$\n4.8\n85\n";

    #[test]
    fn test_parse_two_records() {
        let venues = parse_catalog(TWO_RECORDS).unwrap();

        assert_eq!(venues.len(), 2);
        assert_eq!(venues[0].name, "Pizza Place");
        assert_eq!(venues[0].categories, vec!["Pizza", "Italian"]);
        assert_eq!(venues[0].price, PriceTier::Moderate);
        assert_eq!(venues[1].reviews, 85);
    }

    #[test]
    fn test_parse_crlf_and_extra_blank_lines() {
        let text = "\r\n\r\nDiner\r\nAustin\r\nBreakfast\r\n$\r\n3.9\r\n40\r\n\r\n\r\n";

        let venues = parse_catalog(text).unwrap();

        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].location, "Austin");
        assert_eq!(venues[0].reviews, 40);
    }

    #[test]
    fn test_empty_category_line_is_allowed() {
        let venues = parse_catalog("Diner\nAustin\n\n$\n3.9\n40\n").unwrap();
        assert!(venues[0].categories.is_empty());
    }

    #[test]
    fn test_truncated_record() {
        let err = parse_catalog("Diner\nAustin\nBreakfast\n").unwrap_err();
        assert!(matches!(err, StorageError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_bad_fields_report_their_line() {
        let text = format!("{}\nCafe\nParis\nCoffee\n$$\nfive\n10\n", TWO_RECORDS);

        let err = parse_catalog(&text).unwrap_err();

        match err {
            StorageError::MalformedRecord { line, reason } => {
                assert_eq!(line, 19);
                assert!(reason.contains("five"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let err = parse_catalog("Diner\nAustin\nBreakfast\n$$$$\n3.9\n40\n").unwrap_err();
        assert!(matches!(err, StorageError::MalformedRecord { line: 4, .. }));
    }
}
