//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Resolve configuration (file, then `--data` override)
//! 2. Apply the log level
//! 3. Load the catalog file into a fresh catalog
//! 4. Run the command against it

use std::io::{self, Write};

use crate::index::{Catalog, KeySelector};
use crate::observability::{Event, Logger};
use crate::search::SearchCriteria;
use crate::storage::CatalogReader;
use crate::venue::VenueRef;

use super::args::{Cli, Command, SourceArgs};
use super::config::Config;
use super::console::Console;
use super::errors::{CliError, CliResult};
use super::io::{venues_to_json, write_error, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Console { source } => console(&source),
        Command::Print { source, by, json } => print(&source, &by, json),
        Command::Search {
            source,
            city,
            cost,
            categories,
            json,
        } => search(&source, &city, &cost, &categories, json),
    }
}

/// Builds the effective configuration for one invocation.
pub fn resolve_config(source: &SourceArgs) -> CliResult<Config> {
    let mut config = match &source.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(data) = &source.data {
        config.data_file = data.display().to_string();
    }

    Logger::set_min_severity(config.severity()?);

    let capacity = config.bucket_capacity.to_string();
    Logger::info(
        Event::ConfigLoaded,
        &[
            ("bucket_capacity", capacity.as_str()),
            ("data_file", config.data_file.as_str()),
            ("log_level", config.log_level.as_str()),
        ],
    );

    Ok(config)
}

/// Loads the configured catalog file.
pub fn open_catalog(config: &Config) -> CliResult<Catalog> {
    let mut catalog = Catalog::with_bucket_capacity(config.bucket_capacity);
    CatalogReader::new(config.data_path()).load_into(&mut catalog)?;
    Ok(catalog)
}

/// Interactive console over stdin/stdout.
///
/// A catalog file that cannot be loaded is reported and the console
/// starts empty.
pub fn console(source: &SourceArgs) -> CliResult<()> {
    let config = resolve_config(source)?;

    let mut catalog = match open_catalog(&config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{}", e);
            Catalog::with_bucket_capacity(config.bucket_capacity)
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&mut catalog, stdin.lock(), stdout.lock()).run()
}

/// One-shot print of the whole catalog
pub fn print(source: &SourceArgs, by: &str, json: bool) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let prepared = parse_selector(by).and_then(|selector| {
        let config = resolve_config(source)?;
        Ok((selector, open_catalog(&config)?))
    });
    let (selector, catalog) = report_json_failure(prepared, json, &mut out)?;

    render_print(&catalog, selector, json, &mut out)
}

/// One-shot search
pub fn search(
    source: &SourceArgs,
    city: &str,
    cost: &str,
    categories: &str,
    json: bool,
) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let prepared = SearchCriteria::parse(city, cost, categories)
        .map_err(CliError::from)
        .and_then(|criteria| {
            let config = resolve_config(source)?;
            Ok((criteria, open_catalog(&config)?))
        });
    let (criteria, catalog) = report_json_failure(prepared, json, &mut out)?;

    render_search(&catalog, &criteria, json, &mut out)
}

/// In JSON mode a failure is also written to stdout as an error response.
fn report_json_failure<T, W: Write>(result: CliResult<T>, json: bool, out: &mut W) -> CliResult<T> {
    if let (Err(e), true) = (&result, json) {
        write_error(out, e.code_str(), e.message())?;
    }
    result
}

fn parse_selector(by: &str) -> CliResult<KeySelector> {
    by.parse::<KeySelector>().map_err(|e| {
        Logger::log(e.severity(), Event::UnknownOrderingMode, &[("mode", by)]);
        CliError::from(e)
    })
}

/// Writes every venue in `selector` order
pub fn render_print<W: Write>(
    catalog: &Catalog,
    selector: KeySelector,
    json: bool,
    out: &mut W,
) -> CliResult<()> {
    let tree = catalog.tree(selector);
    if json {
        write_response(out, venues_to_json(&tree.venues())?)
    } else {
        write!(out, "{}", tree.serialize())?;
        out.flush()?;
        Ok(())
    }
}

/// Writes the venues matching `criteria`, in name order
pub fn render_search<W: Write>(
    catalog: &Catalog,
    criteria: &SearchCriteria,
    json: bool,
    out: &mut W,
) -> CliResult<()> {
    let results = catalog.search(criteria);
    if json {
        write_response(out, venues_to_json(&results)?)
    } else {
        write_venues(&results, out)
    }
}

fn write_venues<W: Write>(venues: &[VenueRef], out: &mut W) -> CliResult<()> {
    for venue in venues {
        write!(out, "{}", venue.to_persisted())?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CATALOG: &str = "\
Pizza Place
NYC
Pizza, Italian
$$
4.5
120

Burger Joint
Chicago
Burgers
$
4.0
80

Sushi Bar
NYC
Sushi, Japanese
$$$
4.8
200
";

    fn source_with(dir: &TempDir) -> SourceArgs {
        let data = dir.path().join("venues.txt");
        fs::write(&data, CATALOG).unwrap();
        SourceArgs {
            config: None,
            data: Some(data),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    #[test]
    fn test_data_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("venuedb.json");
        fs::write(&config_path, r#"{"data_file": "elsewhere.txt", "bucket_capacity": 2}"#).unwrap();

        let source = SourceArgs {
            config: Some(config_path),
            data: Some(PathBuf::from("here.txt")),
        };
        let config = resolve_config(&source).unwrap();

        assert_eq!(config.data_file, "here.txt");
        assert_eq!(config.bucket_capacity, 2);
    }

    #[test]
    fn test_missing_catalog_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let source = SourceArgs {
            config: None,
            data: Some(dir.path().join("absent.txt")),
        };
        let config = resolve_config(&source).unwrap();

        let err = open_catalog(&config).unwrap_err();
        assert_eq!(err.code_str(), "VENUE_CLI_STORAGE_ERROR");
    }

    // =========================================================================
    // Print
    // =========================================================================

    #[test]
    fn test_print_by_location() {
        let dir = TempDir::new().unwrap();
        let config = resolve_config(&source_with(&dir)).unwrap();
        let catalog = open_catalog(&config).unwrap();

        let mut out = Vec::new();
        render_print(&catalog, KeySelector::Location, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let chicago = text.find("Burger Joint").unwrap();
        let pizza = text.find("Pizza Place").unwrap();
        let sushi = text.find("Sushi Bar").unwrap();
        assert!(chicago < pizza);
        assert!(pizza < sushi);
    }

    #[test]
    fn test_print_json() {
        let dir = TempDir::new().unwrap();
        let config = resolve_config(&source_with(&dir)).unwrap();
        let catalog = open_catalog(&config).unwrap();

        let mut out = Vec::new();
        render_print(&catalog, KeySelector::Name, true, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(parsed["data"].as_array().unwrap().len(), 3);
        assert_eq!(parsed["data"][0]["name"], "Burger Joint");
    }

    #[test]
    fn test_json_failure_written_as_error_response() {
        let failed: CliResult<()> = Err(CliError::invalid_input("bad tier"));

        let mut out = Vec::new();
        assert!(report_json_failure(failed, true, &mut out).is_err());
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "VENUE_CLI_INVALID_INPUT");

        let mut quiet = Vec::new();
        let failed: CliResult<()> = Err(CliError::invalid_input("bad tier"));
        assert!(report_json_failure(failed, false, &mut quiet).is_err());
        assert!(quiet.is_empty());
    }

    #[test]
    fn test_unknown_ordering_rejected() {
        let err = parse_selector("rating").unwrap_err();
        assert_eq!(err.code_str(), "VENUE_CLI_INVALID_INPUT");
        assert!(err.message().contains("rating"));
    }

    // =========================================================================
    // Search
    // =========================================================================

    #[test]
    fn test_search_text_output() {
        let dir = TempDir::new().unwrap();
        let config = resolve_config(&source_with(&dir)).unwrap();
        let catalog = open_catalog(&config).unwrap();
        let criteria = SearchCriteria::parse("NYC", "$$", "*").unwrap();

        let mut out = Vec::new();
        render_search(&catalog, &criteria, false, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Pizza Place\nNYC\nPizza, Italian\n$$\n4.5\n120\n\n"
        );
    }

    #[test]
    fn test_search_with_no_matches_prints_nothing() {
        let dir = TempDir::new().unwrap();
        let config = resolve_config(&source_with(&dir)).unwrap();
        let catalog = open_catalog(&config).unwrap();
        let criteria = SearchCriteria::parse("Boston", "*", "*").unwrap();

        let mut out = Vec::new();
        render_search(&catalog, &criteria, false, &mut out).unwrap();

        assert!(out.is_empty());
    }
}
