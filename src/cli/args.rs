//! CLI argument definitions using clap
//!
//! Commands:
//! - venuedb console [--config <path>] [--data <file>]
//! - venuedb print   [--config <path>] [--data <file>] [--by name|location] [--json]
//! - venuedb search  [--config <path>] [--data <file>] [--city C] [--cost T] [--categories L] [--json]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::search::WILDCARD;

/// venuedb - a venue catalog indexed by name and by location
#[derive(Parser, Debug)]
#[command(name = "venuedb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the catalog comes from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog file to load (overrides the config's data_file)
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the catalog and run the interactive console
    Console {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the catalog in index order and exit
    Print {
        #[command(flatten)]
        source: SourceArgs,

        /// Index to walk: name or location
        #[arg(long, default_value = "name")]
        by: String,

        /// Emit JSON instead of the catalog text format
        #[arg(long)]
        json: bool,
    },

    /// Run one search and exit
    Search {
        #[command(flatten)]
        source: SourceArgs,

        /// Exact city, or * for any
        #[arg(long, default_value = WILDCARD)]
        city: String,

        /// Price ceiling ($, $$, $$$), or * for any
        #[arg(long, default_value = WILDCARD)]
        cost: String,

        /// Comma separated categories, or * for any
        #[arg(long, default_value = WILDCARD)]
        categories: String,

        /// Emit JSON instead of the catalog text format
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
