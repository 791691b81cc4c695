//! CLI module for venuedb
//!
//! Provides command-line interface for:
//! - console: Load a catalog and run the interactive console
//! - print: One-shot dump of the catalog in index order
//! - search: One-shot filtered listing

mod args;
mod commands;
mod config;
mod console;
mod errors;
mod io;

pub use args::{Cli, Command, SourceArgs};
pub use commands::{
    console, open_catalog, print, render_print, render_search, resolve_config, run, run_command,
    search,
};
pub use config::Config;
pub use console::{Console, ConsoleCommand};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{venues_to_json, write_error, write_response};
