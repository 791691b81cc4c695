//! Interactive console
//!
//! Reads one command per line and dispatches it against a catalog:
//!
//! | Command        | Effect                                          |
//! |----------------|-------------------------------------------------|
//! | `p`, `print`   | Print every venue in name order                 |
//! | `s`, `search`  | Prompt for city, cost, categories and filter    |
//! | `a`, `add`     | Prompt for every field and insert a venue       |
//! | `w`, `write`   | Prompt for a file name and write the catalog    |
//! | `r`, `remove`  | Prompt for name and location and remove         |
//! | `x`, `exit`    | Leave the console                               |
//!
//! End of input counts as `exit`, at the command prompt or mid-command.
//! Failures inside a command are printed and the loop keeps going; only
//! errors on the console streams themselves end it.

use std::io::{BufRead, Write};

use crate::index::{Catalog, IndexResult, Removal};
use crate::observability::{Event, Logger};
use crate::search::SearchCriteria;
use crate::storage::CatalogWriter;
use crate::venue::{
    parse_category_list, parse_rating, parse_reviews, require_text, PriceTier, Venue, VenueResult,
};

use super::errors::CliResult;

/// Console commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Print,
    Search,
    Add,
    Write,
    Remove,
    Exit,
}

impl ConsoleCommand {
    /// Parses a command word. Both the short and the long form are accepted.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "p" | "print" => Some(Self::Print),
            "s" | "search" => Some(Self::Search),
            "a" | "add" => Some(Self::Add),
            "w" | "write" => Some(Self::Write),
            "r" | "remove" => Some(Self::Remove),
            "x" | "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Console session over a catalog and a pair of streams
pub struct Console<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Runs until `exit` or end of input.
    pub fn run(&mut self) -> CliResult<()> {
        let records = self.catalog.len().to_string();
        Logger::info(Event::ConsoleStart, &[("records", records.as_str())]);
        writeln!(self.output, "Welcome to venuedb")?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let flow = match ConsoleCommand::parse(line) {
                Some(command) => self.dispatch(command)?,
                None => {
                    Logger::warn(Event::UnknownCommand, &[("input", line)]);
                    writeln!(self.output, "{}: command not found", line)?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "exiting...")?;
        self.output.flush()?;
        Logger::info(Event::ConsoleExit, &[]);
        Ok(())
    }

    fn dispatch(&mut self, command: ConsoleCommand) -> CliResult<Flow> {
        match command {
            ConsoleCommand::Print => self.print(),
            ConsoleCommand::Search => self.search(),
            ConsoleCommand::Add => self.add(),
            ConsoleCommand::Write => self.write(),
            ConsoleCommand::Remove => self.remove(),
            ConsoleCommand::Exit => Ok(Flow::Exit),
        }
    }

    /// Writes `label`, then reads one line without its terminator.
    /// `None` on end of input.
    fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn print(&mut self) -> CliResult<Flow> {
        if self.catalog.is_empty() {
            writeln!(self.output, "no venues")?;
        } else {
            writeln!(self.output)?;
            write!(self.output, "{}", self.catalog.serialize())?;
            writeln!(self.output)?;
        }
        writeln!(self.output, "print finished")?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> CliResult<Flow> {
        writeln!(self.output, "enter search criteria (* matches anything):")?;
        let Some(city) = self.prompt("- city: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(cost) = self.prompt("- cost: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(categories) = self.prompt("- categories: ")? else {
            return Ok(Flow::Exit);
        };

        let criteria = match SearchCriteria::parse(&city, &cost, &categories) {
            Ok(criteria) => criteria,
            Err(e) => {
                writeln!(self.output, "invalid search criteria: {}", e)?;
                return Ok(Flow::Continue);
            }
        };

        let results = self.catalog.search(&criteria);
        if results.is_empty() {
            writeln!(self.output, "no results")?;
        } else {
            writeln!(self.output)?;
            for venue in &results {
                write!(self.output, "{}", venue.to_persisted())?;
            }
        }
        writeln!(self.output, "search finished")?;
        Ok(Flow::Continue)
    }

    fn add(&mut self) -> CliResult<Flow> {
        let mut answers = Vec::with_capacity(6);
        for label in [
            "- name: ",
            "- city: ",
            "- categories: ",
            "- cost: ",
            "- rating: ",
            "- reviews: ",
        ] {
            match self.prompt(label)? {
                Some(answer) => answers.push(answer),
                None => return Ok(Flow::Exit),
            }
        }

        match venue_from_answers(&answers) {
            Ok(venue) => {
                self.catalog.insert(venue);
                writeln!(self.output, "venue added")?;
            }
            Err(e) => writeln!(self.output, "venue not added: {}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn write(&mut self) -> CliResult<Flow> {
        let Some(file) = self.prompt("- file name: ")? else {
            return Ok(Flow::Exit);
        };
        let file = file.trim();
        if file.is_empty() {
            writeln!(self.output, "write failed: no file name given")?;
            return Ok(Flow::Continue);
        }

        match CatalogWriter::new(file).write_catalog(self.catalog) {
            Ok(_) => writeln!(self.output, "write finished")?,
            Err(e) => writeln!(self.output, "write failed: {}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn remove(&mut self) -> CliResult<Flow> {
        let Some(name) = self.prompt("- name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(location) = self.prompt("- location: ")? else {
            return Ok(Flow::Exit);
        };

        let report = self.catalog.remove(&name, &location);
        self.report_removal("name index", &name, &report.by_name)?;
        self.report_removal("location index", &location, &report.by_location)?;
        writeln!(self.output, "remove finished")?;
        Ok(Flow::Continue)
    }

    fn report_removal(
        &mut self,
        tree: &str,
        key: &str,
        outcome: &IndexResult<Removal>,
    ) -> CliResult<()> {
        match outcome {
            Ok(Removal::Shrunk { removed, remaining }) => writeln!(
                self.output,
                "{}: removed {} from '{}', {} left",
                tree, removed, key, remaining
            )?,
            Ok(Removal::Excised { removed, .. }) => writeln!(
                self.output,
                "{}: removed {} from '{}', key dropped",
                tree, removed, key
            )?,
            Err(e) => writeln!(self.output, "{}: {}", tree, e.message())?,
        }
        Ok(())
    }
}

fn venue_from_answers(answers: &[String]) -> VenueResult<Venue> {
    let name = require_text("name", &answers[0])?;
    let location = require_text("location", &answers[1])?;
    let price = answers[3].trim().parse::<PriceTier>()?;
    let rating = parse_rating(&answers[4])?;
    let reviews = parse_reviews(&answers[5])?;

    Ok(Venue::new(
        name,
        location,
        parse_category_list(&answers[2]),
        price,
        rating,
        reviews,
    ))
}
