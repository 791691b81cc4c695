//! Structured JSON logger for venuedb
//!
//! One line per event: `event`, then `severity`, then the caller's fields
//! sorted by key. Lines go to stderr because stdout belongs to the console.
//! Events below the process-wide minimum severity are dropped.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::Value;

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Trace = 0,
    Info = 1,
    Warn = 2,
    /// Operation failed, process keeps running
    Error = 3,
    Fatal = 4,
}

impl Severity {
    const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Upper-case name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Accepts the level names of the config file, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown log level: '{}'", wanted))
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// Process-wide JSON line logger
pub struct Logger;

impl Logger {
    /// Drops every later event below `severity`
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    pub fn min_severity() -> Severity {
        let stored = MIN_SEVERITY.load(Ordering::Relaxed);
        Severity::ALL
            .into_iter()
            .find(|level| *level as u8 == stored)
            .unwrap_or(Severity::Info)
    }

    /// Writes one line for `event` unless it is below the minimum severity.
    /// Failure events are raised to at least WARN. A failed write to stderr
    /// is ignored.
    pub fn log(severity: Severity, event: Event, fields: &[(&str, &str)]) {
        let severity = effective_severity(severity, event);
        if severity < Self::min_severity() {
            return;
        }
        let line = render(severity, event, fields);
        let _ = io::stderr().lock().write_all(line.as_bytes());
    }

    pub fn trace(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    pub fn info(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

fn effective_severity(severity: Severity, event: Event) -> Severity {
    if event.is_failure() {
        severity.max(Severity::Warn)
    } else {
        severity
    }
}

/// Builds one newline-terminated JSON object. Keys are written by hand to
/// keep `event` and `severity` ahead of the sorted fields.
fn render(severity: Severity, event: Event, fields: &[(&str, &str)]) -> String {
    let mut line = String::with_capacity(128);
    line.push_str("{\"event\":");
    line.push_str(&quoted(event.as_str()));
    line.push_str(",\"severity\":");
    line.push_str(&quoted(severity.as_str()));

    let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
    sorted.sort_by_key(|(key, _)| *key);
    for (key, value) in sorted {
        line.push(',');
        line.push_str(&quoted(key));
        line.push(':');
        line.push_str(&quoted(value));
    }

    line.push_str("}\n");
    line
}

fn quoted(s: &str) -> String {
    Value::from(s).to_string()
}
