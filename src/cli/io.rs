//! JSON output for one-shot commands
//!
//! Same envelope as every other JSON response: `{"status":"ok","data":...}`
//! or `{"status":"error","code":...,"message":...}`, one object per line.

use std::io::Write;

use serde_json::{json, Value};

use crate::venue::{Venue, VenueRef};

use super::errors::CliResult;

/// Converts venue handles into a JSON array
pub fn venues_to_json(venues: &[VenueRef]) -> CliResult<Value> {
    let records: Vec<&Venue> = venues.iter().map(|v| v.as_ref()).collect();
    Ok(serde_json::to_value(records)?)
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
