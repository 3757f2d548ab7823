//! JSON I/O handling for CLI
//!
//! - Input: one JSON value from a file, or one line on stdin
//! - Output: one JSON object on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::Value as JsonValue;

use super::errors::{CliError, CliResult};
use crate::value::Value;

/// Read the value to validate from `input`, or from stdin when `None`.
pub fn read_value(input: Option<&Path>) -> CliResult<Value> {
    let text = match input {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            CliError::io_error(format!("Failed to read input {}: {}", path.display(), e))
        })?,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line
        }
    };
    parse_value(&text)
}

/// Parse a JSON document into a value, refusing blank input.
pub fn parse_value(text: &str) -> CliResult<Value> {
    if text.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    let json: JsonValue = serde_json::from_str(text)?;
    Ok(Value::from(json))
}

/// Write a success response to stdout
pub fn write_response(data: JsonValue) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(&response)
}

fn write_line(response: &JsonValue) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, response)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
