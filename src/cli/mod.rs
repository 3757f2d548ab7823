//! CLI module for paramguard
//!
//! Provides command-line interface for:
//! - init: Write a default configuration and create the schema directory
//! - list: Print the names of the loaded schemas
//! - check: Validate one JSON value against a named schema

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, check_value, init, list, run, run_command, Outcome};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_value, read_value, write_error, write_response};
