//! CLI command implementations
//!
//! Every command loads its configuration first. `list` and `check` then load
//! the whole schema directory, so a malformed schema file fails every command
//! that reads schemas, not only the one naming it.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::observability::{Event, Logger};
use crate::schema::{FunctionRegistry, Schema, SchemaLoader, ValidationResult, Validator};
use crate::value::Value;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_value, write_response};

/// How a successful command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed; for `check`, the value was accepted
    Success,
    /// `check` ran to completion but the value violated the schema
    Rejected,
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Rejected => 2,
        }
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<Outcome> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<Outcome> {
    let config_path = match &cmd {
        Command::Init { config } | Command::List { config } | Command::Check { config, .. } => {
            config.clone()
        }
    };

    let result = match cmd {
        Command::Init { config } => init(&config),
        Command::List { config } => list(&config),
        Command::Check {
            config,
            schema,
            input,
        } => check(&config, &schema, input.as_deref()),
    };

    if let Err(e) = &result {
        failure_logger(&config_path).event(
            Event::CommandFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
    }

    result
}

/// Write a default configuration file and create its schema directory.
///
/// Refuses to touch an existing configuration file.
pub fn init(config_path: &Path) -> CliResult<Outcome> {
    let config = Config::default();
    config.write_new(config_path)?;

    let schema_dir = config.schema_path(config_path);
    fs::create_dir_all(&schema_dir).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create directory {}: {}",
            schema_dir.display(),
            e
        ))
    })?;

    let config_display = config_path.display().to_string();
    let schema_dir_display = schema_dir.display().to_string();
    config.logger().event(
        Event::ConfigWritten,
        &[
            ("config", config_display.as_str()),
            ("schema_dir", schema_dir_display.as_str()),
        ],
    );

    write_response(json!({
        "initialized": true,
        "config": config_display,
        "schema_dir": schema_dir_display,
    }))?;

    Ok(Outcome::Success)
}

/// Print the names of every schema in the schema directory.
pub fn list(config_path: &Path) -> CliResult<Outcome> {
    let (_, _, loader) = load_schemas(config_path)?;

    write_response(json!({ "schemas": loader.names() }))?;

    Ok(Outcome::Success)
}

/// Validate one JSON value against the named schema.
///
/// A rejected value is reported in the response and yields
/// [`Outcome::Rejected`]; it is not a CLI error.
pub fn check(config_path: &Path, schema_name: &str, input: Option<&Path>) -> CliResult<Outcome> {
    let (config, logger, loader) = load_schemas(config_path)?;
    let schema = loader.require(schema_name)?;
    let value = read_value(input)?;

    let (outcome, message) = match check_value(&config, schema, &value) {
        Ok(()) => {
            logger.event(Event::ValidationPassed, &[("schema", schema_name)]);
            (Outcome::Success, None)
        }
        Err(e) => {
            logger.event(
                Event::ValidationRejected,
                &[("schema", schema_name), ("message", e.message())],
            );
            (Outcome::Rejected, Some(e.message().to_string()))
        }
    };

    write_response(json!({
        "schema": schema_name,
        "valid": outcome == Outcome::Success,
        "message": message,
    }))?;

    Ok(outcome)
}

/// Validates `value` with the configured depth limit.
///
/// The command line has no way to supply custom functions, so named `func`
/// entries never resolve and fall back to their `type`.
pub fn check_value(config: &Config, schema: &Schema, value: &Value) -> ValidationResult {
    let functions = FunctionRegistry::new();
    let validator = match config.depth_limit() {
        Some(limit) => Validator::new(&functions).with_max_depth(limit),
        None => Validator::new(&functions),
    };
    validator.validate(schema, value)
}

/// Logger for command failures: the configured one when the configuration
/// loads, the default otherwise.
fn failure_logger(config_path: &Path) -> Logger {
    Config::load(config_path)
        .map(|config| config.logger())
        .unwrap_or_default()
}

fn load_schemas(config_path: &Path) -> CliResult<(Config, Logger, SchemaLoader)> {
    let config = Config::load(config_path)?;
    let logger = config.logger();
    let config_display = config_path.display().to_string();
    logger.event(Event::ConfigLoaded, &[("config", config_display.as_str())]);

    let mut loader = SchemaLoader::new(&config.schema_path(config_path));
    loader.load_all()?;
    let count = loader.schema_count().to_string();
    let schema_dir = loader.schema_dir().display().to_string();
    logger.event(
        Event::SchemasLoaded,
        &[("count", count.as_str()), ("schema_dir", schema_dir.as_str())],
    );

    Ok((config, logger, loader))
}
