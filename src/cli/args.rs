//! CLI argument definitions using clap
//!
//! Commands:
//! - paramguard init --config <path>
//! - paramguard list --config <path>
//! - paramguard check --config <path> --schema <name> [--input <file>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// paramguard - validate JSON parameters against named schemas
#[derive(Parser, Debug)]
#[command(name = "paramguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration and create the schema directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./paramguard.json")]
        config: PathBuf,
    },

    /// List the schemas found in the schema directory
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./paramguard.json")]
        config: PathBuf,
    },

    /// Validate one JSON value against a named schema
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./paramguard.json")]
        config: PathBuf,

        /// Schema name (file stem in the schema directory)
        #[arg(long)]
        schema: String,

        /// File holding the JSON value; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
