//! paramguard CLI entry point
//!
//! A minimal entrypoint that:
//! 1. Parses CLI arguments and dispatches (via cli::run)
//! 2. Reports errors as a JSON response on stdout and as text on stderr
//! 3. Exits 0 when valid, 2 when a value is rejected, 1 on any error
//!
//! All logic is delegated to the CLI module.

use paramguard::cli;

fn main() {
    match cli::run() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            let _ = cli::write_error(e.code_str(), e.message());
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
