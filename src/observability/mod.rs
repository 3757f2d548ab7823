//! Observability for the paramguard command line
//!
//! - Structured logs, one JSON object per line on stderr
//! - Typed lifecycle events
//! - A severity threshold taken from configuration
//!
//! The validation engine never logs; only the command layer reports what
//! happened.
//!
//! # Usage
//!
//! ```
//! use paramguard::observability::{Event, Logger, Severity};
//!
//! let logger = Logger::new(Severity::Warn);
//! logger.event(Event::ValidationRejected, &[("schema", "users")]);
//! logger.info("SKIPPED_BELOW_THRESHOLD", &[]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
