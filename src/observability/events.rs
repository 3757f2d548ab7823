//! Observable events of the command line
//!
//! Events are explicit and typed. Each carries the severity it is logged at.

use std::fmt;

use super::logger::Severity;

/// Observable events in a paramguard run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file read and validated
    ConfigLoaded,
    /// Default configuration written by `init`
    ConfigWritten,

    // Schemas
    /// Schema directory scanned
    SchemasLoaded,

    // Validation
    /// Input satisfied the schema
    ValidationPassed,
    /// Input violated the schema
    ValidationRejected,

    // Failures
    /// A command aborted with a CLI error
    CommandFailed,
}

impl Event {
    /// Every event, in declaration order
    pub const ALL: [Event; 6] = [
        Event::ConfigLoaded,
        Event::ConfigWritten,
        Event::SchemasLoaded,
        Event::ValidationPassed,
        Event::ValidationRejected,
        Event::CommandFailed,
    ];

    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigWritten => "CONFIG_WRITTEN",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ValidationRejected => Severity::Warn,
            Event::CommandFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        for event in Event::ALL {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::ConfigLoaded.severity(), Severity::Info);
        assert_eq!(Event::ValidationPassed.severity(), Severity::Info);
        assert_eq!(Event::ValidationRejected.severity(), Severity::Warn);
        assert_eq!(Event::CommandFailed.severity(), Severity::Error);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::SchemasLoaded), "SCHEMAS_LOADED");
    }
}
