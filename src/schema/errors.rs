//! Schema error types
//!
//! Validation failures of every kind (malformed schema, wrong type, violated
//! constraint, missing required key, rejected by a custom function) travel as
//! one [`ValidationError`] carrying a human-readable message. There are no
//! error codes; the message describes the first rule that failed.
//!
//! Loading schemas from disk has its own [`LoadError`].

use thiserror::Error;

use super::custom::CustomOutcome;
use super::types::{Bound, ValueType};
use crate::value::{export, join_list, Key, Value};

/// Marker prepended to failures raised by the `subtype` pass.
pub const ARRAY_ELEMENT_PREFIX: &str = "Array value validate error: ";

/// The first rule a value violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Missing or unrecognised `type`
    pub(crate) fn invalid_type_rule() -> Self {
        Self::new("Invalid schema, type is missing or unrecognized")
    }

    /// Unrecognised `subtype`
    pub(crate) fn invalid_subtype_rule() -> Self {
        Self::new("Invalid schema, subtype is unrecognized")
    }

    pub(crate) fn type_mismatch(expected: ValueType) -> Self {
        Self::new(format!("Invalid type, the value must be {}", expected))
    }

    pub(crate) fn below_min(min: Bound) -> Self {
        Self::new(format!("The value must not be less than {}", min))
    }

    pub(crate) fn above_max(max: Bound) -> Self {
        Self::new(format!("The value must not be greater than {}", max))
    }

    pub(crate) fn not_in_list(allowed: &[Value]) -> Self {
        Self::new(format!("The value must be in the list: {}", join_list(allowed)))
    }

    pub(crate) fn too_short(min: i64) -> Self {
        Self::new(format!("The string length must not be less than {}", min))
    }

    pub(crate) fn too_long(max: i64) -> Self {
        Self::new(format!("The string length must not be greater than {}", max))
    }

    pub(crate) fn string_not_in_list(allowed: &[Value]) -> Self {
        Self::new(format!(
            "The string value must be in the list: {}",
            join_list(allowed)
        ))
    }

    pub(crate) fn pattern_mismatch(pattern: &str) -> Self {
        Self::new(format!("The string value must match the regex: {}", pattern))
    }

    pub(crate) fn too_few_entries(min: Bound) -> Self {
        Self::new(format!("The array count must not be less than {}", min))
    }

    pub(crate) fn too_many_entries(max: i64) -> Self {
        Self::new(format!("The array count must not be greater than {}", max))
    }

    pub(crate) fn missing_required(key: &Key) -> Self {
        Self::new(format!("Missing required value, \"{}\" is required", key))
    }

    pub(crate) fn custom_rejected(outcome: &CustomOutcome) -> Self {
        Self::new(format!(
            "Custom function did not return true, err msg: {}, return: {}",
            outcome.message,
            export(&outcome.result)
        ))
    }

    pub(crate) fn too_deep(max_depth: usize) -> Self {
        Self::new(format!(
            "Schema nesting exceeds the maximum depth of {}",
            max_depth
        ))
    }

    /// Marks a failure as coming from one entry of the `subtype` pass.
    pub(crate) fn within_array(self) -> Self {
        Self::new(format!("{}{}", ARRAY_ELEMENT_PREFIX, self.message))
    }
}

/// Result of validating one value against one schema.
pub type ValidationResult = Result<(), ValidationError>;

/// Errors raised while loading or looking up named schemas.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("Failed to read schema source '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed schema file '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("Schema '{0}' is already registered")]
    Duplicate(String),

    #[error("Schema '{0}' not found")]
    UnknownSchema(String),

    #[error("Invalid schema name '{0}'")]
    InvalidName(String),
}

impl LoadError {
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for schema loading
pub type LoadResult<T> = Result<T, LoadError>;
