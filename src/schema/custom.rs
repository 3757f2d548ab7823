//! Custom validation functions
//!
//! A schema node may hand its value to caller code instead of the built-in
//! rules. The function reports back a raw `result` and a message; only a
//! result of exactly `Value::Bool(true)` counts as a pass.
//!
//! Functions are attached inline, or referenced by name and resolved through a
//! [`FunctionRegistry`] when the schema is validated. A name that does not
//! resolve is treated as if no function were set.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Caller-supplied validation logic for one schema node.
pub trait CustomValidator: Send + Sync {
    fn validate(&self, value: &Value) -> CustomOutcome;
}

impl<F> CustomValidator for F
where
    F: Fn(&Value) -> CustomOutcome + Send + Sync,
{
    fn validate(&self, value: &Value) -> CustomOutcome {
        self(value)
    }
}

/// What a custom validator returned.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomOutcome {
    /// Raw result; anything other than `Bool(true)` is a failure
    pub result: Value,
    /// Free-form message from the validator
    pub message: String,
}

impl CustomOutcome {
    pub fn pass() -> Self {
        Self::returned(true, "")
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::returned(false, message)
    }

    /// An arbitrary result, for validators that do not return a plain bool.
    pub fn returned(result: impl Into<Value>, message: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            message: message.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self.result, Value::Bool(true))
    }
}

/// Reference to a custom validator from a schema node.
#[derive(Clone)]
pub enum FuncRef {
    /// Validator attached directly to the schema
    Inline(Arc<dyn CustomValidator>),
    /// Validator looked up in a registry at validation time
    Named(String),
}

impl FuncRef {
    pub fn inline(validator: impl CustomValidator + 'static) -> Self {
        FuncRef::Inline(Arc::new(validator))
    }

    pub fn named(name: impl Into<String>) -> Self {
        FuncRef::Named(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            FuncRef::Inline(_) => None,
            FuncRef::Named(name) => Some(name.as_str()),
        }
    }
}

impl fmt::Debug for FuncRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuncRef::Inline(_) => f.write_str("Inline(..)"),
            FuncRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Named custom validators available to schemas decoded from JSON.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn CustomValidator>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, validator: impl CustomValidator + 'static) {
        self.functions.insert(name.into(), Arc::new(validator));
    }

    /// Builder form of [`FunctionRegistry::register`].
    pub fn with(mut self, name: impl Into<String>, validator: impl CustomValidator + 'static) -> Self {
        self.register(name, validator);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn CustomValidator> {
        self.functions.get(name).map(|v| v.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Resolves a schema's function reference, if it is invocable.
    pub fn resolve<'a>(&'a self, func: &'a FuncRef) -> Option<&'a dyn CustomValidator> {
        match func {
            FuncRef::Inline(validator) => Some(validator.as_ref()),
            FuncRef::Named(name) => self.get(name),
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}
