//! Opaque structured instances

use indexmap::IndexMap;

use super::Value;

/// A structured instance with a class name and named fields.
///
/// Records satisfy the `object` type and nothing else. Their fields are
/// never inspected by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    class: String,
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: IndexMap::new(),
        }
    }

    /// Adds or replaces a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
