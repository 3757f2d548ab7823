//! Schema type definitions
//!
//! Recognised type names:
//! - bool: boolean
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - string: UTF-8 string
//! - array: ordered keyed table
//! - object: opaque record
//!
//! A schema node is plain configuration. Every rule is optional; a rule that
//! does not apply to the declared type is ignored.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::custom::{CustomValidator, FuncRef};
use crate::value::{Key, Value};

/// The closed set of types a schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::Bool,
        ValueType::Int,
        ValueType::Float,
        ValueType::String,
        ValueType::Array,
        ValueType::Object,
    ];

    /// Returns the type name as written in schemas and messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }

    /// Looks up a type by its schema name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.type_name() == name)
    }

    /// Returns the runtime type of a value; `null` has none.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Int(_) => Some(ValueType::Int),
            Value::Float(_) => Some(ValueType::Float),
            Value::String(_) => Some(ValueType::String),
            Value::Array(_) => Some(ValueType::Array),
            Value::Object(_) => Some(ValueType::Object),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A `type` or `subtype` entry as written by the schema author.
///
/// Unrecognised names are kept so that validation can report the schema as
/// invalid instead of the schema failing to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Known(ValueType),
    Unrecognized(String),
}

impl DeclaredType {
    pub fn from_name(name: &str) -> Self {
        match ValueType::from_name(name) {
            Some(t) => DeclaredType::Known(t),
            None => DeclaredType::Unrecognized(name.to_string()),
        }
    }

    pub fn known(&self) -> Option<ValueType> {
        match self {
            DeclaredType::Known(t) => Some(*t),
            DeclaredType::Unrecognized(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DeclaredType::Known(t) => t.type_name(),
            DeclaredType::Unrecognized(name) => name,
        }
    }
}

impl From<ValueType> for DeclaredType {
    fn from(t: ValueType) -> Self {
        DeclaredType::Known(t)
    }
}

/// A numeric bound, integer or fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Int(i64),
    Float(f64),
}

impl Bound {
    pub fn as_f64(self) -> f64 {
        match self {
            Bound::Int(b) => b as f64,
            Bound::Float(b) => b,
        }
    }

    /// The bound truncated toward zero, used for lengths and counts.
    pub fn truncated(self) -> i64 {
        match self {
            Bound::Int(b) => b,
            Bound::Float(b) => b.trunc() as i64,
        }
    }

    /// True when `n` lies strictly below this bound.
    pub fn int_below(self, n: i64) -> bool {
        match self {
            Bound::Int(b) => n < b,
            Bound::Float(b) => (n as f64) < b,
        }
    }

    /// True when `n` lies strictly above this bound.
    pub fn int_above(self, n: i64) -> bool {
        match self {
            Bound::Int(b) => n > b,
            Bound::Float(b) => (n as f64) > b,
        }
    }

    pub fn float_below(self, x: f64) -> bool {
        x < self.as_f64()
    }

    pub fn float_above(self, x: f64) -> bool {
        x > self.as_f64()
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Int(b) => write!(f, "{}", b),
            Bound::Float(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Bound {
    fn from(b: i64) -> Self {
        Bound::Int(b)
    }
}

impl From<i32> for Bound {
    fn from(b: i32) -> Self {
        Bound::Int(b.into())
    }
}

impl From<usize> for Bound {
    fn from(b: usize) -> Self {
        i64::try_from(b).map_or(Bound::Float(b as f64), Bound::Int)
    }
}

impl From<f64> for Bound {
    fn from(b: f64) -> Self {
        Bound::Float(b)
    }
}

/// Validation rules for one value position.
///
/// Decoding from JSON is lenient: unknown keys are dropped and keys holding a
/// value of the wrong shape are treated as absent. See `decode.rs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub struct Schema {
    /// `type`: required unless an invocable `func` is set
    pub ty: Option<DeclaredType>,
    /// `func`: replaces every other rule of this node when invocable
    pub func: Option<FuncRef>,
    /// `min`: value bound for numbers, length bound for strings
    pub min: Option<Bound>,
    /// `max`: value bound for numbers, length bound for strings
    pub max: Option<Bound>,
    /// `in`: allowed literals; empty means unrestricted
    pub one_of: Vec<Value>,
    /// `match`: regex a string must contain a match for
    pub pattern: Option<String>,
    /// `minCount`: fewest entries an array may hold
    pub min_count: Option<Bound>,
    /// `maxCount`: most entries an array may hold
    pub max_count: Option<Bound>,
    /// `subtype`: type applied to every entry of an array
    pub subtype: Option<DeclaredType>,
    /// `subSchema`: rules for specific array keys, in declaration order
    pub sub_schema: IndexMap<Key, Schema>,
    /// `isRequired`: inside `subSchema`, the key must be present
    pub is_required: bool,
    /// `validateParent`: inside `subSchema`, the parent's `subtype` applies too
    pub validate_parent: bool,
}

impl Schema {
    /// A schema declaring only a type.
    pub fn of(ty: ValueType) -> Self {
        Self {
            ty: Some(ty.into()),
            ..Self::default()
        }
    }

    /// A schema declaring a type by name, recognised or not.
    pub fn of_name(name: &str) -> Self {
        Self {
            ty: Some(DeclaredType::from_name(name)),
            ..Self::default()
        }
    }

    /// A schema delegating entirely to `validator`.
    pub fn custom(validator: impl CustomValidator + 'static) -> Self {
        Self {
            func: Some(FuncRef::inline(validator)),
            ..Self::default()
        }
    }

    /// A schema delegating to a function resolved by name at validation time.
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            func: Some(FuncRef::named(name)),
            ..Self::default()
        }
    }

    pub fn with_min(mut self, min: impl Into<Bound>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn with_max(mut self, max: impl Into<Bound>) -> Self {
        self.max = Some(max.into());
        self
    }

    pub fn with_one_of<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.one_of = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_min_count(mut self, min: impl Into<Bound>) -> Self {
        self.min_count = Some(min.into());
        self
    }

    pub fn with_max_count(mut self, max: impl Into<Bound>) -> Self {
        self.max_count = Some(max.into());
        self
    }

    pub fn with_subtype(mut self, subtype: ValueType) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Adds a rule for one key of an array value.
    pub fn with_field(mut self, key: impl Into<Key>, rule: Schema) -> Self {
        self.sub_schema.insert(key.into(), rule);
        self
    }

    /// Marks this rule's key as mandatory in the parent array.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Opts this rule's key back into the parent's `subtype` pass.
    pub fn validating_parent(mut self) -> Self {
        self.validate_parent = true;
        self
    }

    /// The rule applied to each array entry by the `subtype` pass: this
    /// schema with `type` replaced and the array-only keyed rules dropped.
    pub(crate) fn element_schema(&self, element_type: ValueType) -> Schema {
        Schema {
            ty: Some(element_type.into()),
            func: self.func.clone(),
            min: self.min,
            max: self.max,
            one_of: self.one_of.clone(),
            pattern: self.pattern.clone(),
            min_count: self.min_count,
            max_count: self.max_count,
            subtype: None,
            sub_schema: IndexMap::new(),
            is_required: self.is_required,
            validate_parent: self.validate_parent,
        }
    }
}
