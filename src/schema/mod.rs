//! Recursive schema validation for structured parameters
//!
//! A [`Schema`] describes one value: its type, optional bounds, an allowed
//! list, a regex for strings, and for arrays the rules for named entries
//! (`subSchema`) and for every entry (`subtype`). Validation stops at the
//! first violated rule and reports it as a [`ValidationError`].
//!
//! # Rules
//!
//! - `func` runs before any type check and must return exactly `true`
//! - `subSchema` rules only apply to keys that are present, unless `isRequired`
//! - The `subtype` pass skips keys whose `subSchema` rule declares a different
//!   type, unless that rule sets `validateParent`
//! - Validation is pure: same schema and value, same outcome

mod custom;
mod decode;
mod errors;
mod loader;
mod pattern;
mod types;
mod validator;

pub use custom::{CustomOutcome, CustomValidator, FuncRef, FunctionRegistry};
pub use errors::{LoadError, LoadResult, ValidationError, ValidationResult, ARRAY_ELEMENT_PREFIX};
pub use loader::SchemaLoader;
pub use types::{Bound, DeclaredType, Schema, ValueType};
pub use validator::{validate, Validator};
