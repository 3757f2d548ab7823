//! paramguard - recursive schema validation for structured parameters
//!
//! ```
//! use paramguard::{validate, Schema, Table, Value, ValueType};
//!
//! let schema = Schema::of(ValueType::Array)
//!     .with_field("user_id", Schema::of(ValueType::Int).with_min(1000).required());
//!
//! let ok = Value::from(Table::new().with("user_id", 1024));
//! assert!(validate(&schema, &ok).is_ok());
//!
//! let err = validate(&schema, &Value::from(Table::new())).unwrap_err();
//! assert_eq!(err.message(), "Missing required value, \"user_id\" is required");
//! ```

pub mod cli;
pub mod observability;
pub mod schema;
pub mod value;

pub use schema::{
    validate, CustomOutcome, CustomValidator, FunctionRegistry, Schema, SchemaLoader,
    ValidationError, ValidationResult, Validator, ValueType,
};
pub use value::{Key, Record, Table, Value};
