//! Schema validator for runtime values
//!
//! Validation semantics:
//! - An invocable `func` replaces every other rule of its node
//! - Otherwise `type` must be recognised and must match the value exactly
//! - Type-specific rules run in a fixed order; the first violation wins
//! - Array values recurse through `subSchema` first, then through `subtype`
//!
//! Forbidden behaviors:
//! - Numeric coercion (`int` never accepts a float, nor a numeric string)
//! - Error accumulation (validation stops at the first failure)
//! - Mutating the schema or the value

use super::custom::FunctionRegistry;
use super::errors::{ValidationError, ValidationResult};
use super::pattern;
use super::types::{Bound, Schema, ValueType};
use crate::value::{Table, Value};

/// Validates values against schemas.
///
/// Named `func` references resolve through the borrowed registry. The
/// validator holds no state between calls and may be shared across threads.
pub struct Validator<'a> {
    functions: &'a FunctionRegistry,
    max_depth: Option<usize>,
}

impl<'a> Validator<'a> {
    /// Creates a validator resolving named functions through `functions`.
    pub fn new(functions: &'a FunctionRegistry) -> Self {
        Self {
            functions,
            max_depth: None,
        }
    }

    /// Limits schema nesting. The top-level node is depth 0; a node nested
    /// deeper than `max_depth` fails validation.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Validates `value` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a `ValidationError`. A malformed
    /// schema is reported the same way as a non-conforming value.
    pub fn validate(&self, schema: &Schema, value: &Value) -> ValidationResult {
        self.validate_node(schema, value, 0)
    }

    fn validate_node(&self, schema: &Schema, value: &Value, depth: usize) -> ValidationResult {
        if let Some(max_depth) = self.max_depth {
            if depth > max_depth {
                return Err(ValidationError::too_deep(max_depth));
            }
        }

        if let Some(custom) = schema.func.as_ref().and_then(|f| self.functions.resolve(f)) {
            let outcome = custom.validate(value);
            if !outcome.is_pass() {
                return Err(ValidationError::custom_rejected(&outcome));
            }
            return Ok(());
        }

        let expected = schema
            .ty
            .as_ref()
            .and_then(|t| t.known())
            .ok_or_else(ValidationError::invalid_type_rule)?;

        match (expected, value) {
            (ValueType::Bool, Value::Bool(_)) => Ok(()),
            (ValueType::Int, Value::Int(n)) => check_int(schema, *n),
            (ValueType::Float, Value::Float(x)) => check_float(schema, *x),
            (ValueType::String, Value::String(s)) => check_string(schema, s),
            (ValueType::Array, Value::Array(table)) => self.check_array(schema, table, depth),
            (ValueType::Object, Value::Object(_)) => Ok(()),
            _ => Err(ValidationError::type_mismatch(expected)),
        }
    }

    fn is_invocable(&self, schema: &Schema) -> bool {
        schema
            .func
            .as_ref()
            .map_or(false, |f| self.functions.resolve(f).is_some())
    }

    /// Array rules: entry counts, then keyed rules, then the subtype pass.
    fn check_array(&self, schema: &Schema, table: &Table, depth: usize) -> ValidationResult {
        let count = i64::try_from(table.len()).unwrap_or(i64::MAX);
        if let Some(min) = schema.min_count {
            if min.int_below(count) {
                return Err(ValidationError::too_few_entries(min));
            }
        }
        // The upper count is compared and reported as a whole number
        if let Some(max) = schema.max_count.map(Bound::truncated) {
            if count > max {
                return Err(ValidationError::too_many_entries(max));
            }
        }

        // Keyed rules, in declaration order. Inner messages pass through as is.
        for (key, rule) in &schema.sub_schema {
            let entry = table.get_present(key);
            if rule.is_required && entry.is_none() {
                return Err(ValidationError::missing_required(key));
            }
            if let Some(entry) = entry {
                if rule.ty.is_some() || self.is_invocable(rule) {
                    self.validate_node(rule, entry, depth + 1)?;
                }
            }
        }

        let Some(subtype) = &schema.subtype else {
            return Ok(());
        };
        let element_type = subtype
            .known()
            .ok_or_else(ValidationError::invalid_subtype_rule)?;
        let element = schema.element_schema(element_type);

        for (key, entry) in table.iter() {
            if let Some(rule) = schema.sub_schema.get(key) {
                // A keyed rule of another type fully governs its entry
                if rule.ty.as_ref().is_some_and(|t| t != subtype) {
                    continue;
                }
                if !rule.validate_parent {
                    continue;
                }
            }
            self.validate_node(&element, entry, depth + 1)
                .map_err(ValidationError::within_array)?;
        }

        Ok(())
    }
}

/// Validates `value` against `schema` with no named functions and no depth limit.
pub fn validate(schema: &Schema, value: &Value) -> ValidationResult {
    let functions = FunctionRegistry::new();
    Validator::new(&functions).validate(schema, value)
}

fn check_int(schema: &Schema, value: i64) -> ValidationResult {
    if let Some(min) = schema.min {
        if min.int_below(value) {
            return Err(ValidationError::below_min(min));
        }
    }
    if let Some(max) = schema.max {
        if max.int_above(value) {
            return Err(ValidationError::above_max(max));
        }
    }
    if !schema.one_of.is_empty()
        && !schema
            .one_of
            .iter()
            .any(|lit| numeric_eq(lit, value as f64, Some(value)))
    {
        return Err(ValidationError::not_in_list(&schema.one_of));
    }
    Ok(())
}

fn check_float(schema: &Schema, value: f64) -> ValidationResult {
    if let Some(min) = schema.min {
        if min.float_below(value) {
            return Err(ValidationError::below_min(min));
        }
    }
    if let Some(max) = schema.max {
        if max.float_above(value) {
            return Err(ValidationError::above_max(max));
        }
    }
    if !schema.one_of.is_empty() && !schema.one_of.iter().any(|lit| numeric_eq(lit, value, None))
    {
        return Err(ValidationError::not_in_list(&schema.one_of));
    }
    Ok(())
}

/// Exact numeric equality between a listed literal and a number. Integer
/// literals compare against `int` exactly when available; non-numeric
/// literals never match.
fn numeric_eq(literal: &Value, as_float: f64, as_int: Option<i64>) -> bool {
    match (literal, as_int) {
        (Value::Int(lit), Some(n)) => *lit == n,
        (Value::Int(lit), None) => *lit as f64 == as_float,
        (Value::Float(lit), _) => *lit == as_float,
        _ => false,
    }
}

fn check_string(schema: &Schema, value: &str) -> ValidationResult {
    let length = i64::try_from(value.chars().count()).unwrap_or(i64::MAX);

    if let Some(min) = schema.min {
        let min = min.truncated();
        if length < min {
            return Err(ValidationError::too_short(min));
        }
    }
    if let Some(max) = schema.max {
        let max = max.truncated();
        if length > max {
            return Err(ValidationError::too_long(max));
        }
    }
    if !schema.one_of.is_empty() && !schema.one_of.iter().any(|lit| lit.as_str() == Some(value))
    {
        return Err(ValidationError::string_not_in_list(&schema.one_of));
    }
    if let Some(pattern) = &schema.pattern {
        if !pattern::is_match(pattern, value) {
            return Err(ValidationError::pattern_mismatch(pattern));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::custom::CustomOutcome;
    use crate::value::Record;
    use serde_json::json;

    fn check(schema: serde_json::Value, value: serde_json::Value) -> ValidationResult {
        validate(&Schema::from(schema), &Value::from(value))
    }

    fn message(result: ValidationResult) -> String {
        result.unwrap_err().message().to_string()
    }

    #[test]
    fn test_missing_type_is_invalid_schema() {
        let result = check(json!({}), json!(1));
        assert_eq!(message(result), "Invalid schema, type is missing or unrecognized");

        let result = check(json!({"type": "str"}), json!("aaa"));
        assert_eq!(message(result), "Invalid schema, type is missing or unrecognized");
    }

    #[test]
    fn test_each_type_accepts_its_own_values() {
        assert!(check(json!({"type": "bool"}), json!(false)).is_ok());
        assert!(check(json!({"type": "int"}), json!(-10000010)).is_ok());
        assert!(check(json!({"type": "float"}), json!(19.9)).is_ok());
        assert!(check(json!({"type": "string"}), json!("1")).is_ok());
        assert!(check(json!({"type": "array"}), json!([])).is_ok());
        assert!(check(json!({"type": "array"}), json!({"one": 1})).is_ok());

        let record = Value::from(Record::new("ArrayObject"));
        assert!(validate(&Schema::of(ValueType::Object), &record).is_ok());
    }

    #[test]
    fn test_strict_numeric_types() {
        assert_eq!(
            message(check(json!({"type": "int"}), json!(10.0))),
            "Invalid type, the value must be int"
        );
        assert_eq!(
            message(check(json!({"type": "float"}), json!(9))),
            "Invalid type, the value must be float"
        );
        assert!(check(json!({"type": "int"}), json!("60")).is_err());
    }

    #[test]
    fn test_null_matches_nothing() {
        for t in ValueType::ALL {
            let result = validate(&Schema::of(t), &Value::Null);
            assert_eq!(message(result), format!("Invalid type, the value must be {}", t));
        }
    }

    #[test]
    fn test_object_rejects_tables() {
        assert!(check(json!({"type": "object"}), json!({"a": 1})).is_err());
        assert!(check(json!({"type": "object"}), json!("string")).is_err());
    }

    #[test]
    fn test_int_check_order() {
        let schema = json!({"type": "int", "min": 10, "max": 5, "in": [1]});
        assert_eq!(message(check(schema.clone(), json!(7))), "The value must not be less than 10");
        assert_eq!(message(check(schema, json!(12))), "The value must not be greater than 5");
    }

    #[test]
    fn test_int_bounds_inclusive() {
        let schema = json!({"type": "int", "min": 60, "max": 100});
        assert!(check(schema.clone(), json!(60)).is_ok());
        assert!(check(schema.clone(), json!(100)).is_ok());
        assert!(check(schema.clone(), json!(59)).is_err());
        assert!(check(schema, json!(101)).is_err());
    }

    #[test]
    fn test_int_fractional_bound() {
        let schema = json!({"type": "int", "min": 9.5});
        assert!(check(schema.clone(), json!(10)).is_ok());
        assert_eq!(message(check(schema, json!(9))), "The value must not be less than 9.5");
    }

    #[test]
    fn test_int_membership() {
        let schema = json!({"type": "int", "in": [2, 4, 6, 8]});
        assert!(check(schema.clone(), json!(4)).is_ok());
        assert_eq!(message(check(schema, json!(10))), "The value must be in the list: 2,4,6,8");

        // Empty list means no restriction
        assert!(check(json!({"type": "int", "in": []}), json!(10)).is_ok());
    }

    #[test]
    fn test_float_membership_is_exact() {
        let schema = json!({"type": "float", "in": [2.1, 4, "a4", 8]});
        assert!(check(schema.clone(), json!(2.1)).is_ok());
        assert!(check(schema.clone(), json!(4.0)).is_ok());
        assert!(check(schema.clone(), json!(2.1000001)).is_err());
        assert_eq!(
            message(check(schema, json!(3.5))),
            "The value must be in the list: 2.1,4,a4,8"
        );
    }

    #[test]
    fn test_bool_ignores_inapplicable_rules() {
        assert!(check(json!({"type": "bool", "max": 100, "in": [false]}), json!(true)).is_ok());
    }

    #[test]
    fn test_string_length_counts_code_points() {
        assert!(check(json!({"type": "string", "max": 2}), json!("好好")).is_ok());
        assert_eq!(
            message(check(json!({"type": "string", "min": 6}), json!("百度"))),
            "The string length must not be less than 6"
        );
        assert_eq!(
            message(check(json!({"type": "string", "max": 2}), json!("one"))),
            "The string length must not be greater than 2"
        );
    }

    #[test]
    fn test_string_length_bounds_truncate() {
        assert!(check(json!({"type": "string", "min": 4.9}), json!("test")).is_ok());
        assert_eq!(
            message(check(json!({"type": "string", "max": 2.9}), json!("abc"))),
            "The string length must not be greater than 2"
        );
    }

    #[test]
    fn test_string_check_order() {
        let schema = json!({"type": "string", "in": ["abc"], "match": "^x"});
        assert_eq!(
            message(check(schema.clone(), json!("xyz"))),
            "The string value must be in the list: abc"
        );
        assert_eq!(
            message(check(schema, json!("abc"))),
            "The string value must match the regex: ^x"
        );
    }

    #[test]
    fn test_string_membership_is_case_sensitive() {
        let schema = json!({"type": "string", "in": ["true", "false"]});
        assert!(check(schema.clone(), json!("true")).is_ok());
        assert!(check(schema, json!("TRUE")).is_err());
    }

    #[test]
    fn test_malformed_pattern_fails() {
        assert_eq!(
            message(check(json!({"type": "string", "match": "+"}), json!("++"))),
            "The string value must match the regex: +"
        );
    }

    #[test]
    fn test_array_counts() {
        let schema = json!({"type": "array", "minCount": 2, "maxCount": 3});
        assert!(check(schema.clone(), json!({"a": 1, "b": 2})).is_ok());
        assert!(check(schema.clone(), json!([1, 2, 3])).is_ok());
        assert_eq!(
            message(check(schema.clone(), json!({"a": 1}))),
            "The array count must not be less than 2"
        );
        assert_eq!(
            message(check(schema, json!([1, 2, 3, 4]))),
            "The array count must not be greater than 3"
        );
    }

    #[test]
    fn test_fractional_max_count_truncates() {
        let schema = json!({"type": "array", "maxCount": 2.5});
        assert!(check(schema.clone(), json!([1, 2])).is_ok());
        assert_eq!(
            message(check(schema, json!([1, 2, 3]))),
            "The array count must not be greater than 2"
        );
    }

    #[test]
    fn test_sub_schema_failures_are_not_prefixed() {
        let schema = json!({"type": "array", "subSchema": {"user_id": {"type": "int", "min": 1000}}});
        assert_eq!(
            message(check(schema, json!({"user_id": "1001"}))),
            "Invalid type, the value must be int"
        );
    }

    #[test]
    fn test_subtype_failures_are_prefixed() {
        let schema = json!({"type": "array", "subtype": "string", "max": 5});
        assert_eq!(
            message(check(schema, json!(["macBook", 78]))),
            "Array value validate error: The string length must not be greater than 5"
        );
    }

    #[test]
    fn test_invalid_subtype() {
        let schema = json!({"type": "array", "subtype": "integer"});
        assert_eq!(
            message(check(schema, json!([1]))),
            "Invalid schema, subtype is unrecognized"
        );
    }

    #[test]
    fn test_sub_schema_runs_before_subtype() {
        let schema = json!({
            "type": "array",
            "subtype": "int",
            "subSchema": {"name": {"type": "string", "isRequired": true}}
        });
        // Both passes would fail; the keyed pass reports first
        assert_eq!(
            message(check(schema, json!(["x"]))),
            "Missing required value, \"name\" is required"
        );
    }

    #[test]
    fn test_keyed_rule_without_type_is_not_run() {
        let schema = json!({"type": "array", "subSchema": {"id": {"min": 5}}});
        assert!(check(schema, json!({"id": 1})).is_ok());
    }

    #[test]
    fn test_keyed_rule_with_unknown_type_reports_schema_error() {
        let schema = json!({"type": "array", "subSchema": {"id": {"type": "text"}}});
        assert_eq!(
            message(check(schema.clone(), json!({"id": "x"}))),
            "Invalid schema, type is missing or unrecognized"
        );
        // Absent keys are never checked
        assert!(check(schema, json!({"other": "x"})).is_ok());
    }

    #[test]
    fn test_null_entry_counts_as_missing() {
        let schema = json!({"type": "array", "subSchema": {"id": {"type": "int", "isRequired": true}}});
        assert_eq!(
            message(check(schema, json!({"id": null}))),
            "Missing required value, \"id\" is required"
        );
    }

    #[test]
    fn test_inline_function_overrides_rules() {
        let schema = Schema::custom(|_: &Value| CustomOutcome::pass()).with_min(100);
        assert!(validate(&schema, &Value::from("anything")).is_ok());
    }

    #[test]
    fn test_inline_function_rejection_message() {
        let schema = Schema::custom(|_: &Value| CustomOutcome::returned(1, "in user func"));
        assert_eq!(
            message(validate(&schema, &Value::Null)),
            "Custom function did not return true, err msg: in user func, return: 1"
        );
    }

    #[test]
    fn test_named_function_resolution() {
        let functions = FunctionRegistry::new().with("userFunc", |_: &Value| CustomOutcome::pass());
        let validator = Validator::new(&functions);

        let schema = Schema::from(json!({"func": "userFunc"}));
        assert!(validator.validate(&schema, &Value::from("user func")).is_ok());

        // Without the registry the name is not invocable and `type` is required
        assert_eq!(
            message(validate(&schema, &Value::from("user func"))),
            "Invalid schema, type is missing or unrecognized"
        );
    }

    #[test]
    fn test_unresolved_function_falls_back_to_type() {
        let schema = Schema::from(json!({"func": "missing", "type": "int"}));
        assert!(validate(&schema, &Value::Int(3)).is_ok());
        assert!(validate(&schema, &Value::from("3")).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let leaf = Schema::of(ValueType::Int);
        let mid = Schema::of(ValueType::Array).with_field("a", leaf);
        let root = Schema::of(ValueType::Array).with_field("a", mid);
        let value = Value::from(json!({"a": {"a": 1}}));

        let functions = FunctionRegistry::new();
        assert!(Validator::new(&functions).with_max_depth(2).validate(&root, &value).is_ok());
        assert_eq!(
            message(Validator::new(&functions).with_max_depth(1).validate(&root, &value)),
            "Schema nesting exceeds the maximum depth of 1"
        );
        assert!(validate(&root, &value).is_ok());
    }

    #[test]
    fn test_validation_does_not_touch_inputs() {
        let schema = Schema::from(json!({"type": "array", "subtype": "int", "min": 0}));
        let value = Value::from(json!([1, 2, 3]));
        let (schema_before, value_before) = (serde_json::Value::from(schema.clone()), value.clone());

        for _ in 0..3 {
            assert!(validate(&schema, &value).is_ok());
        }
        assert_eq!(serde_json::Value::from(schema), schema_before);
        assert_eq!(value, value_before);
    }
}
