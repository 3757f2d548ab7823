//! JSON form of schemas
//!
//! ```json
//! {
//!   "type": "array",
//!   "subtype": "int",
//!   "min": 0,
//!   "subSchema": {
//!     "user_id": {"type": "string", "min": 1},
//!     "user_valid": {"type": "bool", "isRequired": true}
//!   }
//! }
//! ```
//!
//! Decoding never fails. Unknown keys are ignored, and a recognised key whose
//! value has the wrong shape is treated as absent: a non-numeric `min`, an `in`
//! that is neither a list nor an object, an empty `match`. A `subSchema`
//! written as a list holds the rules for entries `0`, `1`, and so on. Numeric strings count as numbers for
//! bounds. `isRequired` and `validateParent` accept loosely true values.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use super::custom::FuncRef;
use super::types::{Bound, DeclaredType, Schema};
use crate::value::{Key, Value};

impl From<JsonValue> for Schema {
    fn from(json: JsonValue) -> Self {
        decode(&json)
    }
}

impl From<&JsonValue> for Schema {
    fn from(json: &JsonValue) -> Self {
        decode(json)
    }
}

fn decode(json: &JsonValue) -> Schema {
    let Some(obj) = json.as_object() else {
        return Schema::default();
    };

    Schema {
        ty: obj.get("type").and_then(decode_type),
        func: obj
            .get("func")
            .and_then(JsonValue::as_str)
            .filter(|name| !name.is_empty())
            .map(FuncRef::named),
        min: obj.get("min").and_then(decode_bound),
        max: obj.get("max").and_then(decode_bound),
        one_of: obj.get("in").map(decode_one_of).unwrap_or_default(),
        pattern: obj
            .get("match")
            .and_then(JsonValue::as_str)
            .filter(|p| !p.is_empty())
            .map(String::from),
        min_count: obj.get("minCount").and_then(decode_bound),
        max_count: obj.get("maxCount").and_then(decode_bound),
        subtype: obj.get("subtype").and_then(decode_type),
        sub_schema: obj.get("subSchema").map(decode_sub_schema).unwrap_or_default(),
        is_required: obj.get("isRequired").map_or(false, is_truthy),
        validate_parent: obj.get("validateParent").map_or(false, is_truthy),
    }
}

/// A list, or an object whose values are taken in order.
fn decode_one_of(json: &JsonValue) -> Vec<Value> {
    match json {
        JsonValue::Array(items) => items.iter().map(Value::from).collect(),
        JsonValue::Object(map) => map.values().map(Value::from).collect(),
        _ => Vec::new(),
    }
}

/// An object keyed by entry key, or a list whose positions are the keys.
fn decode_sub_schema(json: &JsonValue) -> IndexMap<Key, Schema> {
    match json {
        JsonValue::Object(rules) => rules
            .iter()
            .filter(|(_, rule)| !rule.is_null())
            .map(|(key, rule)| (Key::from(key.as_str()), decode(rule)))
            .collect(),
        JsonValue::Array(rules) => rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| !rule.is_null())
            .map(|(i, rule)| (Key::Index(i as i64), decode(rule)))
            .collect(),
        _ => IndexMap::new(),
    }
}

/// Empty entries (`null`, `false`, `0`, `""`) count as no declaration.
/// Anything else that is not a recognised name is kept as unrecognised.
fn decode_type(json: &JsonValue) -> Option<DeclaredType> {
    if !is_truthy(json) {
        return None;
    }
    match json {
        JsonValue::String(name) => Some(DeclaredType::from_name(name)),
        other => Some(DeclaredType::Unrecognized(other.to_string())),
    }
}

fn decode_bound(json: &JsonValue) -> Option<Bound> {
    match json {
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Some(Bound::Int(i)),
            None => n.as_f64().map(Bound::Float),
        },
        JsonValue::String(s) => parse_numeric(s.trim()),
        _ => None,
    }
}

fn parse_numeric(s: &str) -> Option<Bound> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Bound::Int(i));
    }
    s.parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(Bound::Float)
}

/// Loose truthiness: `true`, non-zero numbers, non-empty strings other than
/// `"0"`, and non-empty lists or objects.
fn is_truthy(json: &JsonValue) -> bool {
    match json {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map_or(false, |x| x != 0.0),
        JsonValue::String(s) => !s.is_empty() && s != "0",
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
    }
}

impl From<Schema> for JsonValue {
    fn from(schema: Schema) -> Self {
        encode(&schema)
    }
}

fn encode(schema: &Schema) -> JsonValue {
    let mut obj = Map::new();
    if let Some(ty) = &schema.ty {
        obj.insert("type".into(), ty.name().into());
    }
    // Inline functions have no JSON form
    if let Some(name) = schema.func.as_ref().and_then(FuncRef::name) {
        obj.insert("func".into(), name.into());
    }
    if let Some(min) = schema.min {
        obj.insert("min".into(), encode_bound(min));
    }
    if let Some(max) = schema.max {
        obj.insert("max".into(), encode_bound(max));
    }
    if !schema.one_of.is_empty() {
        let items = schema.one_of.iter().cloned().map(JsonValue::from).collect();
        obj.insert("in".into(), JsonValue::Array(items));
    }
    if let Some(pattern) = &schema.pattern {
        obj.insert("match".into(), pattern.as_str().into());
    }
    if let Some(min) = schema.min_count {
        obj.insert("minCount".into(), encode_bound(min));
    }
    if let Some(max) = schema.max_count {
        obj.insert("maxCount".into(), encode_bound(max));
    }
    if let Some(subtype) = &schema.subtype {
        obj.insert("subtype".into(), subtype.name().into());
    }
    if !schema.sub_schema.is_empty() {
        let rules: Map<String, JsonValue> = schema
            .sub_schema
            .iter()
            .map(|(key, rule)| (key.to_string(), encode(rule)))
            .collect();
        obj.insert("subSchema".into(), JsonValue::Object(rules));
    }
    if schema.is_required {
        obj.insert("isRequired".into(), true.into());
    }
    if schema.validate_parent {
        obj.insert("validateParent".into(), true.into());
    }
    JsonValue::Object(obj)
}

fn encode_bound(bound: Bound) -> JsonValue {
    match bound {
        Bound::Int(i) => i.into(),
        Bound::Float(x) => serde_json::Number::from_f64(x).map_or(JsonValue::Null, JsonValue::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::ValueType;
    use serde_json::json;

    #[test]
    fn test_decode_full_schema() {
        let schema = Schema::from(json!({
            "type": "array",
            "subtype": "int",
            "min": 0,
            "subSchema": {
                "user_id": {"type": "string", "min": 1},
                "user_valid": {"type": "bool", "isRequired": 1}
            }
        }));

        assert_eq!(schema.ty, Some(DeclaredType::Known(ValueType::Array)));
        assert_eq!(schema.subtype, Some(DeclaredType::Known(ValueType::Int)));
        assert_eq!(schema.min, Some(Bound::Int(0)));

        let keys: Vec<String> = schema.sub_schema.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["user_id", "user_valid"]);
        assert!(schema.sub_schema[&Key::from("user_valid")].is_required);
        assert!(!schema.sub_schema[&Key::from("user_id")].is_required);
    }

    #[test]
    fn test_wrong_shapes_are_ignored() {
        let schema = Schema::from(json!({
            "type": "string",
            "min": "abc",
            "max": [1],
            "in": "abc",
            "subSchema": "abc",
            "match": "",
            "unknown": 1
        }));
        assert!(schema.min.is_none());
        assert!(schema.max.is_none());
        assert!(schema.one_of.is_empty());
        assert!(schema.pattern.is_none());
        assert!(schema.sub_schema.is_empty());
    }

    #[test]
    fn test_list_sub_schema_keys_by_position() {
        let schema = Schema::from(json!({
            "type": "array",
            "subSchema": [{"type": "int", "isRequired": 1}, null, {"type": "string"}]
        }));

        let keys: Vec<&Key> = schema.sub_schema.keys().collect();
        assert_eq!(keys, vec![&Key::Index(0), &Key::Index(2)]);
        assert!(schema.sub_schema[&Key::Index(0)].is_required);
    }

    #[test]
    fn test_object_in_uses_values() {
        let schema = Schema::from(json!({"type": "string", "in": {"a": "abc", "b": "xyz"}}));
        assert_eq!(schema.one_of, vec![Value::from("abc"), Value::from("xyz")]);
    }

    #[test]
    fn test_numeric_strings_are_bounds() {
        let schema = Schema::from(json!({"type": "int", "min": "5", "max": " 7.5 "}));
        assert_eq!(schema.min, Some(Bound::Int(5)));
        assert_eq!(schema.max, Some(Bound::Float(7.5)));
    }

    #[test]
    fn test_unrecognized_type_is_kept() {
        let schema = Schema::from(json!({"type": "str"}));
        assert_eq!(schema.ty, Some(DeclaredType::Unrecognized("str".into())));

        let schema = Schema::from(json!({"type": 5}));
        assert_eq!(schema.ty, Some(DeclaredType::Unrecognized("5".into())));

        let schema = Schema::from(json!({"type": ""}));
        assert!(schema.ty.is_none());
    }

    #[test]
    fn test_loose_flags() {
        for truthy in [json!(true), json!(1), json!("yes"), json!(2.5)] {
            let schema = Schema::from(json!({"isRequired": truthy, "validateParent": truthy}));
            assert!(schema.is_required);
            assert!(schema.validate_parent);
        }
        for falsy in [json!(false), json!(0), json!("0"), json!(""), json!(null)] {
            let schema = Schema::from(json!({"isRequired": falsy}));
            assert!(!schema.is_required);
        }
    }

    #[test]
    fn test_func_decodes_to_name() {
        let schema = Schema::from(json!({"func": "userFunc"}));
        assert_eq!(schema.func.as_ref().and_then(FuncRef::name), Some("userFunc"));
        assert!(Schema::from(json!({"func": 12})).func.is_none());
    }

    #[test]
    fn test_numeric_sub_schema_keys_normalize() {
        let schema = Schema::from(json!({"type": "array", "subSchema": {"0": {"type": "int"}}}));
        assert!(schema.sub_schema.contains_key(&Key::Index(0)));
    }

    #[test]
    fn test_encode_keeps_declared_order() {
        let source = json!({
            "type": "array",
            "func": "check",
            "min": 1,
            "max": 2.5,
            "in": [1, "a"],
            "match": "^a",
            "minCount": 1,
            "maxCount": 3,
            "subtype": "int",
            "subSchema": {"b": {"type": "bool", "isRequired": true}, "a": {"type": "int", "validateParent": true}}
        });
        let encoded = JsonValue::from(Schema::from(source.clone()));
        assert_eq!(encoded, source);
        assert_eq!(encoded.to_string(), source.to_string());
    }

    #[test]
    fn test_deserialize_from_text() {
        let schema: Schema = serde_json::from_str(r#"{"type": "float", "in": [2.1, 4, "a4", 8]}"#).unwrap();
        assert_eq!(schema.one_of.len(), 4);
        assert_eq!(schema.one_of[1], Value::Int(4));
    }
}
