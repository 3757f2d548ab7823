//! Conversions between [`Value`] and `serde_json::Value`
//!
//! JSON objects and arrays both become tables; object keys go through the
//! usual key normalisation. Integers that fit `i64` stay integers, all other
//! numbers become floats. JSON has no record shape, so decoding never yields
//! `Value::Object`.

use serde_json::{Map, Number, Value as JsonValue};

use super::{Table, Value};

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => number_to_value(&n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(Table::list(items.into_iter().map(Value::from))),
            JsonValue::Object(map) => Value::Array(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        Value::from(json.clone())
    }
}

fn number_to_value(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Int(i) => JsonValue::Number(i.into()),
            Value::Float(x) => Number::from_f64(x).map_or(JsonValue::Null, JsonValue::Number),
            Value::String(s) => JsonValue::String(s),
            Value::Array(table) => {
                if table.is_list() {
                    JsonValue::Array(table.iter().map(|(_, v)| JsonValue::from(v.clone())).collect())
                } else {
                    let map: Map<String, JsonValue> = table
                        .iter()
                        .map(|(k, v)| (k.to_string(), JsonValue::from(v.clone())))
                        .collect();
                    JsonValue::Object(map)
                }
            }
            Value::Object(record) => {
                let map: Map<String, JsonValue> = record
                    .fields()
                    .map(|(k, v)| (k.to_string(), JsonValue::from(v.clone())))
                    .collect();
                JsonValue::Object(map)
            }
        }
    }
}
