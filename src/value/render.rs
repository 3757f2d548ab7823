//! Text rendering of values for messages
//!
//! Two forms are used:
//! - `Display`: the plain form used when listing allowed values
//! - [`export`]: a debug form that keeps type information, used to show
//!   what a custom validator actually returned

use std::fmt::{self, Write};

use super::{Key, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::Array(_) => f.write_str("array"),
            Value::Object(r) => f.write_str(r.class()),
        }
    }
}

/// Joins values with `,` using their plain form.
pub fn join_list(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders a value with its type visible: strings quoted, floats always
/// carrying a decimal point, containers spelled out.
pub fn export(value: &Value) -> String {
    let mut out = String::new();
    export_into(&mut out, value);
    out
}

fn export_into(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => {
            let _ = write!(out, "{}", b);
        }
        Value::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Float(x) => {
            let _ = write!(out, "{:?}", x);
        }
        Value::String(s) => quote_into(out, s),
        Value::Array(table) => {
            out.push_str("array (");
            for (i, (key, item)) in table.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push(' ');
                match key {
                    Key::Index(n) => {
                        let _ = write!(out, "{}", n);
                    }
                    Key::Name(name) => quote_into(out, name),
                }
                out.push_str(" => ");
                export_into(out, item);
            }
            if !table.is_empty() {
                out.push(' ');
            }
            out.push(')');
        }
        Value::Object(record) => {
            out.push_str(record.class());
            out.push_str(" {");
            for (i, (name, item)) in record.fields().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push(' ');
                out.push_str(name);
                out.push_str(" => ");
                export_into(out, item);
            }
            if !record.is_empty() {
                out.push(' ');
            }
            out.push('}');
        }
    }
}

fn quote_into(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Record, Table};

    #[test]
    fn test_export_scalars() {
        assert_eq!(export(&Value::Null), "NULL");
        assert_eq!(export(&Value::Bool(false)), "false");
        assert_eq!(export(&Value::Int(1)), "1");
        assert_eq!(export(&Value::Float(1.0)), "1.0");
        assert_eq!(export(&Value::Float(2.5)), "2.5");
        assert_eq!(export(&Value::from("it's")), "'it\\'s'");
    }

    #[test]
    fn test_export_containers() {
        let table = Table::list([1]).with("name", "x");
        assert_eq!(export(&Value::from(table)), "array ( 0 => 1, 'name' => 'x' )");
        assert_eq!(export(&Value::from(Table::new())), "array ()");

        let record = Record::new("User").with_field("id", 7);
        assert_eq!(export(&Value::from(record)), "User { id => 7 }");
    }

    #[test]
    fn test_join_list_mixed() {
        let values = vec![Value::Float(2.1), Value::Int(4), Value::from("a4"), Value::Int(8)];
        assert_eq!(join_list(&values), "2.1,4,a4,8");
    }
}
