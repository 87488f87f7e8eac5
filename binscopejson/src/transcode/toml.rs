//! TOML transcoding: render parsed values as TOML text.
//!
//! Mapping:
//!   - Value::Null    -> error (TOML has no null)
//!   - Value::Bool    -> TOML boolean
//!   - Value::Number  -> TOML float
//!   - Value::String  -> TOML string
//!   - Value::Array   -> TOML array (objects inside become inline tables)
//!   - Value::Object  -> TOML table, members in parsed order
//!
//! TOML requires the top-level value to be a table; anything else errors.

use libscopejson::Value;
use toml_edit::DocumentMut;

/// Encode a value as a TOML string.
pub fn encode(value: &Value) -> Result<String, String> {
    let Value::Object(obj) = value else {
        return Err(format!(
            "TOML requires the top-level value to be a table/object, got {}",
            value.type_name()
        ));
    };
    let mut doc = DocumentMut::new();
    for (key, member) in obj {
        doc[key.as_str()] = value_to_item(member)?;
    }
    Ok(doc.to_string())
}

fn value_to_item(value: &Value) -> Result<toml_edit::Item, String> {
    match value {
        Value::Object(obj) => {
            let mut table = toml_edit::Table::new();
            for (k, v) in obj {
                table.insert(k, value_to_item(v)?);
            }
            Ok(toml_edit::Item::Table(table))
        }
        other => Ok(toml_edit::Item::Value(value_to_inline(other)?)),
    }
}

fn value_to_inline(value: &Value) -> Result<toml_edit::Value, String> {
    match value {
        Value::Null => Err("TOML has no null type".to_string()),
        Value::Bool(b) => Ok(toml_edit::Value::Boolean(toml_edit::Formatted::new(*b))),
        Value::Number(f) => Ok(toml_edit::Value::Float(toml_edit::Formatted::new(*f))),
        Value::String(s) => Ok(toml_edit::Value::String(toml_edit::Formatted::new(
            s.clone(),
        ))),
        Value::Array(arr) => {
            let mut toml_arr = toml_edit::Array::new();
            for v in arr {
                toml_arr.push(value_to_inline(v)?);
            }
            Ok(toml_edit::Value::Array(toml_arr))
        }
        Value::Object(obj) => {
            let mut inline = toml_edit::InlineTable::new();
            for (k, v) in obj {
                inline.insert(k.as_str(), value_to_inline(v)?);
            }
            Ok(toml_edit::Value::InlineTable(inline))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_nested_tables() {
        let value =
            libscopejson::parse(r#"{"title": "S", "list": [{"id": 1}], "div": {"n": 2.5}}"#)
                .unwrap();
        let toml = encode(&value).unwrap();
        assert!(toml.contains("title = \"S\""), "{}", toml);
        assert!(toml.contains("[div]"), "{}", toml);
        assert!(toml.contains("n = 2.5"), "{}", toml);
        assert!(toml.contains("id = 1.0"), "{}", toml);
    }

    #[test]
    fn test_rejects_null_and_scalars() {
        let null_member = libscopejson::parse(r#"{"a": null}"#).unwrap();
        assert_eq!(encode(&null_member), Err("TOML has no null type".to_string()));
        assert!(encode(&Value::Number(1.0)).is_err());
    }
}
