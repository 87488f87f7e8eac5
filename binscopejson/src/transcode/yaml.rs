//! YAML transcoding: render parsed values as YAML text.
//!
//! Mapping:
//!   - Value::Null    -> YAML null
//!   - Value::Bool    -> YAML bool
//!   - Value::Number  -> YAML float
//!   - Value::String  -> YAML string (raw content, escapes left as written)
//!   - Value::Array   -> YAML sequence
//!   - Value::Object  -> YAML mapping, members in parsed order

use libscopejson::Value;

/// Encode a value as a YAML string.
pub fn encode(value: &Value) -> Result<String, String> {
    serde_yaml::to_string(&value_to_yaml(value)).map_err(|e| format!("YAML encode error: {}", e))
}

fn value_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Number(f) => serde_yaml::Value::Number(serde_yaml::Number::from(*f)),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Array(arr) => serde_yaml::Value::Sequence(arr.iter().map(value_to_yaml).collect()),
        Value::Object(obj) => {
            let mut map = serde_yaml::Mapping::new();
            for (k, v) in obj {
                map.insert(serde_yaml::Value::String(k.clone()), value_to_yaml(v));
            }
            serde_yaml::Value::Mapping(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keeps_member_order() {
        let value = libscopejson::parse(r#"{"z": [true, null], "a": "x"}"#).unwrap();
        let yaml = encode(&value).unwrap();
        let z = yaml.find("z:").unwrap();
        let a = yaml.find("a: x").unwrap();
        assert!(z < a, "{}", yaml);
        assert!(yaml.contains("- true"));
        assert!(yaml.contains("- null"));
    }
}
