//! Terraform State Values
//!
//! JSON-shaped representation of Terraform object values plus the attribute
//! helpers the handlers use to read plans and build state.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Dynamic value that can be read from a plan or written to state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DynamicValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<DynamicValue>),
    Map(HashMap<String, DynamicValue>),
}

impl DynamicValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, DynamicValue>> {
        match self {
            DynamicValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.as_map()?.get(key)
    }
}

impl Default for DynamicValue {
    fn default() -> Self {
        DynamicValue::Null
    }
}

impl From<serde_json::Value> for DynamicValue {
    fn from(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or(DynamicValue::Null)
    }
}

/// Helper to extract a string attribute from a DynamicValue
pub fn get_string_attr(value: &DynamicValue, key: &str) -> String {
    value.get(key)
        .and_then(|v| v.as_string())
        .unwrap_or("")
        .to_string()
}

/// Helper to extract an optional string attribute from a DynamicValue
pub fn get_optional_string_attr(value: &DynamicValue, key: &str) -> Option<String> {
    value.get(key)
        .and_then(|v| match v {
            DynamicValue::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
}

/// A string attribute that is explicitly set, even to the empty string
pub fn get_set_string_attr(value: &DynamicValue, key: &str) -> Option<String> {
    value.get(key)
        .and_then(|v| v.as_string())
        .map(str::to_string)
}

/// Create a DynamicValue map with the given attributes
pub fn make_state(attrs: Vec<(&str, DynamicValue)>) -> DynamicValue {
    let mut map = HashMap::new();
    for (key, value) in attrs {
        map.insert(key.to_string(), value);
    }
    DynamicValue::Map(map)
}

/// Create a string DynamicValue
pub fn string_value(s: impl Into<String>) -> DynamicValue {
    DynamicValue::String(s.into())
}

/// String value, or null when empty
pub fn optional_string_value(s: &str) -> DynamicValue {
    if s.is_empty() {
        DynamicValue::Null
    } else {
        DynamicValue::String(s.to_string())
    }
}

/// Create a null DynamicValue
pub fn null_value() -> DynamicValue {
    DynamicValue::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_helpers() {
        let value = DynamicValue::from(json!({
            "name": "prod",
            "description": "",
            "state": null
        }));

        assert_eq!(get_string_attr(&value, "name"), "prod");
        assert_eq!(get_string_attr(&value, "missing"), "");
        assert_eq!(get_optional_string_attr(&value, "description"), None);
        assert_eq!(get_set_string_attr(&value, "description"), Some(String::new()));
        assert_eq!(get_set_string_attr(&value, "state"), None);
    }

    #[test]
    fn test_make_state() {
        let state = make_state(vec![
            ("account_id", string_value("a1")),
            ("description", optional_string_value("")),
        ]);
        assert_eq!(get_string_attr(&state, "account_id"), "a1");
        assert!(state.get("description").unwrap().is_null());
        assert!(null_value().is_null());
    }

    #[test]
    fn test_json_round_trip_shape() {
        let state = make_state(vec![("name", string_value("prod"))]);
        assert_eq!(serde_json::to_value(&state).unwrap(), json!({"name": "prod"}));
    }
}
