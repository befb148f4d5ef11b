//! Typed parameter block shared by pipeline nodes and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String stored in place of a null parameter value.
pub const NULL_SENTINEL: &str = "None";

/// A classified parameter value.
///
/// Exactly one variant is active, chosen by the dispatcher's fixed
/// classification order rather than by the value's content.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// A string value.
    Str(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Double(f64),
    /// A non-empty list, every element rendered as a string.
    StrList(Vec<String>),
    /// The null marker. Stored as a sentinel string.
    Null,
}

/// A repeated string value inside the string-list map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrList {
    /// The list elements.
    #[serde(rename = "strValue", default)]
    pub str_value: Vec<String>,
}

impl From<Vec<String>> for StrList {
    fn from(str_value: Vec<String>) -> Self {
        Self { str_value }
    }
}

/// Five independently keyed maps holding a node's parameters.
///
/// Maps are ordered so the serialized form is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationParameter {
    /// String parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub map_str: BTreeMap<String, String>,
    /// Boolean parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub map_bool: BTreeMap<String, bool>,
    /// Integer parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub map_int: BTreeMap<String, i64>,
    /// Floating point parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub map_double: BTreeMap<String, f64>,
    /// List parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub map_str_list: BTreeMap<String, StrList>,
}

impl OperationParameter {
    /// Creates an empty parameter block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a classified value into the map for its variant.
    ///
    /// `ParameterValue::Null` is stored as [`NULL_SENTINEL`] in the string map.
    pub fn insert(&mut self, key: impl Into<String>, value: ParameterValue) {
        self.insert_with_null_sentinel(key, value, NULL_SENTINEL);
    }

    /// Inserts a classified value, storing `ParameterValue::Null` as
    /// `null_sentinel` in the string map.
    pub fn insert_with_null_sentinel(
        &mut self,
        key: impl Into<String>,
        value: ParameterValue,
        null_sentinel: &str,
    ) {
        let key = key.into();
        match value {
            ParameterValue::Str(s) => {
                self.map_str.insert(key, s);
            }
            ParameterValue::Bool(b) => {
                self.map_bool.insert(key, b);
            }
            ParameterValue::Int(i) => {
                self.map_int.insert(key, i);
            }
            ParameterValue::Double(d) => {
                self.map_double.insert(key, d);
            }
            ParameterValue::StrList(items) => {
                self.map_str_list.insert(key, StrList::from(items));
            }
            ParameterValue::Null => {
                self.map_str.insert(key, null_sentinel.to_string());
            }
        }
    }

    /// Returns the string list stored under `key`.
    #[must_use]
    pub fn str_list(&self, key: &str) -> Option<&[String]> {
        self.map_str_list.get(key).map(|list| list.str_value.as_slice())
    }

    /// Returns true if any of the five maps holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map_str.contains_key(key)
            || self.map_bool.contains_key(key)
            || self.map_int.contains_key(key)
            || self.map_double.contains_key(key)
            || self.map_str_list.contains_key(key)
    }

    /// Returns the total number of entries across all maps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map_str.len()
            + self.map_bool.len()
            + self.map_int.len()
            + self.map_double.len()
            + self.map_str_list.len()
    }

    /// Returns true if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_routes_by_variant() {
        let mut params = OperationParameter::new();
        params.insert("op", ParameterValue::Str("Map".to_string()));
        params.insert("shuffle", ParameterValue::Bool(true));
        params.insert("workers", ParameterValue::Int(4));
        params.insert("ratio", ParameterValue::Double(0.5));
        params.insert("columns", ParameterValue::StrList(vec!["image".to_string()]));

        assert_eq!(params.map_str.get("op"), Some(&"Map".to_string()));
        assert_eq!(params.map_bool.get("shuffle"), Some(&true));
        assert_eq!(params.map_int.get("workers"), Some(&4));
        assert_eq!(params.map_double.get("ratio"), Some(&0.5));
        assert_eq!(params.str_list("columns"), Some(&["image".to_string()][..]));
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_null_stored_as_sentinel() {
        let mut params = OperationParameter::new();
        params.insert("seed", ParameterValue::Null);

        assert_eq!(params.map_str.get("seed").map(String::as_str), Some(NULL_SENTINEL));
    }

    #[test]
    fn test_null_with_custom_sentinel() {
        let mut params = OperationParameter::new();
        params.insert_with_null_sentinel("seed", ParameterValue::Null, "null");
        params.insert_with_null_sentinel("op", ParameterValue::Str("Map".to_string()), "null");

        assert_eq!(params.map_str.get("seed"), Some(&"null".to_string()));
        assert_eq!(params.map_str.get("op"), Some(&"Map".to_string()));
    }

    #[test]
    fn test_contains_key_checks_all_maps() {
        let mut params = OperationParameter::new();
        assert!(params.is_empty());

        params.insert("flag", ParameterValue::Bool(false));
        assert!(params.contains_key("flag"));
        assert!(!params.contains_key("other"));
    }

    #[test]
    fn test_serialized_field_names() {
        let mut params = OperationParameter::new();
        params.insert("columns", ParameterValue::StrList(vec!["a".to_string()]));
        params.insert("op", ParameterValue::Str("Map".to_string()));

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mapStr": {"op": "Map"},
                "mapStrList": {"columns": {"strValue": ["a"]}}
            })
        );
    }
}
