//! Classification of single parameter values into typed slots.

use super::{type_name, OPERATIONS_KEY};
use crate::errors::UnsupportedValueTypeError;
use crate::graph::{OperationParameter, ParameterValue, NULL_SENTINEL};
use serde_json::{Number, Value};

/// Routes a dynamically typed value into one of the parameter block's maps.
///
/// Classification order is fixed: string, boolean, integer, double, list,
/// null, then failure. The boolean rule must stay ahead of the integer
/// rule: `true`/`false` never end up in the integer map, even though the
/// description producer's own type system treats booleans as integers.
#[derive(Debug, Clone)]
pub struct ValueDispatcher {
    null_sentinel: String,
}

impl Default for ValueDispatcher {
    fn default() -> Self {
        Self {
            null_sentinel: NULL_SENTINEL.to_string(),
        }
    }
}

impl ValueDispatcher {
    /// Creates a dispatcher storing nulls as `"None"`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the string stored for null values.
    #[must_use]
    pub fn with_null_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.null_sentinel = sentinel.into();
        self
    }

    /// Classifies `value` without storing it.
    ///
    /// Returns `Ok(None)` for an empty list, which produces no entry.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedValueTypeError` for nested maps, lists under the
    /// `operations` key and integers outside the signed 64-bit range.
    pub fn classify(
        &self,
        key: &str,
        value: &Value,
    ) -> Result<Option<ParameterValue>, UnsupportedValueTypeError> {
        let classified = match value {
            Value::String(s) => ParameterValue::Str(s.clone()),
            Value::Bool(b) => ParameterValue::Bool(*b),
            Value::Number(n) => classify_number(key, n)?,
            Value::Array(items) if key != OPERATIONS_KEY => {
                if items.is_empty() {
                    return Ok(None);
                }
                ParameterValue::StrList(items.iter().map(list_element_to_string).collect())
            }
            Value::Null => ParameterValue::Null,
            other => return Err(UnsupportedValueTypeError::new(key, type_name(other))),
        };
        Ok(Some(classified))
    }

    /// Classifies `value` and writes it into `params` under `key`.
    ///
    /// # Errors
    ///
    /// See [`ValueDispatcher::classify`]. Nothing is written on failure.
    pub fn dispatch(
        &self,
        params: &mut OperationParameter,
        key: &str,
        value: &Value,
    ) -> Result<(), UnsupportedValueTypeError> {
        if let Some(classified) = self.classify(key, value)? {
            params.insert_with_null_sentinel(key, classified, &self.null_sentinel);
        }
        Ok(())
    }
}

fn classify_number(key: &str, n: &Number) -> Result<ParameterValue, UnsupportedValueTypeError> {
    if let Some(i) = n.as_i64() {
        return Ok(ParameterValue::Int(i));
    }
    if n.is_u64() {
        return Err(UnsupportedValueTypeError::new(key, "integer out of range"));
    }
    n.as_f64()
        .map(ParameterValue::Double)
        .ok_or_else(|| UnsupportedValueTypeError::new(key, "number"))
}

/// Renders one element of a generic list parameter.
fn list_element_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        // nested containers keep their compact JSON form
        other => other.to_string(),
    }
}
