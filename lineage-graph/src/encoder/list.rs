//! Size/weights classification of operation list parameters.

use super::type_name;
use crate::errors::UnsupportedValueTypeError;
use serde_json::Value;

/// Which operation field a list parameter belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Every element is an integer.
    Size,
    /// Anything else.
    Weights,
}

/// A list parameter converted into the field it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedList {
    /// Integer elements for the `size` field.
    Size(Vec<i64>),
    /// Real elements for the `weights` field.
    Weights(Vec<f64>),
}

/// Splits operation list parameters by integer-ness.
///
/// Only used inside operations and samplers; generic stage parameters keep
/// lists as string lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListClassifier;

impl ListClassifier {
    /// Classifies a list. An empty list is vacuously `Size`.
    #[must_use]
    pub fn classify(items: &[Value]) -> ListKind {
        if items.iter().all(is_integer) {
            ListKind::Size
        } else {
            ListKind::Weights
        }
    }

    /// Classifies a list and converts its elements for the chosen field.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedValueTypeError` for `key` when an integer does not
    /// fit in 64 bits, or when a `weights` element is not numeric.
    pub fn collect(key: &str, items: &[Value]) -> Result<ClassifiedList, UnsupportedValueTypeError> {
        match Self::classify(items) {
            ListKind::Size => items
                .iter()
                .map(|item| {
                    item.as_i64()
                        .ok_or_else(|| UnsupportedValueTypeError::new(key, "integer out of range"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ClassifiedList::Size),
            ListKind::Weights => items
                .iter()
                .map(|item| match item {
                    Value::Number(n) => n
                        .as_f64()
                        .ok_or_else(|| UnsupportedValueTypeError::new(key, "number")),
                    other => Err(UnsupportedValueTypeError::new(
                        key,
                        format!("list element of type {}", type_name(other)),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(ClassifiedList::Weights),
        }
    }
}

// Booleans are not integers here, unlike in the description producer's
// own type system.
fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_i64() || n.is_u64())
}
