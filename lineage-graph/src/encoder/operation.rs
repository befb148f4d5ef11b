//! Encoding of enhancement operations and samplers.

use super::{ClassifiedList, ListClassifier, ValueDispatcher};
use crate::errors::UnsupportedValueTypeError;
use crate::graph::Operation;
use serde_json::{Map, Value};

/// Builds one [`Operation`] from an operation description.
#[derive(Debug, Clone, Copy)]
pub struct OperationNodeBuilder<'a> {
    dispatcher: &'a ValueDispatcher,
}

impl<'a> OperationNodeBuilder<'a> {
    /// Creates a builder using `dispatcher` for scalar parameters.
    #[must_use]
    pub fn new(dispatcher: &'a ValueDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Encodes an operation.
    ///
    /// List values are appended to `size` or `weights` depending on whether
    /// they hold only integers; everything else goes through the dispatcher
    /// into `operation_param`.
    ///
    /// # Errors
    ///
    /// Returns the first `UnsupportedValueTypeError` hit. The partially built
    /// operation is dropped.
    pub fn build(&self, description: &Map<String, Value>) -> Result<Operation, UnsupportedValueTypeError> {
        let mut operation = Operation::new();

        for (key, value) in description {
            match value {
                Value::Array(items) => match ListClassifier::collect(key, items)? {
                    ClassifiedList::Size(values) => operation.size.extend(values),
                    ClassifiedList::Weights(values) => operation.weights.extend(values),
                },
                _ => self
                    .dispatcher
                    .dispatch(&mut operation.operation_param, key, value)?,
            }
        }

        Ok(operation)
    }
}
