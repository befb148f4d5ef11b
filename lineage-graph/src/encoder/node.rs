//! Encoding of a single pipeline stage's own fields.

use super::{is_falsy, type_name, OperationNodeBuilder, ValueDispatcher, OPERATIONS_KEY, SAMPLER_KEY};
use crate::errors::{InvalidStructureError, LineageError};
use crate::graph::{DatasetGraph, Operation};
use serde_json::{Map, Value};
use tracing::debug;

/// Builds a stage node's parameters, operations and sampler.
///
/// Children are not handled here; the tree encoder attaches them.
#[derive(Debug, Clone, Copy)]
pub struct PipelineNodeBuilder<'a> {
    dispatcher: &'a ValueDispatcher,
    skip_null_operations: bool,
}

impl<'a> PipelineNodeBuilder<'a> {
    /// Creates a builder that skips null `operations` entries.
    #[must_use]
    pub fn new(dispatcher: &'a ValueDispatcher) -> Self {
        Self {
            dispatcher,
            skip_null_operations: true,
        }
    }

    /// Sets whether null `operations` entries are skipped or rejected.
    #[must_use]
    pub fn with_skip_null_operations(mut self, skip: bool) -> Self {
        self.skip_null_operations = skip;
        self
    }

    /// Encodes the given key/value pairs into a childless node.
    ///
    /// `operations` and `sampler` are extracted into their own fields and
    /// never reach the parameter block; falsy values under them are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter has an unsupported type or a
    /// structural key has the wrong shape. No partial node is returned.
    pub fn build<'v, I>(&self, entries: I) -> Result<DatasetGraph, LineageError>
    where
        I: IntoIterator<Item = (&'v String, &'v Value)>,
    {
        let mut node = DatasetGraph::new();
        let operation_builder = OperationNodeBuilder::new(self.dispatcher);

        for (key, value) in entries {
            match key.as_str() {
                OPERATIONS_KEY | SAMPLER_KEY if is_falsy(value) => {
                    debug!(key = %key, "Skipping empty structural value");
                }
                OPERATIONS_KEY => {
                    let operations = self.build_operations(&operation_builder, value)?;
                    node.operations.extend(operations);
                }
                SAMPLER_KEY => {
                    let description = expect_map(SAMPLER_KEY, value)?;
                    node.sampler = Some(operation_builder.build(description)?);
                }
                _ => self.dispatcher.dispatch(&mut node.parameter, key, value)?,
            }
        }

        Ok(node)
    }

    fn build_operations(
        &self,
        operation_builder: &OperationNodeBuilder<'_>,
        value: &Value,
    ) -> Result<Vec<Operation>, LineageError> {
        let Value::Array(entries) = value else {
            return Err(InvalidStructureError::new(
                OPERATIONS_KEY,
                "a list of maps",
                type_name(value),
            )
            .into());
        };

        let mut operations = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.is_null() && self.skip_null_operations {
                continue;
            }
            let description = expect_map(OPERATIONS_KEY, entry)?;
            operations.push(operation_builder.build(description)?);
        }
        Ok(operations)
    }
}

fn expect_map<'v>(key: &str, value: &'v Value) -> Result<&'v Map<String, Value>, InvalidStructureError> {
    value
        .as_object()
        .ok_or_else(|| InvalidStructureError::new(key, "a map", type_name(value)))
}
