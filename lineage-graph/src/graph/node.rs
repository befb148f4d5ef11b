//! Encoded pipeline nodes and enhancement operations.

use super::OperationParameter;
use crate::errors::LineageError;
use serde::{Deserialize, Serialize};

/// One enhancement operation: an `operations` entry or a sampler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Scalar parameters of the operation.
    #[serde(default, skip_serializing_if = "OperationParameter::is_empty")]
    pub operation_param: OperationParameter,
    /// Elements of all-integer list parameters, in key order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<i64>,
    /// Elements of every other list parameter, in key order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
}

impl Operation {
    /// Creates an empty operation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// One encoded pipeline stage and its subtree.
///
/// The root node is the full output of one encode call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetGraph {
    /// Child stages, in the order they were described.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DatasetGraph>,
    /// The stage's own parameters. Never holds structural keys.
    #[serde(default, skip_serializing_if = "OperationParameter::is_empty")]
    pub parameter: OperationParameter,
    /// Enhancement operations applied by this stage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,
    /// Sampling strategy of this stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler: Option<Operation>,
}

impl DatasetGraph {
    /// Creates an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in this subtree, including itself.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Returns the number of levels in this subtree. A leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Serializes the tree to compact JSON.
    pub fn to_json(&self) -> Result<String, LineageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the tree to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, LineageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
