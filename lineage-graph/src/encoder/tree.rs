//! Recursive encoding of a whole pipeline description.

use super::{
    is_falsy, type_name, EncoderConfig, PipelineNodeBuilder, ValueDispatcher, CHILDREN_KEY,
    ROOT_KEY,
};
use crate::canonical::Canonicalizer;
use crate::errors::{DepthExceededError, InvalidStructureError, LineageError};
use crate::graph::DatasetGraph;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Encodes pipeline descriptions into [`DatasetGraph`] trees.
///
/// The encoder holds no per-call state; one instance can serve any number
/// of encode calls.
#[derive(Debug, Clone)]
pub struct DatasetGraphEncoder {
    config: EncoderConfig,
    dispatcher: ValueDispatcher,
}

impl Default for DatasetGraphEncoder {
    fn default() -> Self {
        Self::with_config(EncoderConfig::default())
    }
}

impl DatasetGraphEncoder {
    /// Creates an encoder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with a custom configuration.
    #[must_use]
    pub fn with_config(config: EncoderConfig) -> Self {
        let dispatcher = ValueDispatcher::new().with_null_sentinel(config.null_sentinel.clone());
        Self { config, dispatcher }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes a canonicalized pipeline description.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a map, if any parameter has an
    /// unsupported type, if a structural key is malformed, or if the
    /// description nests deeper than `max_depth`. No partial tree is
    /// returned.
    pub fn encode(&self, raw: &Value) -> Result<DatasetGraph, LineageError> {
        let root = raw
            .as_object()
            .ok_or_else(|| InvalidStructureError::new(ROOT_KEY, "a map", type_name(raw)))?;
        self.encode_map(root)
    }

    /// Encodes a pipeline description given as a map.
    ///
    /// # Errors
    ///
    /// See [`DatasetGraphEncoder::encode`].
    pub fn encode_map(&self, root: &Map<String, Value>) -> Result<DatasetGraph, LineageError> {
        self.encode_stage(root, 0).map_err(|err| {
            warn!(key = ?err.key(), error = %err, "Failed to encode dataset graph");
            err
        })
    }

    /// Parses a JSON document and encodes it.
    ///
    /// # Errors
    ///
    /// Returns `LineageError::Serialization` for malformed JSON, otherwise
    /// see [`DatasetGraphEncoder::encode`].
    pub fn encode_json(&self, text: &str) -> Result<DatasetGraph, LineageError> {
        let raw: Value = serde_json::from_str(text)?;
        self.encode(&raw)
    }

    /// Canonicalizes `source` with the given collaborator, then encodes it.
    ///
    /// # Errors
    ///
    /// Propagates canonicalization errors, otherwise see
    /// [`DatasetGraphEncoder::encode`].
    pub fn encode_with<C>(&self, canonicalizer: &C, source: &C::Source) -> Result<DatasetGraph, LineageError>
    where
        C: Canonicalizer + ?Sized,
    {
        let raw = canonicalizer.canonicalize(source)?;
        self.encode(&raw)
    }

    fn encode_stage(&self, stage: &Map<String, Value>, depth: usize) -> Result<DatasetGraph, LineageError> {
        if depth >= self.config.max_depth {
            return Err(DepthExceededError::new(depth, self.config.max_depth).into());
        }

        // Child subtrees are complete before the parent's own fields are built.
        let children = match stage.get(CHILDREN_KEY) {
            Some(value) if !is_falsy(value) => self.encode_children(value, depth)?,
            Some(_) => {
                debug!(depth, "Skipping empty children");
                Vec::new()
            }
            None => Vec::new(),
        };

        let node = PipelineNodeBuilder::new(&self.dispatcher)
            .with_skip_null_operations(self.config.skip_null_operations)
            .build(stage.iter().filter(|(key, _)| key.as_str() != CHILDREN_KEY))?;

        debug!(
            depth,
            children = children.len(),
            operations = node.operations.len(),
            parameters = node.parameter.len(),
            has_sampler = node.sampler.is_some(),
            "Encoded pipeline node"
        );

        Ok(DatasetGraph { children, ..node })
    }

    fn encode_children(&self, value: &Value, depth: usize) -> Result<Vec<DatasetGraph>, LineageError> {
        let Value::Array(entries) = value else {
            return Err(
                InvalidStructureError::new(CHILDREN_KEY, "a list of maps", type_name(value)).into(),
            );
        };

        entries
            .iter()
            .filter(|entry| !is_falsy(entry))
            .map(|entry| {
                let child = entry.as_object().ok_or_else(|| {
                    InvalidStructureError::new(CHILDREN_KEY, "a map", type_name(entry))
                })?;
                self.encode_stage(child, depth + 1)
            })
            .collect()
    }
}

/// Encodes a canonicalized description with the default configuration.
///
/// # Errors
///
/// See [`DatasetGraphEncoder::encode`].
pub fn encode(raw: &Value) -> Result<DatasetGraph, LineageError> {
    DatasetGraphEncoder::new().encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_empty_children() {
        let encoder = DatasetGraphEncoder::new();

        let graph = encoder.encode(&json!({"op": "Source"})).unwrap();
        assert!(graph.children.is_empty());

        let graph = encoder.encode(&json!({"op": "Source", "children": []})).unwrap();
        assert!(graph.children.is_empty());
        assert!(!graph.parameter.contains_key(CHILDREN_KEY));

        let graph = encoder.encode(&json!({"op": "Source", "children": null})).unwrap();
        assert!(graph.children.is_empty());
        assert!(!graph.parameter.contains_key(CHILDREN_KEY));
    }

    #[test]
    fn test_children_keep_list_order() {
        let graph = encode(&json!({
            "op": "Zip",
            "children": [{"op": "A"}, {}, null, {"op": "B"}, {"op": "C"}]
        }))
        .unwrap();

        let ops: Vec<&str> = graph
            .children
            .iter()
            .map(|child| child.parameter.map_str["op"].as_str())
            .collect();
        assert_eq!(ops, ["A", "B", "C"]);
    }

    #[test]
    fn test_root_must_be_map() {
        let err = encode(&json!(["op"])).unwrap_err();
        assert_eq!(err.key(), Some(ROOT_KEY));
    }

    #[test]
    fn test_children_must_be_list_of_maps() {
        let err = encode(&json!({"children": "Source"})).unwrap_err();
        assert_eq!(err.key(), Some(CHILDREN_KEY));

        let err = encode(&json!({"children": [1]})).unwrap_err();
        assert!(matches!(err, LineageError::InvalidStructure(_)));
    }

    #[test]
    fn test_depth_budget() {
        let encoder = DatasetGraphEncoder::with_config(EncoderConfig::new().with_max_depth(2));
        let two_levels = json!({"children": [{"op": "Source"}]});
        let three_levels = json!({"children": [{"children": [{"op": "Source"}]}]});

        assert!(encoder.encode(&two_levels).is_ok());
        let err = encoder.encode(&three_levels).unwrap_err();
        match err {
            LineageError::DepthExceeded(err) => {
                assert_eq!(err.depth, 2);
                assert_eq!(err.max_depth, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_in_child_aborts_encode() {
        let err = encode(&json!({
            "op": "Map",
            "children": [{"op": "Source", "cfg": {"x": 1}}]
        }))
        .unwrap_err();
        assert_eq!(err.key(), Some("cfg"));
    }

    #[test]
    fn test_encode_json() {
        let graph = DatasetGraphEncoder::new()
            .encode_json(r#"{"op": "Batch", "batch_size": 32, "drop_remainder": true}"#)
            .unwrap();
        assert_eq!(graph.parameter.map_int.get("batch_size"), Some(&32));
        assert_eq!(graph.parameter.map_bool.get("drop_remainder"), Some(&true));

        let err = DatasetGraphEncoder::new().encode_json("{").unwrap_err();
        assert!(matches!(err, LineageError::Serialization(_)));
    }

    #[test]
    fn test_custom_null_sentinel() {
        let encoder = DatasetGraphEncoder::with_config(EncoderConfig::new().with_null_sentinel(""));
        let graph = encoder.encode(&json!({"seed": null})).unwrap();
        assert_eq!(graph.parameter.map_str.get("seed"), Some(&String::new()));
    }
}
