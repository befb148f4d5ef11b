//! Error types for the lineage graph encoder.
//!
//! Encoding is deterministic and pure, so every error here describes an input
//! shape the encoder cannot represent. None of them are retryable.

use std::collections::HashMap;
use thiserror::Error;

/// The main error type for lineage graph operations.
#[derive(Debug, Clone, Error)]
pub enum LineageError {
    /// A parameter value has a type the parameter block cannot hold.
    #[error("{0}")]
    UnsupportedValueType(#[from] UnsupportedValueTypeError),

    /// A structural key (`children`, `operations`, `sampler`) has the wrong shape.
    #[error("{0}")]
    InvalidStructure(#[from] InvalidStructureError),

    /// The description nests deeper than the configured budget.
    #[error("{0}")]
    DepthExceeded(#[from] DepthExceededError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LineageError {
    /// Returns the offending key, when the error is tied to one.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnsupportedValueType(err) => Some(&err.key),
            Self::InvalidStructure(err) => Some(&err.key),
            Self::DepthExceeded(_) | Self::Serialization(_) => None,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::UnsupportedValueType(err) => {
                map.insert("type".to_string(), serde_json::json!("UnsupportedValueType"));
                map.insert("key".to_string(), serde_json::json!(err.key));
                map.insert("found".to_string(), serde_json::json!(err.found));
            }
            Self::InvalidStructure(err) => {
                map.insert("type".to_string(), serde_json::json!("InvalidStructure"));
                map.insert("key".to_string(), serde_json::json!(err.key));
                map.insert("expected".to_string(), serde_json::json!(err.expected));
                map.insert("found".to_string(), serde_json::json!(err.found));
            }
            Self::DepthExceeded(err) => {
                map.insert("type".to_string(), serde_json::json!("DepthExceeded"));
                map.insert("depth".to_string(), serde_json::json!(err.depth));
                map.insert("max_depth".to_string(), serde_json::json!(err.max_depth));
            }
            Self::Serialization(_) => {
                map.insert("type".to_string(), serde_json::json!("Serialization"));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

impl From<serde_json::Error> for LineageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error raised when a parameter value matches none of the dispatch rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parameter {key} is not supported in event package: unsupported value type '{found}'")]
pub struct UnsupportedValueTypeError {
    /// The parameter key holding the value.
    pub key: String,
    /// The dynamic type that was found.
    pub found: String,
}

impl UnsupportedValueTypeError {
    /// Creates a new unsupported value type error.
    #[must_use]
    pub fn new(key: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            found: found.into(),
        }
    }
}

/// Error raised when a structural key holds an unexpected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid structure under '{key}': expected {expected}, found {found}")]
pub struct InvalidStructureError {
    /// The structural key (or `<root>`).
    pub key: String,
    /// What the encoder expected there.
    pub expected: String,
    /// What it found instead.
    pub found: String,
}

impl InvalidStructureError {
    /// Creates a new invalid structure error.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Error raised when the pipeline nests deeper than allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Maximum pipeline depth ({max_depth}) exceeded at depth {depth}")]
pub struct DepthExceededError {
    /// The depth of the node that was rejected.
    pub depth: usize,
    /// The configured maximum.
    pub max_depth: usize,
}

impl DepthExceededError {
    /// Creates a new depth exceeded error.
    #[must_use]
    pub fn new(depth: usize, max_depth: usize) -> Self {
        Self { depth, max_depth }
    }
}
