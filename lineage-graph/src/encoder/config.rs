//! Encoder configuration.

use crate::graph::NULL_SENTINEL;
use serde::{Deserialize, Serialize};

/// Default maximum node nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration for [`super::DatasetGraphEncoder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Maximum node depth. The root is at depth 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// String stored in place of null parameter values.
    #[serde(default = "default_null_sentinel")]
    pub null_sentinel: String,
    /// Whether null entries in an `operations` list are skipped.
    /// When false they are rejected.
    #[serde(default = "default_skip_null_operations")]
    pub skip_null_operations: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_null_sentinel() -> String {
    NULL_SENTINEL.to_string()
}

fn default_skip_null_operations() -> bool {
    true
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            null_sentinel: default_null_sentinel(),
            skip_null_operations: default_skip_null_operations(),
        }
    }
}

impl EncoderConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the null sentinel.
    #[must_use]
    pub fn with_null_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.null_sentinel = sentinel.into();
        self
    }

    /// Sets whether null operation entries are skipped.
    #[must_use]
    pub fn with_skip_null_operations(mut self, skip: bool) -> Self {
        self.skip_null_operations = skip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::new();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.null_sentinel, "None");
        assert!(config.skip_null_operations);
    }

    #[test]
    fn test_builder_setters() {
        let config = EncoderConfig::new()
            .with_max_depth(8)
            .with_null_sentinel("null")
            .with_skip_null_operations(false);

        assert_eq!(config.max_depth, 8);
        assert_eq!(config.null_sentinel, "null");
        assert!(!config.skip_null_operations);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: EncoderConfig = serde_json::from_str(r#"{"max_depth": 16}"#).unwrap();
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.null_sentinel, "None");
        assert!(config.skip_null_operations);
    }
}
