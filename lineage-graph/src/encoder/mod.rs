//! Pipeline description encoding.
//!
//! This module provides:
//! - Value dispatch into the typed parameter block
//! - Size/weights classification of operation lists
//! - Operation and stage node builders
//! - The recursive tree encoder and its configuration

mod config;
mod dispatch;
mod list;
mod node;
mod operation;
mod tree;

pub use config::{EncoderConfig, DEFAULT_MAX_DEPTH};
pub use dispatch::ValueDispatcher;
pub use list::{ClassifiedList, ListClassifier, ListKind};
pub use node::PipelineNodeBuilder;
pub use operation::OperationNodeBuilder;
pub use tree::{encode, DatasetGraphEncoder};

use serde_json::Value;

/// Key holding a stage's child stages.
pub const CHILDREN_KEY: &str = "children";

/// Key holding a stage's enhancement operations.
pub const OPERATIONS_KEY: &str = "operations";

/// Key holding a stage's sampler.
pub const SAMPLER_KEY: &str = "sampler";

/// Name used in errors about the root value itself.
pub const ROOT_KEY: &str = "<root>";

/// Falsy values count as absent for structural keys.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Short name of a value's dynamic type, for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
