//! Schema-shaped output model.
//!
//! These types mirror the lineage message schema: every node carries its
//! children, a five-map parameter block, repeated operations and an optional
//! sampler. Field names serialize to the schema's spelling.

mod node;
mod parameter;

pub use node::{DatasetGraph, Operation};
pub use parameter::{OperationParameter, ParameterValue, StrList, NULL_SENTINEL};
