//! # Lineage Graph
//!
//! Encodes dataset pipeline descriptions into a schema-shaped lineage tree.
//!
//! A pipeline description is a nested map: each stage holds its parameters,
//! an optional `children` list of upstream stages, an optional `operations`
//! list of enhancement operations and an optional `sampler`. The encoder
//! turns it into a [`graph::DatasetGraph`] with:
//!
//! - **Typed parameter blocks**: string, boolean, integer, double and
//!   string-list maps, filled by a fixed classification order
//! - **Operations and samplers**: scalar parameters plus integer `size` and
//!   real `weights` lists
//! - **Ordered children**: one child node per described upstream stage
//!
//! ## Quick Start
//!
//! ```rust
//! use lineage_graph::prelude::*;
//! use serde_json::json;
//!
//! let graph = DatasetGraphEncoder::new().encode(&json!({
//!     "op": "Map",
//!     "children": [{"op": "Source", "num_parallel_workers": 4}],
//!     "operations": [{"kernel_name": "Resize", "size": [224, 224]}]
//! }))?;
//!
//! assert_eq!(graph.children.len(), 1);
//! assert_eq!(graph.operations[0].size, vec![224, 224]);
//! # Ok::<(), LineageError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod canonical;
pub mod encoder;
pub mod errors;
pub mod graph;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::canonical::{Canonicalizer, FnCanonicalizer, SerdeCanonicalizer};
    pub use crate::encoder::{
        encode, ClassifiedList, DatasetGraphEncoder, EncoderConfig, ListClassifier, ListKind,
        OperationNodeBuilder, PipelineNodeBuilder, ValueDispatcher,
    };
    pub use crate::errors::{
        DepthExceededError, InvalidStructureError, LineageError, UnsupportedValueTypeError,
    };
    pub use crate::graph::{DatasetGraph, Operation, OperationParameter, ParameterValue};
}
