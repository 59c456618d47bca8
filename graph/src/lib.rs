//! BPMNt Graph Model
//!
//! This crate provides the in-memory BPMN process model:
//! - Flow nodes, sequence flows and extension elements
//! - Process graphs (one per process or sub-process scope)
//! - The document model holding top-level processes
//! - Fragment mapping and fragment validation
//! - Structural validation of a whole document
//! - A fluent builder for constructing graphs

mod builder;
mod fragment;
mod graph;
mod model;
mod node;
mod payload;
mod validation;

pub use builder::ProcessBuilder;
pub use fragment::{map_fragment, validate_delete_fragment, Fragment};
pub use graph::ProcessGraph;
pub use model::Model;
pub use node::{ExtensionElement, FlowNode, NodeKind, SequenceFlow};
pub use payload::{relabel, ForeignFragment, Payload};
pub use validation::{check_model, validate_model, Violation};
