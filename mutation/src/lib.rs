//! BPMNt Mutation
//!
//! Execute tailoring edits on a BPMN document.
//!
//! Responsibilities:
//! - Validate edit preconditions before touching the graph
//! - Rewire sequence flows around removed, moved and inserted elements
//! - Create and collapse gateways as a side effect of those edits
//! - Derive generated ids from the execution order
//!
//! # Module Structure
//!
//! - `executor` - Main TailoringExecutor that coordinates operations
//! - `ops/` - Individual edit implementations
//! - `rewire` - Low-level flow rewiring primitives
//! - `gateway` - Gateway creation and collapsing
//! - `ids` - Deterministic id allocation
//! - `result` - Outcome of an edit

mod executor;
mod gateway;
mod ids;
mod ops;
mod result;
mod rewire;

pub use executor::TailoringExecutor;
pub use ids::ElementIds;
pub use result::EditOutcome;
