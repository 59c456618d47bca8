//! BPMNt Core Types
//!
//! This crate provides the foundational types used throughout BPMNt:
//! - Identity types (NodeId, FlowId)
//! - Node kind tags (TaskKind, GatewayKind)
//! - Timestamp-based id stamping (IdStamper)
//! - Common error types

mod error;
mod id;
mod kind;
pub mod messages;
mod stamp;

pub use error::*;
pub use id::*;
pub use kind::*;
pub use stamp::*;
