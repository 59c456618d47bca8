//! BPMNt Session
//!
//! Public tailoring facade.
//!
//! Responsibilities:
//! - Extend a base process into a tailored copy
//! - Apply edits atomically and record them in the operation log
//! - Convert the log to and from its document form
//! - Replay a log against a base model

mod config;
mod error;
mod node_ref;
mod replay;
mod session;

pub use config::{TailoringConfig, DEFAULT_PROCESS_PREFIX};
pub use error::{SessionError, SessionResult};
pub use node_ref::NodeRef;
pub use replay::{replay, replay_document};
pub use session::Tailoring;

pub use bpmnt_journal::{OperationLog, OperationRecord, TailoringOperation};
pub use bpmnt_mutation::EditOutcome;
