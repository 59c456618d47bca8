//! BPMNt Journal
//!
//! Operation log of a tailoring session.
//!
//! Responsibilities:
//! - Record every successful edit with its execution order
//! - Convert the log to a BPMN document carrying extension elements
//! - Read a log back from such a document

mod entry;
mod error;
mod extension;
mod journal;

pub use entry::{Order, OperationRecord, TailoringOperation};
pub use error::{JournalError, JournalResult};
pub use extension::{log_to_model, model_to_log, DEFAULT_NAMESPACE};
pub use journal::OperationLog;
