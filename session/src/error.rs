//! Session error types.

use bpmnt_core::TailorError;
use bpmnt_journal::JournalError;
use thiserror::Error;

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Edit failed.
    #[error(transparent)]
    Tailor(#[from] TailorError),

    /// Log handling failed.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// The document holds no process.
    #[error("document {model_id} has no process to tailor")]
    NoProcess { model_id: String },

    /// The model is not the tailored process of the log.
    #[error("process {found} is not the tailored process {expected}")]
    NotExtended { expected: String, found: String },

    /// Replay against a different base process.
    #[error("log was recorded against {expected}, base process is {found}")]
    BaseMismatch { expected: String, found: String },

    /// Bad configuration.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl SessionError {
    pub fn no_process(model_id: impl Into<String>) -> Self {
        Self::NoProcess {
            model_id: model_id.into(),
        }
    }

    pub fn not_extended(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::NotExtended {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn base_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::BaseMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
