//! Common error types for BPMNt.

use thiserror::Error;

/// Errors raised by graph queries and tailoring operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TailorError {
    /// Id lookup miss.
    #[error("Element not found: {id}")]
    ElementNotFound { id: String },

    /// Precondition violation (wrong node kind, missing argument, ...).
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Fragment boundary or gateway-pairing rule violated.
    #[error("Illegal fragment [{start}, {end}]: {reason}")]
    IllegalFragment {
        start: String,
        end: String,
        reason: String,
    },

    /// Contributed element id already exists in the document.
    #[error("Duplicate element: {id}")]
    DuplicateElement { id: String },

    /// Document failed structural validation after an edit.
    #[error("Schema validation failed: {}", violations.join("; "))]
    SchemaValidation { violations: Vec<String> },

    /// Internal consistency failure discovered while rewiring.
    #[error("Inconsistent graph: {message}")]
    Inconsistent { message: String },
}

impl TailorError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ElementNotFound { id: id.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn illegal_fragment(
        start: impl Into<String>,
        end: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::IllegalFragment {
            start: start.into(),
            end: end.into(),
            reason: reason.into(),
        }
    }

    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateElement { id: id.into() }
    }

    pub fn schema_validation(violations: Vec<String>) -> Self {
        Self::SchemaValidation { violations }
    }

    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent {
            message: message.into(),
        }
    }

    /// Whether the failure is a logic error rather than a caller mistake.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TailorError::Inconsistent { .. })
    }
}

/// Result type for graph and tailoring operations.
pub type TailorResult<T> = Result<T, TailorError>;
