//! Journal error types.

use bpmnt_core::TailorError;
use thiserror::Error;

use crate::entry::Order;

/// Journal errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// Malformed log document or attribute value.
    #[error("invalid log format: {message}")]
    InvalidFormat { message: String },

    /// Required attribute absent from an extension element.
    #[error("missing attribute {attribute} on {element}")]
    MissingAttribute { element: String, attribute: String },

    /// Extension element name not recognized.
    #[error("unknown operation: {name}")]
    UnknownOperation { name: String },

    /// Records not strictly increasing, or the extend record misplaced.
    #[error("operation {order} out of order: {message}")]
    OutOfOrder { order: Order, message: String },

    /// Building the log document failed.
    #[error(transparent)]
    Graph(#[from] TailorError),
}

impl JournalError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    pub fn out_of_order(order: Order, message: impl Into<String>) -> Self {
        Self::OutOfOrder {
            order,
            message: message.into(),
        }
    }
}

/// Result type for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;
