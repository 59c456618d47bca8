//! Tailoring configuration.

use bpmnt_core::DEFAULT_STAMP_PREFIX;
use bpmnt_journal::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Default prefix of the tailored process id.
pub const DEFAULT_PROCESS_PREFIX: &str = "BPMNt";

/// Settings of a tailoring session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailoringConfig {
    /// The tailored process id is `<process_prefix>_<baseProcessId>`.
    pub process_prefix: String,
    /// Namespace of the log's extension elements.
    pub namespace: String,
    /// Run the structural validator after every edit.
    pub validate_edits: bool,
    /// Prefix used when stamping payload ids.
    pub stamp_prefix: String,
}

impl Default for TailoringConfig {
    fn default() -> Self {
        Self {
            process_prefix: DEFAULT_PROCESS_PREFIX.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            validate_edits: true,
            stamp_prefix: DEFAULT_STAMP_PREFIX.to_string(),
        }
    }
}

impl TailoringConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> SessionResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| SessionError::config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    pub fn with_process_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.process_prefix = prefix.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_edits = enabled;
        self
    }

    pub fn with_stamp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.stamp_prefix = prefix.into();
        self
    }

    /// Id of the process tailored from `base_process_id`.
    pub fn tailored_process_id(&self, base_process_id: &str) -> String {
        format!("{}_{}", self.process_prefix, base_process_id)
    }

    /// Reject settings no session can run with.
    pub fn check(&self) -> SessionResult<()> {
        if self.process_prefix.is_empty() {
            return Err(SessionError::config("process_prefix cannot be empty"));
        }
        if self.namespace.is_empty() {
            return Err(SessionError::config("namespace cannot be empty"));
        }
        if self.stamp_prefix.is_empty() {
            return Err(SessionError::config("stamp_prefix cannot be empty"));
        }
        Ok(())
    }
}
