//! Assertion types and builders for verifying step results.

use bpmnt_graph::{Model, ProcessGraph};
use bpmnt_session::EditOutcome;

use crate::error::{ScenarioError, ScenarioResult};

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Outcome assertions
    pub created: Option<usize>,
    pub removed: Option<usize>,
    pub created_ids: Vec<String>,
    pub removed_ids: Vec<String>,

    // Model assertions
    pub nodes: Option<usize>,
    pub present: Vec<String>,
    pub absent: Vec<String>,
    pub connected: Vec<(String, String)>,
    pub disconnected: Vec<(String, String)>,
    pub in_degree: Vec<(String, usize)>,
    pub out_degree: Vec<(String, usize)>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    #[allow(clippy::type_complexity)]
    pub custom: Option<Box<dyn Fn(&Model) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("created", &self.created)
            .field("removed", &self.removed)
            .field("nodes", &self.nodes)
            .field("connected", &self.connected)
            .field("disconnected", &self.disconnected)
            .field("error", &self.error)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step result and the model after it.
    pub fn verify(
        &self,
        step: &str,
        result: &Result<EditOutcome, String>,
        model: &Model,
    ) -> ScenarioResult<()> {
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(msg) if msg.contains(expected_error) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "expected error containing '{}', but step succeeded",
                        expected_error
                    ),
                )),
            };
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            return match result {
                Err(msg) if re.is_match(msg) => Ok(()),
                Err(msg) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', got: {}", pattern, msg),
                )),
                Ok(_) => Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected error matching '{}', but step succeeded", pattern),
                )),
            };
        }

        let outcome = result
            .as_ref()
            .map_err(|msg| ScenarioError::assertion_failed(step, format!("step failed: {}", msg)))?;

        self.verify_outcome(step, outcome)?;
        self.verify_model(step, model)?;

        if let Some(ref custom) = self.custom {
            if !custom(model) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    "custom assertion failed",
                ));
            }
        }
        Ok(())
    }

    fn verify_outcome(&self, step: &str, outcome: &EditOutcome) -> ScenarioResult<()> {
        check_count(step, "created", self.created, outcome.created.len())?;
        check_count(step, "removed", self.removed, outcome.removed.len())?;
        for id in &self.created_ids {
            if !outcome.was_created(id) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} to be created, created: {:?}", id, outcome.created),
                ));
            }
        }
        for id in &self.removed_ids {
            if !outcome.was_removed(id) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} to be removed, removed: {:?}", id, outcome.removed),
                ));
            }
        }
        Ok(())
    }

    fn verify_model(&self, step: &str, model: &Model) -> ScenarioResult<()> {
        check_count(step, "nodes", self.nodes, model.node_count())?;

        for id in &self.present {
            if !model.contains_id(id) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} to exist", id),
                ));
            }
        }
        for id in &self.absent {
            if model.contains_id(id) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} to be gone", id),
                ));
            }
        }
        for (source, target) in &self.connected {
            if !scope(step, model, source)?.is_connected(source, target) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected a flow {} -> {}", source, target),
                ));
            }
        }
        for (source, target) in &self.disconnected {
            if model
                .scope_of(source)
                .is_some_and(|scope| scope.is_connected(source, target))
            {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected no flow {} -> {}", source, target),
                ));
            }
        }
        for (id, expected) in &self.in_degree {
            let actual = scope(step, model, id)?.in_degree(id);
            check_count(step, &format!("in-degree of {}", id), Some(*expected), actual)?;
        }
        for (id, expected) in &self.out_degree {
            let actual = scope(step, model, id)?.out_degree(id);
            check_count(step, &format!("out-degree of {}", id), Some(*expected), actual)?;
        }
        Ok(())
    }

    // ==================== Builders ====================

    /// Expect a number of created elements (nodes and flows).
    pub fn created(mut self, count: usize) -> Self {
        self.created = Some(count);
        self
    }

    /// Expect a number of removed elements (nodes and flows).
    pub fn removed(mut self, count: usize) -> Self {
        self.removed = Some(count);
        self
    }

    pub fn created_id(mut self, id: &str) -> Self {
        self.created_ids.push(id.to_string());
        self
    }

    pub fn removed_id(mut self, id: &str) -> Self {
        self.removed_ids.push(id.to_string());
        self
    }

    /// Expect the document to hold this many flow nodes, nested ones included.
    pub fn nodes(mut self, count: usize) -> Self {
        self.nodes = Some(count);
        self
    }

    pub fn present(mut self, id: &str) -> Self {
        self.present.push(id.to_string());
        self
    }

    pub fn absent(mut self, id: &str) -> Self {
        self.absent.push(id.to_string());
        self
    }

    /// Expect a direct flow `source -> target`.
    pub fn connected(mut self, source: &str, target: &str) -> Self {
        self.connected.push((source.to_string(), target.to_string()));
        self
    }

    /// Expect a chain of direct flows.
    pub fn path(mut self, ids: &[&str]) -> Self {
        for pair in ids.windows(2) {
            self = self.connected(pair[0], pair[1]);
        }
        self
    }

    pub fn disconnected(mut self, source: &str, target: &str) -> Self {
        self.disconnected
            .push((source.to_string(), target.to_string()));
        self
    }

    pub fn in_degree(mut self, id: &str, count: usize) -> Self {
        self.in_degree.push((id.to_string(), count));
        self
    }

    pub fn out_degree(mut self, id: &str, count: usize) -> Self {
        self.out_degree.push((id.to_string(), count));
        self
    }

    /// Expect the step to fail with a message containing `text`.
    pub fn error(mut self, text: &str) -> Self {
        self.error = Some(text.to_string());
        self
    }

    /// Expect the step to fail with a message matching `pattern`.
    pub fn error_matching(mut self, pattern: &str) -> Self {
        self.error_pattern = Some(pattern.to_string());
        self
    }

    pub fn check<F>(mut self, f: F) -> Self
    where
        F: Fn(&Model) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Box::new(f));
        self
    }
}

fn check_count(
    step: &str,
    what: &str,
    expected: Option<usize>,
    actual: usize,
) -> ScenarioResult<()> {
    match expected {
        Some(expected) if expected != actual => Err(ScenarioError::assertion_failed(
            step,
            format!("expected {} {}, got {}", expected, what, actual),
        )),
        _ => Ok(()),
    }
}

fn scope<'m>(step: &str, model: &'m Model, id: &str) -> ScenarioResult<&'m ProcessGraph> {
    model
        .scope_of(id)
        .ok_or_else(|| ScenarioError::assertion_failed(step, format!("{} not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_expected_error_matches() {
        let assertion = Assertion::new().error("Element not found");
        let result = Err("Element not found: X".to_string());
        assert!(assertion.verify("s", &result, &fixtures::linear()).is_ok());
    }

    #[test]
    fn test_path_checks_every_flow() {
        let model = fixtures::linear();
        let ok = Assertion::new().path(&["Start", "A", "B", "End"]);
        let broken = Assertion::new().path(&["Start", "B"]);

        assert!(ok.verify("s", &Ok(EditOutcome::default()), &model).is_ok());
        assert!(broken.verify("s", &Ok(EditOutcome::default()), &model).is_err());
    }

    #[test]
    fn test_unexpected_success_fails() {
        let assertion = Assertion::new().error_matching("^Invalid");
        let result = assertion.verify("s", &Ok(EditOutcome::default()), &fixtures::linear());
        assert!(matches!(result, Err(ScenarioError::AssertionFailed { .. })));
    }
}
