//! Structural validation of a document.
//!
//! Runs after edits to catch shapes a BPMN schema check would refuse, plus
//! the gateway rules the bookkeeper is expected to maintain.

use std::collections::HashSet;
use std::fmt;

use bpmnt_core::{GatewayShape, TailorError, TailorResult};

use crate::{Model, ProcessGraph};

/// A structural rule broken by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule that was broken.
    pub rule: &'static str,
    /// Scope the violation was found in.
    pub scope: String,
    /// Element involved, if any.
    pub element_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    pub fn new(rule: &'static str, scope: &str, message: impl Into<String>) -> Self {
        Self {
            rule,
            scope: scope.to_string(),
            element_id: None,
            message: message.into(),
        }
    }

    /// Add the element id to the violation context.
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element_id {
            Some(id) => write!(f, "[{}] {} ({}): {}", self.rule, self.scope, id, self.message),
            None => write!(f, "[{}] {}: {}", self.rule, self.scope, self.message),
        }
    }
}

/// Collect every structural violation in the document.
pub fn validate_model(model: &Model) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for process in model.processes() {
        if !seen.insert(process.id().to_string()) {
            violations.push(
                Violation::new("unique-id", process.id(), "duplicate process id")
                    .with_element(process.id()),
            );
        }
        validate_scope(process, &mut seen, &mut violations);
    }
    violations
}

/// Validate the document, failing with `SchemaValidation` on any violation.
pub fn check_model(model: &Model) -> TailorResult<()> {
    let violations = validate_model(model);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(TailorError::schema_validation(
            violations.iter().map(Violation::to_string).collect(),
        ))
    }
}

fn validate_scope(scope: &ProcessGraph, seen: &mut HashSet<String>, out: &mut Vec<Violation>) {
    let id = scope.id();

    let starts = scope.start_events().len();
    if starts != 1 {
        out.push(Violation::new(
            "start-event",
            id,
            format!("expected exactly one start event, found {}", starts),
        ));
    }
    let ends = scope.end_events().len();
    if ends != 1 {
        out.push(Violation::new(
            "end-event",
            id,
            format!("expected exactly one end event, found {}", ends),
        ));
    }

    for node in scope.nodes() {
        let node_id = node.id.as_str();
        if !seen.insert(node_id.to_string()) {
            out.push(Violation::new("unique-id", id, "duplicate id").with_element(node_id));
        }
        if node.kind.is_start_event() && scope.in_degree(node_id) > 0 {
            out.push(
                Violation::new("start-event", id, "start event has incoming flows")
                    .with_element(node_id),
            );
        }
        if node.kind.is_end_event() && scope.out_degree(node_id) > 0 {
            out.push(
                Violation::new("end-event", id, "end event has outgoing flows")
                    .with_element(node_id),
            );
        }
        if scope.gateway_shape(node_id) == Some(GatewayShape::Degenerate) {
            out.push(
                Violation::new(
                    "gateway",
                    id,
                    format!(
                        "gateway neither diverges nor converges (in {}, out {})",
                        scope.in_degree(node_id),
                        scope.out_degree(node_id)
                    ),
                )
                .with_element(node_id),
            );
        }
        if let Some(body) = node.kind.body() {
            validate_scope(body, seen, out);
        }
    }

    for flow in scope.flows() {
        if !seen.insert(flow.id.to_string()) {
            out.push(
                Violation::new("unique-id", id, "duplicate id").with_element(flow.id.as_str()),
            );
        }
        for endpoint in [&flow.source, &flow.target] {
            if !scope.belongs_to(endpoint.as_str()) {
                out.push(
                    Violation::new(
                        "flow-endpoint",
                        id,
                        format!("endpoint {} is not part of the scope", endpoint),
                    )
                    .with_element(flow.id.as_str()),
                );
            }
        }
    }
}
