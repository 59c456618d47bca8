//! Node kind tags.
//!
//! Task and gateway variants are plain tags. The owning node enum in
//! `bpmnt-graph` carries the payload for sub-processes.

use std::fmt;

/// Task variants recognized by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Task,
    User,
    Service,
    Script,
    Manual,
    Send,
    Receive,
    BusinessRule,
}

impl TaskKind {
    /// BPMN element name of this task variant.
    pub fn element_name(&self) -> &'static str {
        match self {
            TaskKind::Task => "task",
            TaskKind::User => "userTask",
            TaskKind::Service => "serviceTask",
            TaskKind::Script => "scriptTask",
            TaskKind::Manual => "manualTask",
            TaskKind::Send => "sendTask",
            TaskKind::Receive => "receiveTask",
            TaskKind::BusinessRule => "businessRuleTask",
        }
    }

    /// Parse a BPMN element name.
    pub fn from_element_name(name: &str) -> Option<Self> {
        Some(match name {
            "task" => TaskKind::Task,
            "userTask" => TaskKind::User,
            "serviceTask" => TaskKind::Service,
            "scriptTask" => TaskKind::Script,
            "manualTask" => TaskKind::Manual,
            "sendTask" => TaskKind::Send,
            "receiveTask" => TaskKind::Receive,
            "businessRuleTask" => TaskKind::BusinessRule,
            _ => return None,
        })
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Gateway variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayKind {
    Exclusive,
    Parallel,
    EventBased,
    Inclusive,
    Complex,
}

impl GatewayKind {
    /// BPMN element name of this gateway variant.
    pub fn element_name(&self) -> &'static str {
        match self {
            GatewayKind::Exclusive => "exclusiveGateway",
            GatewayKind::Parallel => "parallelGateway",
            GatewayKind::EventBased => "eventBasedGateway",
            GatewayKind::Inclusive => "inclusiveGateway",
            GatewayKind::Complex => "complexGateway",
        }
    }

    /// Parse a BPMN element name.
    pub fn from_element_name(name: &str) -> Option<Self> {
        Some(match name {
            "exclusiveGateway" => GatewayKind::Exclusive,
            "parallelGateway" => GatewayKind::Parallel,
            "eventBasedGateway" => GatewayKind::EventBased,
            "inclusiveGateway" => GatewayKind::Inclusive,
            "complexGateway" => GatewayKind::Complex,
            _ => return None,
        })
    }
}

impl fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Shape of a gateway, derived from its degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayShape {
    /// One incoming, several outgoing flows.
    Divergent,
    /// Several incoming, one outgoing flow.
    Convergent,
    /// Several incoming and several outgoing flows.
    Mixed,
    /// At most one incoming and at most one outgoing flow.
    Degenerate,
}

impl GatewayShape {
    /// Classify by in/out degree.
    pub fn classify(in_degree: usize, out_degree: usize) -> Self {
        match (in_degree > 1, out_degree > 1) {
            (false, true) if in_degree == 1 => GatewayShape::Divergent,
            (true, false) if out_degree == 1 => GatewayShape::Convergent,
            (true, true) => GatewayShape::Mixed,
            _ => GatewayShape::Degenerate,
        }
    }
}
