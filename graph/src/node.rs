//! Flow nodes, sequence flows and extension elements.

use bpmnt_core::{FlowId, GatewayKind, NodeId, TaskKind};
use indexmap::IndexMap;

use crate::ProcessGraph;

/// Kind of a flow node.
///
/// A sub-process owns its nested scope.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    StartEvent,
    EndEvent,
    Task(TaskKind),
    Gateway(GatewayKind),
    SubProcess(Box<ProcessGraph>),
}

impl NodeKind {
    /// BPMN element name of this kind.
    pub fn element_name(&self) -> &'static str {
        match self {
            NodeKind::StartEvent => "startEvent",
            NodeKind::EndEvent => "endEvent",
            NodeKind::Task(kind) => kind.element_name(),
            NodeKind::Gateway(kind) => kind.element_name(),
            NodeKind::SubProcess(_) => "subProcess",
        }
    }

    pub fn is_start_event(&self) -> bool {
        matches!(self, NodeKind::StartEvent)
    }

    pub fn is_end_event(&self) -> bool {
        matches!(self, NodeKind::EndEvent)
    }

    /// Start or end event.
    pub fn is_boundary_event(&self) -> bool {
        matches!(self, NodeKind::StartEvent | NodeKind::EndEvent)
    }

    pub fn is_task(&self) -> bool {
        matches!(self, NodeKind::Task(_))
    }

    pub fn is_gateway(&self) -> bool {
        matches!(self, NodeKind::Gateway(_))
    }

    pub fn is_sub_process(&self) -> bool {
        matches!(self, NodeKind::SubProcess(_))
    }

    /// Gateway variant, if this is a gateway.
    pub fn gateway_kind(&self) -> Option<GatewayKind> {
        match self {
            NodeKind::Gateway(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Nested scope, if this is a sub-process.
    pub fn body(&self) -> Option<&ProcessGraph> {
        match self {
            NodeKind::SubProcess(body) => Some(body),
            _ => None,
        }
    }

    /// Mutable nested scope, if this is a sub-process.
    pub fn body_mut(&mut self) -> Option<&mut ProcessGraph> {
        match self {
            NodeKind::SubProcess(body) => Some(body),
            _ => None,
        }
    }
}

/// A flow node in a process scope.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    /// Document-wide unique identifier.
    pub id: NodeId,
    /// Display name.
    pub name: Option<String>,
    /// Kind of this node.
    pub kind: NodeKind,
    /// Additional attributes.
    pub attributes: IndexMap<String, String>,
}

impl FlowNode {
    /// Create a new node with the given kind.
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
            attributes: IndexMap::new(),
        }
    }

    pub fn start_event(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::StartEvent)
    }

    pub fn end_event(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::EndEvent)
    }

    pub fn task(id: impl Into<NodeId>) -> Self {
        Self::new(id, NodeKind::Task(TaskKind::Task))
    }

    pub fn gateway(id: impl Into<NodeId>, kind: GatewayKind) -> Self {
        Self::new(id, NodeKind::Gateway(kind))
    }

    /// Create a sub-process around a body scope. The body takes the node id.
    pub fn sub_process(id: impl Into<NodeId>, mut body: ProcessGraph) -> Self {
        let id = id.into();
        body.set_id(id.as_str());
        Self::new(id, NodeKind::SubProcess(Box::new(body)))
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display name or empty string.
    pub fn name_or_default(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// A directed edge between two nodes of the same scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFlow {
    pub id: FlowId,
    pub source: NodeId,
    pub target: NodeId,
    /// Guard expression evaluated when leaving a gateway.
    pub condition: Option<String>,
}

impl SequenceFlow {
    /// Create an unconditioned flow.
    pub fn new(
        id: impl Into<FlowId>,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            condition: None,
        }
    }

    /// Attach a condition expression.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// A namespaced extension element attached to a process scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionElement {
    pub namespace: String,
    pub name: String,
    pub attributes: IndexMap<String, String>,
}

impl ExtensionElement {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Set an attribute.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Set an attribute if the value is present.
    pub fn set_opt(&mut self, key: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Get an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
