//! Fluent construction of process graphs.

use bpmnt_core::{GatewayKind, NodeId, TailorResult, TaskKind};

use crate::{FlowNode, NodeKind, ProcessGraph, SequenceFlow};

/// Builder for a `ProcessGraph`.
///
/// Nodes are declared explicitly or implicitly through [`ProcessBuilder::chain`].
/// Errors (duplicate ids, dangling flows) surface from [`ProcessBuilder::build`].
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    id: String,
    name: Option<String>,
    nodes: Vec<FlowNode>,
    flows: Vec<SequenceFlow>,
}

impl ProcessBuilder {
    /// Start building a scope with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            nodes: Vec::new(),
            flows: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare a node.
    pub fn node(mut self, node: FlowNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn start(self, id: &str) -> Self {
        self.node(FlowNode::start_event(id))
    }

    pub fn end(self, id: &str) -> Self {
        self.node(FlowNode::end_event(id))
    }

    pub fn task(self, id: &str) -> Self {
        self.node(FlowNode::task(id).with_name(id))
    }

    pub fn typed_task(self, id: &str, kind: TaskKind) -> Self {
        self.node(FlowNode::new(id, NodeKind::Task(kind)).with_name(id))
    }

    pub fn gateway(self, id: &str, kind: GatewayKind) -> Self {
        self.node(FlowNode::gateway(id, kind))
    }

    /// Declare a sub-process around an already built body.
    pub fn sub_process(self, id: &str, body: ProcessGraph) -> Self {
        self.node(FlowNode::sub_process(id, body).with_name(id))
    }

    /// Add an unconditioned flow.
    pub fn flow(mut self, source: &str, target: &str) -> Self {
        let id = self.flow_id(source, target);
        self.flows.push(SequenceFlow::new(id, source, target));
        self
    }

    /// Add a flow guarded by a condition.
    pub fn conditional_flow(mut self, source: &str, target: &str, condition: &str) -> Self {
        let id = self.flow_id(source, target);
        self.flows
            .push(SequenceFlow::new(id, source, target).with_condition(condition));
        self
    }

    /// Connect the ids in sequence.
    ///
    /// Undeclared ids are declared on the fly: the first as a start event,
    /// the last as an end event, the others as tasks.
    pub fn chain(mut self, ids: &[&str]) -> Self {
        let last = ids.len().saturating_sub(1);
        for (position, id) in ids.iter().enumerate() {
            if self.is_declared(id) {
                continue;
            }
            self = if position == 0 {
                self.start(id)
            } else if position == last {
                self.end(id)
            } else {
                self.task(id)
            };
        }
        for pair in ids.windows(2) {
            self = self.flow(pair[0], pair[1]);
        }
        self
    }

    fn is_declared(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    fn flow_id(&self, source: &str, target: &str) -> String {
        let base = format!("Flow_{}_{}", source, target);
        let mut id = base.clone();
        let mut counter = 1;
        while self.flows.iter().any(|f| f.id.as_str() == id) {
            counter += 1;
            id = format!("{}_{}", base, counter);
        }
        id
    }

    /// Build the scope.
    pub fn build(self) -> TailorResult<ProcessGraph> {
        let mut graph = ProcessGraph::new(self.id);
        graph.set_name(self.name);
        for node in self.nodes {
            graph.add_node(node)?;
        }
        for flow in self.flows {
            graph.add_flow(flow)?;
        }
        Ok(graph)
    }

    /// Ids declared so far.
    pub fn declared(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }
}
