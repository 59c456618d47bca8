//! Process graph storage.
//!
//! A `ProcessGraph` is the arena of one process or sub-process scope. Nodes
//! and flows are keyed by id and kept in insertion order. Adjacency is always
//! derived from the flow table; nodes never cache their edges.

use std::collections::HashSet;

use bpmnt_core::{FlowId, GatewayShape, NodeId, TailorError, TailorResult};
use indexmap::IndexMap;

use crate::node::{ExtensionElement, FlowNode, NodeKind, SequenceFlow};

/// Flow nodes and sequence flows of one scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProcessGraph {
    id: String,
    name: Option<String>,
    nodes: IndexMap<NodeId, FlowNode>,
    flows: IndexMap<FlowId, SequenceFlow>,
    extensions: Vec<ExtensionElement>,
}

impl ProcessGraph {
    /// Create a new empty scope.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Scope id (process id, or the id of the owning sub-process).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    // ==================== Node Operations ====================

    /// Add a node. Fails if the id is already used in this scope tree.
    pub fn add_node(&mut self, node: FlowNode) -> TailorResult<()> {
        if self.contains_id(node.id.as_str()) {
            return Err(TailorError::duplicate(node.id.as_str()));
        }
        if let Some(body) = node.kind.body() {
            for id in body.all_ids() {
                if self.contains_id(&id) {
                    return Err(TailorError::duplicate(id));
                }
            }
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Get a node by id.
    pub fn get_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.get(id)
    }

    /// Get a mutable node by id.
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.get_mut(id)
    }

    /// Get a node by id, failing with `ElementNotFound`.
    pub fn node(&self, id: &str) -> TailorResult<&FlowNode> {
        self.nodes.get(id).ok_or_else(|| TailorError::not_found(id))
    }

    /// Whether the node belongs to this scope (nested scopes excluded).
    pub fn belongs_to(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Remove a node together with every flow touching it.
    pub fn remove_node(&mut self, id: &str) -> TailorResult<FlowNode> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| TailorError::not_found(id))?;
        self.flows
            .retain(|_, flow| flow.source != node.id && flow.target != node.id);
        Ok(node)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> + '_ {
        self.nodes.values()
    }

    /// All node ids in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== Flow Operations ====================

    /// Add a flow. Both endpoints must belong to this scope.
    pub fn add_flow(&mut self, flow: SequenceFlow) -> TailorResult<()> {
        if !self.belongs_to(flow.source.as_str()) {
            return Err(TailorError::not_found(flow.source.as_str()));
        }
        if !self.belongs_to(flow.target.as_str()) {
            return Err(TailorError::not_found(flow.target.as_str()));
        }
        if self.contains_id(flow.id.as_str()) {
            return Err(TailorError::duplicate(flow.id.as_str()));
        }
        self.flows.insert(flow.id.clone(), flow);
        Ok(())
    }

    /// Get a flow by id.
    pub fn get_flow(&self, id: &str) -> Option<&SequenceFlow> {
        self.flows.get(id)
    }

    /// Get a mutable flow by id.
    pub fn get_flow_mut(&mut self, id: &str) -> Option<&mut SequenceFlow> {
        self.flows.get_mut(id)
    }

    /// Remove a flow.
    pub fn remove_flow(&mut self, id: &str) -> TailorResult<SequenceFlow> {
        self.flows
            .shift_remove(id)
            .ok_or_else(|| TailorError::not_found(id))
    }

    /// All flows in insertion order.
    pub fn flows(&self) -> impl Iterator<Item = &SequenceFlow> + '_ {
        self.flows.values()
    }

    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    // ==================== Adjacency Queries ====================

    /// Flows entering a node.
    pub fn incoming(&self, id: &str) -> Vec<&SequenceFlow> {
        self.flows.values().filter(|f| f.target == id).collect()
    }

    /// Flows leaving a node.
    pub fn outgoing(&self, id: &str) -> Vec<&SequenceFlow> {
        self.flows.values().filter(|f| f.source == id).collect()
    }

    /// Ids of the flows touching a node.
    pub fn touching_flow_ids(&self, id: &str) -> Vec<FlowId> {
        self.flows
            .values()
            .filter(|f| f.source == id || f.target == id)
            .map(|f| f.id.clone())
            .collect()
    }

    /// Source nodes of the incoming flows.
    pub fn predecessors(&self, id: &str) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = Vec::new();
        for flow in self.incoming(id) {
            if !result.contains(&flow.source) {
                result.push(flow.source.clone());
            }
        }
        result
    }

    /// Target nodes of the outgoing flows.
    pub fn successors(&self, id: &str) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = Vec::new();
        for flow in self.outgoing(id) {
            if !result.contains(&flow.target) {
                result.push(flow.target.clone());
            }
        }
        result
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.flows.values().filter(|f| f.target == id).count()
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.flows.values().filter(|f| f.source == id).count()
    }

    /// The direct flow from `source` to `target`, if any.
    pub fn flow_between(&self, source: &str, target: &str) -> Option<&SequenceFlow> {
        self.flows
            .values()
            .find(|f| f.source == source && f.target == target)
    }

    /// Whether a direct flow `source -> target` exists.
    pub fn is_connected(&self, source: &str, target: &str) -> bool {
        self.flow_between(source, target).is_some()
    }

    /// Whether a path of one or more flows leads from `source` to `target`.
    pub fn reaches(&self, source: &str, target: &str) -> bool {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut worklist = self.successors(source);
        while let Some(current) = worklist.pop() {
            if current == target {
                return true;
            }
            if visited.insert(current.clone()) {
                worklist.extend(self.successors(current.as_str()));
            }
        }
        false
    }

    // ==================== Gateway Classification ====================

    /// Shape of a gateway, or `None` for other nodes.
    pub fn gateway_shape(&self, id: &str) -> Option<GatewayShape> {
        let node = self.nodes.get(id)?;
        if !node.kind.is_gateway() {
            return None;
        }
        Some(GatewayShape::classify(self.in_degree(id), self.out_degree(id)))
    }

    pub fn is_divergent(&self, id: &str) -> bool {
        self.gateway_shape(id) == Some(GatewayShape::Divergent)
    }

    pub fn is_convergent(&self, id: &str) -> bool {
        self.gateway_shape(id) == Some(GatewayShape::Convergent)
    }

    // ==================== Events ====================

    /// Start events of this scope.
    pub fn start_events(&self) -> Vec<&FlowNode> {
        self.nodes
            .values()
            .filter(|n| n.kind.is_start_event())
            .collect()
    }

    /// End events of this scope.
    pub fn end_events(&self) -> Vec<&FlowNode> {
        self.nodes.values().filter(|n| n.kind.is_end_event()).collect()
    }

    /// The first start event of this scope.
    pub fn start_event(&self) -> Option<&FlowNode> {
        self.nodes.values().find(|n| n.kind.is_start_event())
    }

    // ==================== Extension Elements ====================

    pub fn extensions(&self) -> &[ExtensionElement] {
        &self.extensions
    }

    pub fn add_extension(&mut self, extension: ExtensionElement) {
        self.extensions.push(extension);
    }

    /// Detach all extension elements.
    pub fn take_extensions(&mut self) -> Vec<ExtensionElement> {
        std::mem::take(&mut self.extensions)
    }

    // ==================== Nested Scopes ====================

    /// The scope (this one or a nested one) that owns the node.
    pub fn scope_of(&self, id: &str) -> Option<&ProcessGraph> {
        if self.nodes.contains_key(id) {
            return Some(self);
        }
        self.nodes
            .values()
            .filter_map(|n| n.kind.body())
            .find_map(|body| body.scope_of(id))
    }

    /// Mutable access to the scope that owns the node.
    pub fn scope_of_mut(&mut self, id: &str) -> Option<&mut ProcessGraph> {
        if self.nodes.contains_key(id) {
            return Some(self);
        }
        for node in self.nodes.values_mut() {
            if let NodeKind::SubProcess(body) = &mut node.kind {
                if let Some(scope) = body.scope_of_mut(id) {
                    return Some(scope);
                }
            }
        }
        None
    }

    /// The scope that owns the flow.
    pub fn scope_of_flow_mut(&mut self, id: &str) -> Option<&mut ProcessGraph> {
        if self.flows.contains_key(id) {
            return Some(self);
        }
        for node in self.nodes.values_mut() {
            if let NodeKind::SubProcess(body) = &mut node.kind {
                if let Some(scope) = body.scope_of_flow_mut(id) {
                    return Some(scope);
                }
            }
        }
        None
    }

    /// Ids of every node and flow in this scope tree.
    pub fn all_ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut HashSet<String>) {
        for node in self.nodes.values() {
            ids.insert(node.id.to_string());
            if let Some(body) = node.kind.body() {
                body.collect_ids(ids);
            }
        }
        for flow in self.flows.values() {
            ids.insert(flow.id.to_string());
        }
    }

    /// Whether a node or flow with this id exists anywhere in the tree.
    pub fn contains_id(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
            || self.flows.contains_key(id)
            || self
                .nodes
                .values()
                .filter_map(|n| n.kind.body())
                .any(|body| body.contains_id(id))
    }
}
