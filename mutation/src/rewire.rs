//! Flow rewiring primitives.
//!
//! These functions work on a single scope and never rebalance gateways on
//! their own; see `gateway` for that.

use std::collections::HashSet;

use bpmnt_core::{FlowId, GatewayKind, NodeId, TailorResult};
use bpmnt_graph::{Fragment, ProcessGraph, SequenceFlow};
use indexmap::IndexSet;

use crate::ElementIds;

/// Neighbourhood of a node or fragment, captured before it is removed.
#[derive(Debug, Clone, Default)]
pub(crate) struct Boundary {
    /// Flows entering the region from outside.
    pub incoming: Vec<SequenceFlow>,
    /// Flows leaving the region.
    pub outgoing: Vec<SequenceFlow>,
    parallel_splits: HashSet<NodeId>,
    convergent: HashSet<NodeId>,
}

impl Boundary {
    pub fn of_node(graph: &ProcessGraph, id: &str) -> Self {
        let incoming = graph
            .incoming(id)
            .into_iter()
            .filter(|f| f.source != id)
            .cloned()
            .collect();
        let outgoing = graph
            .outgoing(id)
            .into_iter()
            .filter(|f| f.target != id)
            .cloned()
            .collect();
        Self::capture(graph, incoming, outgoing)
    }

    pub fn of_fragment(graph: &ProcessGraph, fragment: &Fragment) -> Self {
        let incoming = fragment.entry_flows(graph).into_iter().cloned().collect();
        let outgoing = fragment.exit_flows(graph).into_iter().cloned().collect();
        Self::capture(graph, incoming, outgoing)
    }

    // Shapes are recorded up front; removing the region changes the degrees.
    fn capture(
        graph: &ProcessGraph,
        incoming: Vec<SequenceFlow>,
        outgoing: Vec<SequenceFlow>,
    ) -> Self {
        let parallel_splits = incoming
            .iter()
            .filter(|f| {
                graph.is_divergent(f.source.as_str())
                    && graph
                        .get_node(f.source.as_str())
                        .and_then(|n| n.kind.gateway_kind())
                        == Some(GatewayKind::Parallel)
            })
            .map(|f| f.source.clone())
            .collect();
        let convergent = outgoing
            .iter()
            .filter(|f| graph.is_convergent(f.target.as_str()))
            .map(|f| f.target.clone())
            .collect();
        Self {
            incoming,
            outgoing,
            parallel_splits,
            convergent,
        }
    }

    pub fn predecessors(&self) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = Vec::new();
        for flow in &self.incoming {
            if !result.contains(&flow.source) {
                result.push(flow.source.clone());
            }
        }
        result
    }

    pub fn successors(&self) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = Vec::new();
        for flow in &self.outgoing {
            if !result.contains(&flow.target) {
                result.push(flow.target.clone());
            }
        }
        result
    }

    /// Predecessors followed by successors, without repeats.
    pub fn neighbours(&self) -> Vec<NodeId> {
        let mut result = self.predecessors();
        for id in self.successors() {
            if !result.contains(&id) {
                result.push(id);
            }
        }
        result
    }
}

/// Remove every flow touching the node.
pub(crate) fn isolate(graph: &mut ProcessGraph, id: &str) -> TailorResult<Vec<SequenceFlow>> {
    graph.node(id)?;
    let mut removed = Vec::new();
    for flow_id in graph.touching_flow_ids(id) {
        removed.push(graph.remove_flow(flow_id.as_str())?);
    }
    Ok(removed)
}

/// Create a flow with a fresh id.
pub(crate) fn connect(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    source: &NodeId,
    target: &NodeId,
    condition: Option<String>,
) -> TailorResult<FlowId> {
    let id = ids.flow();
    let mut flow = SequenceFlow::new(id.clone(), source.clone(), target.clone());
    flow.condition = condition;
    graph.add_flow(flow)?;
    Ok(id)
}

/// Connect every predecessor of a removed region to every successor.
///
/// Each new flow inherits the condition of the predecessor's flow into the
/// region. Existing edges are not duplicated. A parallel split is not wired
/// straight to a convergent gateway: an empty parallel branch does nothing.
/// Exclusive and inclusive splits keep the empty branch so the path guarded
/// by the removed branch's condition still leads somewhere.
pub(crate) fn heal(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    boundary: &Boundary,
) -> TailorResult<Vec<FlowId>> {
    let successors = boundary.successors();
    let mut created = Vec::new();
    for flow in &boundary.incoming {
        let source = &flow.source;
        if !graph.belongs_to(source.as_str()) {
            continue;
        }
        for target in &successors {
            if source == target
                || !graph.belongs_to(target.as_str())
                || graph.is_connected(source.as_str(), target.as_str())
            {
                continue;
            }
            if boundary.parallel_splits.contains(source) && boundary.convergent.contains(target) {
                continue;
            }
            created.push(connect(graph, ids, source, target, flow.condition.clone())?);
        }
    }
    Ok(created)
}

/// Remove a node and heal around it.
pub(crate) fn splice_out(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    id: &str,
) -> TailorResult<Vec<FlowId>> {
    let boundary = Boundary::of_node(graph, id);
    graph.remove_node(id)?;
    heal(graph, ids, &boundary)
}

/// Copy the nodes reachable from `root` in `source` into `graph`.
///
/// Nodes keep their ids, kinds, names and attributes (nested scopes are
/// copied with them) and are copied once even when reached twice. The walk
/// does not continue past `stop_at`. Flows between copied nodes keep their
/// id when it is still free. When `anchor` is given it is connected to the
/// copied root. Returns the copied node ids in visiting order.
pub(crate) fn append_subgraph(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    anchor: Option<&NodeId>,
    source: &ProcessGraph,
    root: &str,
    stop_at: Option<&str>,
) -> TailorResult<Vec<NodeId>> {
    let root = source.node(root)?.id.clone();

    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut worklist = vec![root.clone()];
    while let Some(current) = worklist.pop() {
        if !visited.insert(current.clone()) || stop_at == Some(current.as_str()) {
            continue;
        }
        for next in source.successors(current.as_str()).into_iter().rev() {
            if !visited.contains(&next) {
                worklist.push(next);
            }
        }
    }

    for id in &visited {
        let node = source.node(id.as_str())?.clone();
        if let Some(body) = node.kind.body() {
            for nested in body.all_ids() {
                ids.reserve(nested);
            }
        }
        ids.reserve(id.as_str());
        graph.add_node(node)?;
    }

    for flow in source.flows() {
        if visited.contains(&flow.source)
            && visited.contains(&flow.target)
            && stop_at != Some(flow.source.as_str())
        {
            let mut copy = flow.clone();
            copy.id = ids.flow_or_fresh(&flow.id);
            graph.add_flow(copy)?;
        }
    }

    if let Some(anchor) = anchor {
        connect(graph, ids, anchor, &root, None)?;
    }
    Ok(visited.into_iter().collect())
}
