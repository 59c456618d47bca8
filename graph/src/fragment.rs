//! Fragment mapping and validation.
//!
//! A fragment is the inclusive node set between a starting and an ending
//! node. Mapping walks outgoing flows depth-first from the starting node and
//! stops at the ending node. Validation checks that deleting the fragment
//! would not leave a gateway without its counterpart.

use bpmnt_core::{GatewayShape, NodeId, TailorError, TailorResult};
use indexmap::IndexSet;

use crate::{ProcessGraph, SequenceFlow};

/// Nodes of a contiguous region, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    start: NodeId,
    end: NodeId,
    nodes: IndexSet<NodeId>,
}

impl Fragment {
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    pub fn end(&self) -> &NodeId {
        &self.end
    }

    /// Nodes in traversal order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// Flows entering the fragment from outside.
    pub fn entry_flows<'g>(&self, graph: &'g ProcessGraph) -> Vec<&'g SequenceFlow> {
        graph
            .flows()
            .filter(|f| self.contains(f.target.as_str()) && !self.contains(f.source.as_str()))
            .collect()
    }

    /// Flows leaving the fragment.
    pub fn exit_flows<'g>(&self, graph: &'g ProcessGraph) -> Vec<&'g SequenceFlow> {
        graph
            .flows()
            .filter(|f| self.contains(f.source.as_str()) && !self.contains(f.target.as_str()))
            .collect()
    }

    /// Nodes outside the fragment with a flow into it.
    pub fn external_predecessors(&self, graph: &ProcessGraph) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = Vec::new();
        for flow in self.entry_flows(graph) {
            if !result.contains(&flow.source) {
                result.push(flow.source.clone());
            }
        }
        result
    }

    /// Nodes outside the fragment reached by a flow out of it.
    pub fn external_successors(&self, graph: &ProcessGraph) -> Vec<NodeId> {
        let mut result: Vec<NodeId> = Vec::new();
        for flow in self.exit_flows(graph) {
            if !result.contains(&flow.target) {
                result.push(flow.target.clone());
            }
        }
        result
    }
}

/// Compute the fragment `[start, end]`.
pub fn map_fragment(graph: &ProcessGraph, start: &str, end: &str) -> TailorResult<Fragment> {
    let start_node = graph.node(start)?;
    let end_node = graph.node(end)?;

    if start_node.kind.is_start_event() {
        return Err(TailorError::illegal_fragment(
            start,
            end,
            "starting node cannot be a start event",
        ));
    }
    if end_node.kind.is_end_event() {
        return Err(TailorError::illegal_fragment(
            start,
            end,
            "ending node cannot be an end event",
        ));
    }

    let mut nodes: IndexSet<NodeId> = IndexSet::new();
    if start == end {
        nodes.insert(start_node.id.clone());
        return Ok(Fragment {
            start: start_node.id.clone(),
            end: end_node.id.clone(),
            nodes,
        });
    }

    if graph.out_degree(start) == 0 {
        return Err(TailorError::illegal_fragment(
            start,
            end,
            "starting node has no outgoing flow",
        ));
    }

    let mut stack: Vec<NodeId> = vec![start_node.id.clone()];
    while let Some(current) = stack.pop() {
        if nodes.contains(&current) {
            continue;
        }
        if current.as_str() != end && graph.node(current.as_str())?.kind.is_end_event() {
            return Err(TailorError::illegal_fragment(
                start,
                end,
                format!("reached end event {} before the ending node", current),
            ));
        }
        nodes.insert(current.clone());
        if current.as_str() == end {
            continue;
        }
        // Reverse so the first outgoing flow is explored first.
        for next in graph.successors(current.as_str()).into_iter().rev() {
            if !nodes.contains(&next) {
                stack.push(next);
            }
        }
    }

    if !nodes.contains(end) {
        return Err(TailorError::illegal_fragment(
            start,
            end,
            "ending node is not reachable from the starting node",
        ));
    }

    Ok(Fragment {
        start: start_node.id.clone(),
        end: end_node.id.clone(),
        nodes,
    })
}

/// Check that removing the fragment keeps gateways paired.
///
/// Assumes gateways are either divergent or convergent; mixed gateways are
/// rejected.
pub fn validate_delete_fragment(graph: &ProcessGraph, fragment: &Fragment) -> TailorResult<()> {
    let illegal = |reason: String| {
        TailorError::illegal_fragment(fragment.start.as_str(), fragment.end.as_str(), reason)
    };

    let mut gateways: Vec<(&NodeId, GatewayShape)> = Vec::new();
    for id in fragment.nodes() {
        match graph.gateway_shape(id.as_str()) {
            Some(GatewayShape::Mixed) => {
                return Err(illegal(format!(
                    "gateway {} is both divergent and convergent",
                    id
                )));
            }
            Some(shape @ (GatewayShape::Divergent | GatewayShape::Convergent)) => {
                gateways.push((id, shape));
            }
            Some(GatewayShape::Degenerate) | None => {}
        }
    }

    let (first, first_shape) = match gateways.first() {
        Some(entry) => *entry,
        None => return Ok(()),
    };
    let (last, last_shape) = match gateways.last() {
        Some(entry) => *entry,
        None => return Ok(()),
    };

    if first_shape == GatewayShape::Convergent {
        return Err(illegal(format!(
            "gateway {} closes a branch opened outside the fragment",
            first
        )));
    }
    if last_shape == GatewayShape::Divergent {
        return Err(illegal(format!(
            "gateway {} opens a branch closed outside the fragment",
            last
        )));
    }
    if let Some(outside) = graph
        .successors(first.as_str())
        .into_iter()
        .find(|s| !fragment.contains(s.as_str()))
    {
        return Err(illegal(format!(
            "branch {} of gateway {} is not part of the fragment",
            outside, first
        )));
    }
    if let Some(outside) = graph
        .predecessors(last.as_str())
        .into_iter()
        .find(|p| !fragment.contains(p.as_str()))
    {
        return Err(illegal(format!(
            "branch {} of gateway {} is not part of the fragment",
            outside, last
        )));
    }
    Ok(())
}
