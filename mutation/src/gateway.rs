//! Gateway bookkeeping.
//!
//! Insertions create gateway pairs (or reuse existing ones) and deletions
//! collapse gateways left with a single branch.

use bpmnt_core::{FlowId, GatewayKind, NodeId, TailorError, TailorResult};
use bpmnt_graph::{FlowNode, ProcessGraph};

use crate::rewire::{connect, splice_out};
use crate::ElementIds;

fn is_gateway_of(graph: &ProcessGraph, id: &str, kind: GatewayKind) -> bool {
    graph
        .get_node(id)
        .and_then(|n| n.kind.gateway_kind())
        .map_or(false, |k| k == kind)
}

/// Splice out every listed gateway that has at most one incoming and one
/// outgoing flow. Each neighbour is looked at once; gateways that degenerate
/// as a consequence are left alone.
pub(crate) fn collapse_degenerate(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    neighbours: &[NodeId],
) -> TailorResult<Vec<NodeId>> {
    let mut removed = Vec::new();
    for id in neighbours {
        let is_gateway = graph
            .get_node(id.as_str())
            .map_or(false, |n| n.kind.is_gateway());
        if !is_gateway {
            continue;
        }
        if graph.in_degree(id.as_str()) <= 1 && graph.out_degree(id.as_str()) <= 1 {
            tracing::debug!("Collapsing degenerate gateway {}", id);
            splice_out(graph, ids, id.as_str())?;
            removed.push(id.clone());
        }
    }
    Ok(removed)
}

/// Put `entry ..= exit` on the flow `after -> before`.
pub(crate) fn splice_between(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    after: &NodeId,
    before: &NodeId,
    entry: &NodeId,
    exit: &NodeId,
) -> TailorResult<()> {
    let flow_id = direct_flow(graph, after, before)?;
    if let Some(flow) = graph.get_flow_mut(flow_id.as_str()) {
        flow.target = entry.clone();
    }
    connect(graph, ids, exit, before, None)?;
    Ok(())
}

fn direct_flow(graph: &ProcessGraph, after: &NodeId, before: &NodeId) -> TailorResult<FlowId> {
    graph
        .flow_between(after.as_str(), before.as_str())
        .map(|f| f.id.clone())
        .ok_or_else(|| {
            TailorError::inconsistent(format!("no flow between {} and {}", after, before))
        })
}

/// A divergent gateway of `kind` right after `anchor`.
///
/// Reuses the anchor or its single successor when that is already such a
/// gateway; otherwise a new gateway takes over the anchor's outgoing flows.
pub(crate) fn divergent_after(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    anchor: &NodeId,
    kind: GatewayKind,
) -> TailorResult<NodeId> {
    if graph.is_divergent(anchor.as_str()) {
        if is_gateway_of(graph, anchor.as_str(), kind) {
            return Ok(anchor.clone());
        }
        return Err(TailorError::invalid_argument(format!(
            "{} is a divergent gateway of another kind",
            anchor
        )));
    }
    if let [single] = graph.successors(anchor.as_str()).as_slice() {
        if is_gateway_of(graph, single.as_str(), kind) && graph.is_divergent(single.as_str()) {
            return Ok(single.clone());
        }
    }

    let gateway = ids.gateway();
    graph.add_node(FlowNode::gateway(gateway.clone(), kind))?;
    let outgoing: Vec<FlowId> = graph
        .outgoing(anchor.as_str())
        .iter()
        .map(|f| f.id.clone())
        .collect();
    for flow_id in outgoing {
        if let Some(flow) = graph.get_flow_mut(flow_id.as_str()) {
            flow.source = gateway.clone();
        }
    }
    connect(graph, ids, anchor, &gateway, None)?;
    tracing::debug!("Created divergent {} gateway {} after {}", kind, gateway, anchor);
    Ok(gateway)
}

/// A convergent gateway of `kind` right before `anchor`. Mirror of
/// [`divergent_after`].
pub(crate) fn convergent_before(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    anchor: &NodeId,
    kind: GatewayKind,
) -> TailorResult<NodeId> {
    if graph.is_convergent(anchor.as_str()) {
        if is_gateway_of(graph, anchor.as_str(), kind) {
            return Ok(anchor.clone());
        }
        return Err(TailorError::invalid_argument(format!(
            "{} is a convergent gateway of another kind",
            anchor
        )));
    }
    if let [single] = graph.predecessors(anchor.as_str()).as_slice() {
        if is_gateway_of(graph, single.as_str(), kind) && graph.is_convergent(single.as_str()) {
            return Ok(single.clone());
        }
    }

    let gateway = ids.gateway();
    graph.add_node(FlowNode::gateway(gateway.clone(), kind))?;
    let incoming: Vec<FlowId> = graph
        .incoming(anchor.as_str())
        .iter()
        .map(|f| f.id.clone())
        .collect();
    for flow_id in incoming {
        if let Some(flow) = graph.get_flow_mut(flow_id.as_str()) {
            flow.target = gateway.clone();
        }
    }
    connect(graph, ids, &gateway, anchor, None)?;
    tracing::debug!("Created convergent {} gateway {} before {}", kind, gateway, anchor);
    Ok(gateway)
}

/// Place `entry ..= exit` between two anchors.
///
/// Directly connected anchors get a serial splice; otherwise the region
/// becomes a new branch between a divergent and a convergent gateway.
pub(crate) fn insert_between(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    after: &NodeId,
    before: &NodeId,
    entry: &NodeId,
    exit: &NodeId,
) -> TailorResult<()> {
    if graph.is_connected(after.as_str(), before.as_str()) {
        return splice_between(graph, ids, after, before, entry, exit);
    }
    let split = divergent_after(graph, ids, after, GatewayKind::Parallel)?;
    let join = convergent_before(graph, ids, before, GatewayKind::Parallel)?;
    connect(graph, ids, &split, entry, None)?;
    connect(graph, ids, exit, &join, None)?;
    Ok(())
}

/// Place `entry ..= exit` on an optional branch guarded by `condition`.
///
/// With `in_loop` the region is wrapped in a loop instead: a merge gateway
/// before it and a split gateway after it whose back-edge carries the
/// condition. Loops require directly connected anchors.
#[allow(clippy::too_many_arguments)]
pub(crate) fn insert_conditional(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    after: &NodeId,
    before: &NodeId,
    entry: &NodeId,
    exit: &NodeId,
    condition: &str,
    in_loop: bool,
) -> TailorResult<()> {
    let connected = graph.is_connected(after.as_str(), before.as_str());

    if in_loop {
        let flow_id = direct_flow(graph, after, before)?;
        let merge = ids.gateway();
        let split = ids.gateway();
        graph.add_node(FlowNode::gateway(merge.clone(), GatewayKind::Exclusive))?;
        graph.add_node(FlowNode::gateway(split.clone(), GatewayKind::Exclusive))?;
        if let Some(flow) = graph.get_flow_mut(flow_id.as_str()) {
            flow.target = merge.clone();
        }
        connect(graph, ids, &merge, entry, None)?;
        connect(graph, ids, exit, &split, None)?;
        connect(graph, ids, &split, before, None)?;
        connect(graph, ids, &split, &merge, Some(condition.to_string()))?;
        return Ok(());
    }

    if connected {
        let flow_id = direct_flow(graph, after, before)?;
        let split = ids.gateway();
        let join = ids.gateway();
        graph.add_node(FlowNode::gateway(split.clone(), GatewayKind::Exclusive))?;
        graph.add_node(FlowNode::gateway(join.clone(), GatewayKind::Exclusive))?;
        if let Some(flow) = graph.get_flow_mut(flow_id.as_str()) {
            flow.target = split.clone();
        }
        connect(graph, ids, &split, entry, Some(condition.to_string()))?;
        connect(graph, ids, exit, &join, None)?;
        connect(graph, ids, &split, &join, None)?;
        connect(graph, ids, &join, before, None)?;
        return Ok(());
    }

    let split = divergent_after(graph, ids, after, GatewayKind::Exclusive)?;
    let join = convergent_before(graph, ids, before, GatewayKind::Exclusive)?;
    connect(graph, ids, &split, entry, Some(condition.to_string()))?;
    connect(graph, ids, exit, &join, None)?;
    Ok(())
}
