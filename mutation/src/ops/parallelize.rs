//! PARALLELIZE - turns a serial fragment into parallel branches.

use bpmnt_core::messages::ERR_IDENTICAL_BOUNDS;
use bpmnt_core::{FlowId, GatewayKind, TailorError, TailorResult};
use bpmnt_graph::{map_fragment, FlowNode, ProcessGraph};

use super::require_plain;
use crate::rewire::connect;
use crate::ElementIds;

/// Run every node of `[start, end]` in its own branch between a new
/// parallel split and join.
pub fn parallelize(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    start: &str,
    end: &str,
) -> TailorResult<()> {
    if start == end {
        return Err(TailorError::invalid_argument(ERR_IDENTICAL_BOUNDS));
    }
    let fragment = map_fragment(graph, start, end)?;
    for id in fragment.nodes() {
        require_plain(graph, id.as_str())?;
    }
    let entry = single_flow(graph.incoming(start).iter().map(|f| f.id.clone()), start, "incoming")?;
    let exit = single_flow(graph.outgoing(end).iter().map(|f| f.id.clone()), end, "outgoing")?;

    let internal: Vec<FlowId> = graph
        .flows()
        .filter(|f| fragment.contains(f.source.as_str()) && fragment.contains(f.target.as_str()))
        .map(|f| f.id.clone())
        .collect();
    for flow_id in internal {
        graph.remove_flow(flow_id.as_str())?;
    }

    let split = ids.gateway();
    let join = ids.gateway();
    graph.add_node(FlowNode::gateway(split.clone(), GatewayKind::Parallel))?;
    graph.add_node(FlowNode::gateway(join.clone(), GatewayKind::Parallel))?;
    if let Some(flow) = graph.get_flow_mut(entry.as_str()) {
        flow.target = split.clone();
    }
    if let Some(flow) = graph.get_flow_mut(exit.as_str()) {
        flow.source = join.clone();
    }
    for id in fragment.nodes() {
        connect(graph, ids, &split, id, None)?;
        connect(graph, ids, id, &join, None)?;
    }

    tracing::debug!(
        "Parallelized {} nodes between {} and {}",
        fragment.len(),
        split,
        join
    );
    Ok(())
}

fn single_flow(
    mut flows: impl Iterator<Item = FlowId>,
    id: &str,
    direction: &str,
) -> TailorResult<FlowId> {
    match (flows.next(), flows.next()) {
        (Some(flow), None) => Ok(flow),
        _ => Err(TailorError::invalid_argument(format!(
            "{} must have exactly one {} flow",
            id, direction
        ))),
    }
}
