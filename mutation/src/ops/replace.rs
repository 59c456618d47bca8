//! REPLACE - swaps a node or fragment for a payload.

use bpmnt_core::messages::ERR_GATEWAY_NOT_ALLOWED;
use bpmnt_core::{NodeId, TailorError, TailorResult};
use bpmnt_graph::{map_fragment, Payload, ProcessGraph};

use super::{check_payload, place_payload};
use crate::rewire::{connect, Boundary};
use crate::ElementIds;

/// Replace a single node. Start and end events may only be replaced by an
/// event of the same kind.
pub fn replace_node(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    id: &str,
    payload: &Payload,
) -> TailorResult<()> {
    let node = graph.node(id)?;
    if node.kind.is_gateway() {
        return Err(TailorError::invalid_argument(format!(
            "{}: {}",
            id, ERR_GATEWAY_NOT_ALLOWED
        )));
    }
    check_payload(ids, payload, Some(&node.kind))?;

    let boundary = Boundary::of_node(graph, id);
    graph.remove_node(id)?;
    attach(graph, ids, &boundary, payload)?;

    tracing::debug!("Replaced {} by {}..{}", id, payload.entry(), payload.exit());
    Ok(())
}

/// Replace the fragment `[start, end]`.
pub fn replace_fragment(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    start: &str,
    end: &str,
    payload: &Payload,
) -> TailorResult<()> {
    let fragment = map_fragment(graph, start, end)?;
    check_payload(ids, payload, None)?;

    let boundary = Boundary::of_fragment(graph, &fragment);
    for id in fragment.nodes() {
        graph.remove_node(id.as_str())?;
    }
    attach(graph, ids, &boundary, payload)?;

    tracing::debug!(
        "Replaced fragment [{}, {}] by {}..{}",
        start,
        end,
        payload.entry(),
        payload.exit()
    );
    Ok(())
}

/// Place the payload where the removed region was.
fn attach(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    boundary: &Boundary,
    payload: &Payload,
) -> TailorResult<()> {
    let (entry, exit) = place_payload(graph, ids, payload)?;
    for flow in &boundary.incoming {
        link(graph, ids, &flow.source, &entry, flow.condition.clone())?;
    }
    for flow in &boundary.outgoing {
        link(graph, ids, &exit, &flow.target, flow.condition.clone())?;
    }
    Ok(())
}

fn link(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    source: &NodeId,
    target: &NodeId,
    condition: Option<String>,
) -> TailorResult<()> {
    if graph.belongs_to(source.as_str())
        && graph.belongs_to(target.as_str())
        && !graph.is_connected(source.as_str(), target.as_str())
    {
        connect(graph, ids, source, target, condition)?;
    }
    Ok(())
}
