//! DELETE - removes a node or a fragment and heals the flow around it.

use bpmnt_core::TailorResult;
use bpmnt_graph::{map_fragment, validate_delete_fragment, ProcessGraph};

use super::require_plain;
use crate::gateway::collapse_degenerate;
use crate::rewire::{heal, Boundary};
use crate::ElementIds;

/// Delete a task, sub-process or intermediate node.
pub fn delete_node(graph: &mut ProcessGraph, ids: &mut ElementIds, id: &str) -> TailorResult<()> {
    require_plain(graph, id)?;

    let boundary = Boundary::of_node(graph, id);
    graph.remove_node(id)?;
    heal(graph, ids, &boundary)?;
    let collapsed = collapse_degenerate(graph, ids, &boundary.neighbours())?;

    tracing::debug!("Deleted {} (collapsed gateways: {:?})", id, collapsed);
    Ok(())
}

/// Delete the fragment `[start, end]`.
pub fn delete_fragment(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    start: &str,
    end: &str,
) -> TailorResult<()> {
    let fragment = map_fragment(graph, start, end)?;
    validate_delete_fragment(graph, &fragment)?;

    let boundary = Boundary::of_fragment(graph, &fragment);
    for id in fragment.nodes() {
        graph.remove_node(id.as_str())?;
    }
    heal(graph, ids, &boundary)?;
    let collapsed = collapse_degenerate(graph, ids, &boundary.neighbours())?;

    tracing::debug!(
        "Deleted fragment [{}, {}] of {} nodes (collapsed gateways: {:?})",
        start,
        end,
        fragment.len(),
        collapsed
    );
    Ok(())
}
