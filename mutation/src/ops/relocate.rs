//! MOVE - relocates a node or fragment between two connected anchors.
//!
//! Anchors are resolved and checked before anything is removed, so a
//! failing move leaves the graph untouched.

use bpmnt_core::messages::{ERR_ANCHORS_NOT_CONNECTED, ERR_ANCHOR_INSIDE_TARGET};
use bpmnt_core::{TailorError, TailorResult};
use bpmnt_graph::{map_fragment, validate_delete_fragment, Fragment, ProcessGraph, SequenceFlow};

use super::{check_anchor_shapes, require_plain, resolve_anchors};
use crate::gateway::{collapse_degenerate, splice_between};
use crate::rewire::{heal, Boundary};
use crate::ElementIds;

/// Move a single node.
pub fn move_node(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    id: &str,
    after: Option<&str>,
    before: Option<&str>,
) -> TailorResult<()> {
    require_plain(graph, id)?;
    let fragment = map_fragment(graph, id, id)?;
    relocate(graph, ids, &fragment, after, before)?;
    tracing::debug!("Moved {} between {:?} and {:?}", id, after, before);
    Ok(())
}

/// Move the fragment `[start, end]`.
pub fn move_fragment(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    start: &str,
    end: &str,
    after: Option<&str>,
    before: Option<&str>,
) -> TailorResult<()> {
    let fragment = map_fragment(graph, start, end)?;
    validate_delete_fragment(graph, &fragment)?;
    relocate(graph, ids, &fragment, after, before)?;
    tracing::debug!(
        "Moved fragment [{}, {}] between {:?} and {:?}",
        start,
        end,
        after,
        before
    );
    Ok(())
}

fn relocate(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    fragment: &Fragment,
    after: Option<&str>,
    before: Option<&str>,
) -> TailorResult<()> {
    check_anchor_shapes(graph, after, before)?;
    let (after, before) = resolve_anchors(graph, after, before)?;
    if fragment.contains(after.as_str()) || fragment.contains(before.as_str()) {
        return Err(TailorError::invalid_argument(ERR_ANCHOR_INSIDE_TARGET));
    }
    if !graph.is_connected(after.as_str(), before.as_str()) {
        return Err(TailorError::invalid_argument(format!(
            "{} -> {}: {}",
            after, before, ERR_ANCHORS_NOT_CONNECTED
        )));
    }

    let boundary = Boundary::of_fragment(graph, fragment);
    let internal: Vec<SequenceFlow> = graph
        .flows()
        .filter(|f| fragment.contains(f.source.as_str()) && fragment.contains(f.target.as_str()))
        .cloned()
        .collect();
    let mut detached = Vec::with_capacity(fragment.len());
    for id in fragment.nodes() {
        detached.push(graph.remove_node(id.as_str())?);
    }

    heal(graph, ids, &boundary)?;

    for node in detached {
        graph.add_node(node)?;
    }
    for flow in internal {
        graph.add_flow(flow)?;
    }
    splice_between(graph, ids, &after, &before, fragment.start(), fragment.end())?;

    collapse_degenerate(graph, ids, &boundary.neighbours())?;
    Ok(())
}
