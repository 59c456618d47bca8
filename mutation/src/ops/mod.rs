//! Edit operation implementations.
//!
//! Each edit validates all of its preconditions before the first mutation.
//! Every function works on the scope owning its target nodes.

mod delete;
mod insert;
mod modify;
mod parallelize;
mod relocate;
mod rename;
mod replace;
mod split;
mod suppress;

pub use delete::{delete_fragment, delete_node};
pub use insert::{conditional_insert, insert};
pub use modify::{modify_flow, modify_node};
pub use parallelize::parallelize;
pub use relocate::{move_fragment, move_node};
pub use rename::rename;
pub use replace::{replace_fragment, replace_node};
pub use split::split;
pub use suppress::suppress;

use bpmnt_core::messages::*;
use bpmnt_core::{NodeId, TailorError, TailorResult};
use bpmnt_graph::{NodeKind, Payload, ProcessGraph};

use crate::rewire::append_subgraph;
use crate::ElementIds;

/// Reject gateways, start events and end events.
fn require_plain(graph: &ProcessGraph, id: &str) -> TailorResult<()> {
    let node = graph.node(id)?;
    if node.kind.is_gateway() {
        return Err(TailorError::invalid_argument(format!(
            "{}: {}",
            id, ERR_GATEWAY_NOT_ALLOWED
        )));
    }
    if node.kind.is_boundary_event() {
        return Err(TailorError::invalid_argument(format!(
            "{}: {}",
            id, ERR_BOUNDARY_EVENT_NOT_ALLOWED
        )));
    }
    Ok(())
}

/// Check the shape rules shared by insertions and moves.
fn check_anchor_shapes(
    graph: &ProcessGraph,
    after: Option<&str>,
    before: Option<&str>,
) -> TailorResult<()> {
    if after.is_none() && before.is_none() {
        return Err(TailorError::invalid_argument(ERR_NO_ANCHOR));
    }
    if let Some(after) = after {
        if graph.node(after)?.kind.is_end_event() {
            return Err(TailorError::invalid_argument(ERR_AFTER_END));
        }
        if before.is_none() && graph.is_divergent(after) {
            return Err(TailorError::invalid_argument(ERR_AFTER_DIVERGENT));
        }
    }
    if let Some(before) = before {
        if graph.node(before)?.kind.is_start_event() {
            return Err(TailorError::invalid_argument(ERR_BEFORE_START));
        }
        if after.is_none() && graph.is_convergent(before) {
            return Err(TailorError::invalid_argument(ERR_BEFORE_CONVERGENT));
        }
    }
    Ok(())
}

/// Fill in a missing anchor from the other anchor's single neighbour.
fn resolve_anchors(
    graph: &ProcessGraph,
    after: Option<&str>,
    before: Option<&str>,
) -> TailorResult<(NodeId, NodeId)> {
    match (after, before) {
        (Some(after), Some(before)) => {
            Ok((graph.node(after)?.id.clone(), graph.node(before)?.id.clone()))
        }
        (Some(after), None) => match graph.successors(after).as_slice() {
            [single] => Ok((graph.node(after)?.id.clone(), single.clone())),
            other => Err(TailorError::invalid_argument(format!(
                "beforeOf cannot be inferred: {} has {} successors",
                after,
                other.len()
            ))),
        },
        (None, Some(before)) => match graph.predecessors(before).as_slice() {
            [single] => Ok((single.clone(), graph.node(before)?.id.clone())),
            other => Err(TailorError::invalid_argument(format!(
                "afterOf cannot be inferred: {} has {} predecessors",
                before,
                other.len()
            ))),
        },
        (None, None) => Err(TailorError::invalid_argument(ERR_NO_ANCHOR)),
    }
}

/// Reject identical anchors and anchors in reverse flow order.
///
/// Anchors on a common cycle reach each other both ways and are accepted.
fn check_anchor_order(graph: &ProcessGraph, after: &NodeId, before: &NodeId) -> TailorResult<()> {
    if after == before {
        return Err(TailorError::invalid_argument(format!(
            "{}: {}",
            after, ERR_IDENTICAL_ANCHORS
        )));
    }
    if graph.reaches(before.as_str(), after.as_str())
        && !graph.reaches(after.as_str(), before.as_str())
    {
        return Err(TailorError::invalid_argument(format!(
            "{} -> {}: {}",
            after, before, ERR_ANCHORS_REVERSED
        )));
    }
    Ok(())
}

/// Check a payload before it is contributed.
///
/// `replacing` is the kind of the node being replaced, if any.
fn check_payload(
    ids: &ElementIds,
    payload: &Payload,
    replacing: Option<&NodeKind>,
) -> TailorResult<()> {
    let replacing_start = replacing.map_or(false, NodeKind::is_start_event);
    let replacing_end = replacing.map_or(false, NodeKind::is_end_event);
    match payload {
        Payload::Node(node) => {
            if node.kind.is_gateway() {
                return Err(TailorError::invalid_argument(ERR_GATEWAY_PAYLOAD));
            }
            if node.kind.is_start_event() != replacing_start
                || node.kind.is_end_event() != replacing_end
            {
                return Err(TailorError::invalid_argument(ERR_EVENT_KIND_MISMATCH));
            }
        }
        Payload::Fragment(_) => {
            if replacing_start || replacing_end {
                return Err(TailorError::invalid_argument(ERR_EVENT_KIND_MISMATCH));
            }
        }
    }
    if let Some(id) = payload
        .contributed_ids()?
        .into_iter()
        .find(|id| ids.is_taken(id))
    {
        return Err(TailorError::duplicate(id));
    }
    Ok(())
}

/// Copy a payload into the scope, unconnected. Returns its entry and exit.
fn place_payload(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    payload: &Payload,
) -> TailorResult<(NodeId, NodeId)> {
    let source = payload.to_graph(graph.id())?;
    let entry = payload.entry().clone();
    let exit = payload.exit().clone();
    append_subgraph(graph, ids, None, &source, entry.as_str(), Some(exit.as_str()))?;
    Ok((entry, exit))
}
