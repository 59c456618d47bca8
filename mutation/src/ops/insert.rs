//! INSERT - contributes a payload between two anchors.

use bpmnt_core::messages::{ERR_ANCHORS_NOT_CONNECTED, ERR_CONDITIONAL_ANCHORS};
use bpmnt_core::{TailorError, TailorResult};
use bpmnt_graph::{Payload, ProcessGraph};

use super::{
    check_anchor_order, check_anchor_shapes, check_payload, place_payload, resolve_anchors,
};
use crate::gateway::{insert_between, insert_conditional};
use crate::ElementIds;

/// Insert a payload after `after` and before `before`.
///
/// A missing anchor is inferred from the other anchor's single neighbour.
/// Directly connected anchors get a serial splice, otherwise the payload
/// runs in parallel to whatever lies between them.
pub fn insert(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    after: Option<&str>,
    before: Option<&str>,
    payload: &Payload,
) -> TailorResult<()> {
    check_anchor_shapes(graph, after, before)?;
    let (after, before) = resolve_anchors(graph, after, before)?;
    check_anchor_order(graph, &after, &before)?;
    check_payload(ids, payload, None)?;

    let (entry, exit) = place_payload(graph, ids, payload)?;
    insert_between(graph, ids, &after, &before, &entry, &exit)?;

    tracing::debug!("Inserted {}..{} between {} and {}", entry, exit, after, before);
    Ok(())
}

/// Insert a payload on a branch taken only when `condition` holds, or
/// repeated while it holds when `in_loop` is set.
pub fn conditional_insert(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    after: Option<&str>,
    before: Option<&str>,
    payload: &Payload,
    condition: &str,
    in_loop: bool,
) -> TailorResult<()> {
    let (after, before) = match (after, before) {
        (Some(after), Some(before)) => (after, before),
        _ => return Err(TailorError::invalid_argument(ERR_CONDITIONAL_ANCHORS)),
    };
    check_anchor_shapes(graph, Some(after), Some(before))?;
    let (after, before) = resolve_anchors(graph, Some(after), Some(before))?;
    check_anchor_order(graph, &after, &before)?;
    if in_loop && !graph.is_connected(after.as_str(), before.as_str()) {
        return Err(TailorError::invalid_argument(format!(
            "{} -> {}: {}",
            after, before, ERR_ANCHORS_NOT_CONNECTED
        )));
    }
    check_payload(ids, payload, None)?;

    let (entry, exit) = place_payload(graph, ids, payload)?;
    insert_conditional(graph, ids, &after, &before, &entry, &exit, condition, in_loop)?;

    tracing::debug!(
        "Inserted {}..{} between {} and {} when {:?} (loop: {})",
        entry,
        exit,
        after,
        before,
        condition,
        in_loop
    );
    Ok(())
}
