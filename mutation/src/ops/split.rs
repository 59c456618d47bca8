//! SPLIT - turns a task into a sub-process.

use bpmnt_core::messages::{ERR_SPLIT_REQUIRES_TASK, ERR_SUB_MODEL_SPAN};
use bpmnt_core::{NodeId, TailorError, TailorResult};
use bpmnt_graph::{Model, NodeKind, ProcessGraph};
use indexmap::IndexSet;

use crate::ElementIds;

/// Replace the task's kind by a sub-process whose body is the span from the
/// start event to the end event of `sub_model`'s first process. The node
/// keeps its id, name and flows.
pub fn split(
    graph: &mut ProcessGraph,
    ids: &mut ElementIds,
    task: &str,
    sub_model: &Model,
) -> TailorResult<()> {
    if !graph.node(task)?.kind.is_task() {
        return Err(TailorError::invalid_argument(format!(
            "{}: {}",
            task, ERR_SPLIT_REQUIRES_TASK
        )));
    }
    let process = sub_model
        .process()
        .ok_or_else(|| TailorError::invalid_argument("sub-model has no process"))?;
    let mut body = event_span(process)?;
    let mut contributed: Vec<String> = body.all_ids().into_iter().collect();
    contributed.sort();
    if let Some(id) = contributed.iter().find(|id| ids.is_taken(id)) {
        return Err(TailorError::duplicate(id.as_str()));
    }

    body.set_id(task);
    for id in contributed {
        ids.reserve(id);
    }
    let node = graph
        .get_node_mut(task)
        .ok_or_else(|| TailorError::not_found(task))?;
    node.kind = NodeKind::SubProcess(Box::new(body));

    tracing::debug!("Split {} into a sub-process", task);
    Ok(())
}

/// Nodes reachable from the start event up to the end event, with the
/// flows between them.
fn event_span(process: &ProcessGraph) -> TailorResult<ProcessGraph> {
    let (start, end) = match (process.start_events().as_slice(), process.end_events().as_slice()) {
        ([start], [end]) => (start.id.clone(), end.id.clone()),
        _ => return Err(TailorError::invalid_argument(ERR_SUB_MODEL_SPAN)),
    };

    let mut visited: IndexSet<NodeId> = IndexSet::new();
    let mut reached_end = false;
    let mut worklist = vec![start];
    while let Some(current) = worklist.pop() {
        if current == end {
            reached_end = true;
            continue;
        }
        if !visited.insert(current.clone()) {
            continue;
        }
        for next in process.successors(current.as_str()).into_iter().rev() {
            if !visited.contains(&next) {
                worklist.push(next);
            }
        }
    }
    if !reached_end {
        return Err(TailorError::invalid_argument(format!(
            "{}: end event {} is not reachable from the start event",
            process.id(),
            end
        )));
    }
    visited.insert(end);

    let mut span = ProcessGraph::new(process.id());
    span.set_name(process.name().map(str::to_string));
    for id in &visited {
        span.add_node(process.node(id.as_str())?.clone())?;
    }
    for flow in process.flows() {
        if visited.contains(&flow.source) && visited.contains(&flow.target) {
            span.add_flow(flow.clone())?;
        }
    }
    Ok(span)
}
