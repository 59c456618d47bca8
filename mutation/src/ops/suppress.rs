//! SUPPRESS - removes a node and its flows without healing.

use bpmnt_core::TailorResult;
use bpmnt_graph::ProcessGraph;

use crate::rewire::isolate;

/// Remove the node together with every flow touching it.
pub fn suppress(graph: &mut ProcessGraph, id: &str) -> TailorResult<()> {
    let flows = isolate(graph, id)?;
    let node = graph.remove_node(id)?;
    tracing::debug!(
        "Suppressed {} {} and {} flows",
        node.kind.element_name(),
        node.id,
        flows.len()
    );
    Ok(())
}
