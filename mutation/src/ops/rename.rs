//! RENAME - sets the display name of a node.

use bpmnt_core::{TailorError, TailorResult};
use bpmnt_graph::ProcessGraph;

pub fn rename(graph: &mut ProcessGraph, id: &str, name: &str) -> TailorResult<()> {
    let node = graph
        .get_node_mut(id)
        .ok_or_else(|| TailorError::not_found(id))?;
    tracing::debug!("Renaming {} from {:?} to {:?}", id, node.name, name);
    node.name = Some(name.to_string());
    Ok(())
}
