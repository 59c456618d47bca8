//! MODIFY - sets a single property of a node or flow.
//!
//! Nodes accept `name` and free-form attributes; flows accept `condition`.
//! An empty condition clears the guard.

use bpmnt_core::{TailorError, TailorResult};
use bpmnt_graph::ProcessGraph;

pub const PROPERTY_NAME: &str = "name";
pub const PROPERTY_CONDITION: &str = "condition";

pub fn modify_node(
    graph: &mut ProcessGraph,
    id: &str,
    property: &str,
    value: &str,
) -> TailorResult<()> {
    if property.is_empty() || property == "id" {
        return Err(TailorError::invalid_argument(format!(
            "property {:?} cannot be modified",
            property
        )));
    }
    let node = graph
        .get_node_mut(id)
        .ok_or_else(|| TailorError::not_found(id))?;
    if property == PROPERTY_NAME {
        node.name = Some(value.to_string());
    } else {
        node.attributes.insert(property.to_string(), value.to_string());
    }
    tracing::debug!("Set {} of {} to {:?}", property, id, value);
    Ok(())
}

pub fn modify_flow(
    graph: &mut ProcessGraph,
    id: &str,
    property: &str,
    value: &str,
) -> TailorResult<()> {
    if property != PROPERTY_CONDITION {
        return Err(TailorError::invalid_argument(format!(
            "sequence flows only support the {} property, got {:?}",
            PROPERTY_CONDITION, property
        )));
    }
    let flow = graph
        .get_flow_mut(id)
        .ok_or_else(|| TailorError::not_found(id))?;
    flow.condition = if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    };
    tracing::debug!("Set condition of {} to {:?}", id, value);
    Ok(())
}
