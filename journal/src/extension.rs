//! Conversion between an operation log and a BPMN document.
//!
//! The document holds one process whose id is the tailored process id.
//! Operations without a graph become extension elements of that process.
//! Operations that carry a payload or sub-model become a sub-process named
//! `<newProcessId>_op<order>` whose body is the graph and whose single
//! extension element describes the operation. Every id inside a container
//! is prefixed with `<container>_` so that ids stay unique across the
//! document even when several operations contribute the same element.

use bpmnt_core::{NodeId, TailorError, TailorResult};
use bpmnt_graph::{
    relabel, ExtensionElement, FlowNode, ForeignFragment, Model, Payload, ProcessGraph,
};

use crate::entry::{OperationRecord, Order, TailoringOperation};
use crate::error::{JournalError, JournalResult};
use crate::journal::OperationLog;

/// Namespace of the tailoring extension elements.
pub const DEFAULT_NAMESPACE: &str = "http://www.processhub.net";

const ORDER: &str = "order";
const BASE_PROCESS_ID: &str = "baseProcessId";
const NEW_PROCESS_ID: &str = "newProcessId";
const NODE_ID: &str = "nodeId";
const ELEMENT_ID: &str = "elementId";
const NEW_NAME: &str = "newName";
const MODIFIED_ID: &str = "modifiedId";
const PROPERTY: &str = "property";
const VALUE: &str = "value";
const STARTING_NODE_ID: &str = "startingNodeId";
const ENDING_NODE_ID: &str = "endingNodeId";
const REPLACED_NODE_ID: &str = "replacedNodeId";
const AFTER_OF_ID: &str = "afterOfId";
const BEFORE_OF_ID: &str = "beforeOfId";
const CONDITION: &str = "condition";
const IN_LOOP: &str = "inLoop";
const TASK_ID: &str = "taskId";
const PARENT_ID: &str = "parentId";
const PAYLOAD_KIND: &str = "payloadKind";
const PAYLOAD_START_ID: &str = "payloadStartId";
const PAYLOAD_END_ID: &str = "payloadEndId";
const SCOPE_ID: &str = "scopeId";
const MODEL_ID: &str = "modelId";

const NODE_PAYLOAD: &str = "node";
const FRAGMENT_PAYLOAD: &str = "fragment";

/// Id of the sub-process holding the graph of operation `order`.
fn container_id(new_process_id: &str, order: Order) -> String {
    format!("{}_op{}", new_process_id, order)
}

/// Build the document representation of a log.
pub fn log_to_model(log: &OperationLog, namespace: &str) -> JournalResult<Model> {
    let process_id = log.new_process_id();
    let mut process = ProcessGraph::new(process_id);

    for record in log.records() {
        let mut element = ExtensionElement::new(namespace, record.op.element_name());
        element.set(ORDER, record.order.to_string());
        write_attributes(&mut element, &record.op);

        let body = match &record.op {
            TailoringOperation::Split { sub_model, .. } => {
                let body = sub_model
                    .process()
                    .ok_or_else(|| JournalError::invalid_format("split sub-model has no process"))?;
                element.set(MODEL_ID, sub_model.id());
                element.set(SCOPE_ID, body.id());
                Some(body.clone())
            }
            op => match op.payload() {
                Some(payload) => Some(write_payload(&mut element, payload)?),
                None => None,
            },
        };

        match body {
            Some(body) => {
                let container = container_id(process_id, record.order);
                let prefix = format!("{}_", container);
                let mut body = relabel(&body, |id| Ok(format!("{}{}", prefix, id)))?;
                element.set(PARENT_ID, container.as_str());
                body.add_extension(element);
                process.add_node(FlowNode::sub_process(container, body))?;
            }
            None => process.add_extension(element),
        }
    }

    tracing::debug!(
        "Converted log of {} operations into process {}",
        log.len(),
        process_id
    );
    Ok(Model::with_process(format!("Definitions_{}", process_id), process))
}

/// Record the payload variant and its bounds; returns the graph to store.
fn write_payload(element: &mut ExtensionElement, payload: &Payload) -> TailorResult<ProcessGraph> {
    match payload {
        Payload::Node(_) => {
            element.set(PAYLOAD_KIND, NODE_PAYLOAD);
            payload.to_graph("")
        }
        Payload::Fragment(fragment) => {
            element.set(PAYLOAD_KIND, FRAGMENT_PAYLOAD);
            element.set(PAYLOAD_START_ID, fragment.start.as_str());
            element.set(PAYLOAD_END_ID, fragment.end.as_str());
            element.set(SCOPE_ID, fragment.graph.id());
            fragment.trimmed()
        }
    }
}

fn write_attributes(element: &mut ExtensionElement, op: &TailoringOperation) {
    match op {
        TailoringOperation::Extend {
            base_process_id,
            new_process_id,
        } => {
            element.set(BASE_PROCESS_ID, base_process_id.as_str());
            element.set(NEW_PROCESS_ID, new_process_id.as_str());
        }
        TailoringOperation::Suppress { node_id } | TailoringOperation::DeleteNode { node_id } => {
            element.set(NODE_ID, node_id.as_str());
        }
        TailoringOperation::Rename {
            element_id,
            new_name,
        } => {
            element.set(ELEMENT_ID, element_id.as_str());
            element.set(NEW_NAME, new_name.as_str());
        }
        TailoringOperation::Modify {
            modified_id,
            property,
            value,
        } => {
            element.set(MODIFIED_ID, modified_id.as_str());
            element.set(PROPERTY, property.as_str());
            element.set(VALUE, value.as_str());
        }
        TailoringOperation::DeleteFragment {
            starting_node_id,
            ending_node_id,
        }
        | TailoringOperation::ReplaceFragment {
            starting_node_id,
            ending_node_id,
            ..
        }
        | TailoringOperation::Parallelize {
            starting_node_id,
            ending_node_id,
        } => {
            element.set(STARTING_NODE_ID, starting_node_id.as_str());
            element.set(ENDING_NODE_ID, ending_node_id.as_str());
        }
        TailoringOperation::ReplaceNode {
            replaced_node_id, ..
        } => {
            element.set(REPLACED_NODE_ID, replaced_node_id.as_str());
        }
        TailoringOperation::MoveNode {
            node_id,
            after_of,
            before_of,
        } => {
            element.set(NODE_ID, node_id.as_str());
            element.set_opt(AFTER_OF_ID, after_of.as_ref().map(NodeId::as_str));
            element.set_opt(BEFORE_OF_ID, before_of.as_ref().map(NodeId::as_str));
        }
        TailoringOperation::MoveFragment {
            starting_node_id,
            ending_node_id,
            after_of,
            before_of,
        } => {
            element.set(STARTING_NODE_ID, starting_node_id.as_str());
            element.set(ENDING_NODE_ID, ending_node_id.as_str());
            element.set_opt(AFTER_OF_ID, after_of.as_ref().map(NodeId::as_str));
            element.set_opt(BEFORE_OF_ID, before_of.as_ref().map(NodeId::as_str));
        }
        TailoringOperation::Split { task_id, .. } => {
            element.set(TASK_ID, task_id.as_str());
        }
        TailoringOperation::Insert {
            after_of,
            before_of,
            ..
        } => {
            element.set_opt(AFTER_OF_ID, after_of.as_ref().map(NodeId::as_str));
            element.set_opt(BEFORE_OF_ID, before_of.as_ref().map(NodeId::as_str));
        }
        TailoringOperation::ConditionalInsert {
            after_of,
            before_of,
            condition,
            in_loop,
            ..
        } => {
            element.set(AFTER_OF_ID, after_of.as_str());
            element.set(BEFORE_OF_ID, before_of.as_str());
            element.set(CONDITION, condition.as_str());
            element.set(IN_LOOP, in_loop.to_string());
        }
    }
}

/// Read a log back from its document representation.
///
/// Extension elements from other namespaces are ignored.
pub fn model_to_log(model: &Model, namespace: &str) -> JournalResult<OperationLog> {
    let process = model
        .process()
        .ok_or_else(|| JournalError::invalid_format("log document has no process"))?;

    let mut records = Vec::new();
    for element in process.extensions() {
        if element.namespace == namespace {
            records.push(read_record(element, None)?);
        }
    }
    for node in process.nodes() {
        let Some(body) = node.kind.body() else {
            continue;
        };
        let mut graph = body.clone();
        let (elements, foreign): (Vec<ExtensionElement>, Vec<ExtensionElement>) = graph
            .take_extensions()
            .into_iter()
            .partition(|e| e.namespace == namespace);
        for extension in foreign {
            graph.add_extension(extension);
        }
        match elements.as_slice() {
            [] => {}
            [element] => {
                let parent = attr(element, PARENT_ID)?;
                if parent != node.id.as_str() {
                    return Err(JournalError::invalid_format(format!(
                        "container {} declares parent {}",
                        node.id, parent
                    )));
                }
                let graph = unprefixed(&graph, node.id.as_str())?;
                records.push(read_record(element, Some(graph))?);
            }
            _ => {
                return Err(JournalError::invalid_format(format!(
                    "container {} holds more than one operation",
                    node.id
                )))
            }
        }
    }

    records.sort_by_key(|r| r.order);
    let log = OperationLog::from_records(records)?;
    if log.new_process_id() != process.id() {
        return Err(JournalError::invalid_format(format!(
            "extend record names process {}, document holds {}",
            log.new_process_id(),
            process.id()
        )));
    }
    Ok(log)
}

/// Strip the container prefix from every id of a container body.
fn unprefixed(graph: &ProcessGraph, container: &str) -> JournalResult<ProcessGraph> {
    let prefix = format!("{}_", container);
    Ok(relabel(graph, |id| {
        id.strip_prefix(prefix.as_str())
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                TailorError::invalid_argument(format!(
                    "{} does not carry the prefix of container {}",
                    id, container
                ))
            })
    })?)
}

fn attr<'e>(element: &'e ExtensionElement, key: &str) -> JournalResult<&'e str> {
    element
        .get(key)
        .ok_or_else(|| JournalError::missing_attribute(element.name.as_str(), key))
}

fn node_attr(element: &ExtensionElement, key: &str) -> JournalResult<NodeId> {
    attr(element, key).map(NodeId::new)
}

fn optional_node_attr(element: &ExtensionElement, key: &str) -> Option<NodeId> {
    element.get(key).map(NodeId::new)
}

fn read_record(
    element: &ExtensionElement,
    graph: Option<ProcessGraph>,
) -> JournalResult<OperationRecord> {
    let order: Order = attr(element, ORDER)?.parse().map_err(|_| {
        JournalError::invalid_format(format!("{}: order is not a number", element.name))
    })?;

    let name = element.name.as_str();
    let require_graph = |graph: Option<ProcessGraph>| {
        graph.ok_or_else(|| {
            JournalError::invalid_format(format!("{} at order {} carries no graph", name, order))
        })
    };
    let payload = |graph: Option<ProcessGraph>| -> JournalResult<Payload> {
        read_payload(element, require_graph(graph)?)
    };

    let op = match name {
        "extend" => TailoringOperation::Extend {
            base_process_id: attr(element, BASE_PROCESS_ID)?.to_string(),
            new_process_id: attr(element, NEW_PROCESS_ID)?.to_string(),
        },
        "suppress" => TailoringOperation::Suppress {
            node_id: node_attr(element, NODE_ID)?,
        },
        "rename" => TailoringOperation::Rename {
            element_id: node_attr(element, ELEMENT_ID)?,
            new_name: attr(element, NEW_NAME)?.to_string(),
        },
        "modify" => TailoringOperation::Modify {
            modified_id: attr(element, MODIFIED_ID)?.to_string(),
            property: attr(element, PROPERTY)?.to_string(),
            value: attr(element, VALUE)?.to_string(),
        },
        "delete" => TailoringOperation::DeleteNode {
            node_id: node_attr(element, NODE_ID)?,
        },
        "deleteFragment" => TailoringOperation::DeleteFragment {
            starting_node_id: node_attr(element, STARTING_NODE_ID)?,
            ending_node_id: node_attr(element, ENDING_NODE_ID)?,
        },
        "replace" => TailoringOperation::ReplaceNode {
            replaced_node_id: node_attr(element, REPLACED_NODE_ID)?,
            payload: payload(graph)?,
        },
        "replaceFragment" => TailoringOperation::ReplaceFragment {
            starting_node_id: node_attr(element, STARTING_NODE_ID)?,
            ending_node_id: node_attr(element, ENDING_NODE_ID)?,
            payload: payload(graph)?,
        },
        "move" => TailoringOperation::MoveNode {
            node_id: node_attr(element, NODE_ID)?,
            after_of: optional_node_attr(element, AFTER_OF_ID),
            before_of: optional_node_attr(element, BEFORE_OF_ID),
        },
        "moveFragment" => TailoringOperation::MoveFragment {
            starting_node_id: node_attr(element, STARTING_NODE_ID)?,
            ending_node_id: node_attr(element, ENDING_NODE_ID)?,
            after_of: optional_node_attr(element, AFTER_OF_ID),
            before_of: optional_node_attr(element, BEFORE_OF_ID),
        },
        "parallelize" => TailoringOperation::Parallelize {
            starting_node_id: node_attr(element, STARTING_NODE_ID)?,
            ending_node_id: node_attr(element, ENDING_NODE_ID)?,
        },
        "split" => {
            let mut body = require_graph(graph)?;
            if let Some(scope) = element.get(SCOPE_ID) {
                body.set_id(scope);
            }
            let model_id = element.get(MODEL_ID).unwrap_or(body.id()).to_string();
            TailoringOperation::Split {
                task_id: node_attr(element, TASK_ID)?,
                sub_model: Model::with_process(model_id, body),
            }
        }
        "insert" => TailoringOperation::Insert {
            after_of: optional_node_attr(element, AFTER_OF_ID),
            before_of: optional_node_attr(element, BEFORE_OF_ID),
            payload: payload(graph)?,
        },
        "conditionalInsert" => TailoringOperation::ConditionalInsert {
            after_of: node_attr(element, AFTER_OF_ID)?,
            before_of: node_attr(element, BEFORE_OF_ID)?,
            condition: attr(element, CONDITION)?.to_string(),
            in_loop: match attr(element, IN_LOOP)? {
                "true" => true,
                "false" => false,
                other => {
                    return Err(JournalError::invalid_format(format!(
                        "inLoop must be true or false, got {}",
                        other
                    )))
                }
            },
            payload: payload(graph)?,
        },
        other => return Err(JournalError::unknown_operation(other)),
    };
    Ok(OperationRecord::new(order, op))
}

/// Rebuild a payload from its container body.
///
/// Bodies without a recorded variant are classified by shape.
fn read_payload(element: &ExtensionElement, mut graph: ProcessGraph) -> JournalResult<Payload> {
    match element.get(PAYLOAD_KIND) {
        None => Ok(Payload::from_graph(graph)?),
        Some(NODE_PAYLOAD) => {
            let mut nodes = graph.nodes();
            match (nodes.next(), nodes.next()) {
                (Some(node), None) if graph.flow_count() == 0 => Ok(Payload::Node(node.clone())),
                _ => Err(JournalError::invalid_format(format!(
                    "{} node payload must hold exactly one node",
                    element.name
                ))),
            }
        }
        Some(FRAGMENT_PAYLOAD) => {
            if let Some(scope) = element.get(SCOPE_ID) {
                graph.set_id(scope);
            }
            let start = node_attr(element, PAYLOAD_START_ID)?;
            let end = node_attr(element, PAYLOAD_END_ID)?;
            Ok(Payload::Fragment(ForeignFragment::from_graph(&graph, start, end)?))
        }
        Some(other) => Err(JournalError::invalid_format(format!(
            "{}: unknown payload kind {}",
            element.name, other
        ))),
    }
}
