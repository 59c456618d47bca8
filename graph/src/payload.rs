//! Contributions made by insert and replace operations.

use std::collections::HashMap;

use bpmnt_core::{IdStamper, NodeId, TailorError, TailorResult};

use crate::{map_fragment, FlowNode, ProcessGraph, SequenceFlow};

/// A region of a foreign graph, delimited by `start` and `end`.
///
/// The graph is owned, so contributing a fragment never touches the model it
/// was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignFragment {
    pub graph: ProcessGraph,
    pub start: NodeId,
    pub end: NodeId,
}

impl ForeignFragment {
    /// Copy the region `[start, end]` of `source`. Only the region and the
    /// flows inside it are kept; the graph keeps the source scope id.
    pub fn from_graph(
        source: &ProcessGraph,
        start: impl Into<NodeId>,
        end: impl Into<NodeId>,
    ) -> TailorResult<Self> {
        let start = start.into();
        let end = end.into();
        let graph = trim(source, &start, &end)?;
        Ok(Self { graph, start, end })
    }

    /// Reduce the owned graph to the region and the flows inside it.
    pub fn trimmed(&self) -> TailorResult<ProcessGraph> {
        trim(&self.graph, &self.start, &self.end)
    }
}

fn trim(source: &ProcessGraph, start: &NodeId, end: &NodeId) -> TailorResult<ProcessGraph> {
    let fragment = map_fragment(source, start.as_str(), end.as_str())?;
    let mut graph = ProcessGraph::new(source.id());
    for id in fragment.nodes() {
        graph.add_node(source.node(id.as_str())?.clone())?;
    }
    for flow in source.flows() {
        if fragment.contains(flow.source.as_str())
            && fragment.contains(flow.target.as_str())
            && flow.source != *end
        {
            graph.add_flow(flow.clone())?;
        }
    }
    Ok(graph)
}

/// What an insert or replace contributes to the target graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A single new node.
    Node(FlowNode),
    /// A copied region of another graph.
    Fragment(ForeignFragment),
}

impl Payload {
    /// First node the payload is entered through.
    pub fn entry(&self) -> &NodeId {
        match self {
            Payload::Node(node) => &node.id,
            Payload::Fragment(fragment) => &fragment.start,
        }
    }

    /// Last node the payload is left through.
    pub fn exit(&self) -> &NodeId {
        match self {
            Payload::Node(node) => &node.id,
            Payload::Fragment(fragment) => &fragment.end,
        }
    }

    /// The contributed nodes and flows as a standalone scope.
    pub fn to_graph(&self, scope_id: &str) -> TailorResult<ProcessGraph> {
        match self {
            Payload::Node(node) => {
                let mut graph = ProcessGraph::new(scope_id);
                graph.add_node(node.clone())?;
                Ok(graph)
            }
            Payload::Fragment(fragment) => {
                let mut graph = fragment.trimmed()?;
                graph.set_id(scope_id);
                Ok(graph)
            }
        }
    }

    /// Rebuild a payload from a standalone scope produced by [`Payload::to_graph`].
    ///
    /// A scope with a single node and no flows becomes a node payload.
    pub fn from_graph(graph: ProcessGraph) -> TailorResult<Self> {
        if graph.node_count() == 1 && graph.flow_count() == 0 {
            let node = graph
                .nodes()
                .next()
                .cloned()
                .ok_or_else(|| TailorError::inconsistent("payload scope lost its node"))?;
            return Ok(Payload::Node(node));
        }
        let entries: Vec<NodeId> = graph
            .nodes()
            .filter(|n| graph.in_degree(n.id.as_str()) == 0)
            .map(|n| n.id.clone())
            .collect();
        let exits: Vec<NodeId> = graph
            .nodes()
            .filter(|n| graph.out_degree(n.id.as_str()) == 0)
            .map(|n| n.id.clone())
            .collect();
        match (entries.as_slice(), exits.as_slice()) {
            ([start], [end]) => Ok(Payload::Fragment(ForeignFragment {
                start: start.clone(),
                end: end.clone(),
                graph,
            })),
            _ => Err(TailorError::invalid_argument(format!(
                "payload scope {} must have exactly one entry and one exit node",
                graph.id()
            ))),
        }
    }

    /// Ids the payload brings along unchanged: its nodes and everything
    /// inside nested scopes. Top-level flows get fresh ids when copied.
    pub fn contributed_ids(&self) -> TailorResult<Vec<String>> {
        let graph = self.to_graph("")?;
        let mut ids: Vec<String> = graph
            .all_ids()
            .into_iter()
            .filter(|id| graph.get_flow(id).is_none())
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Copy of the payload with every contributed id stamped.
    ///
    /// Used to contribute the same region twice, or a region of the
    /// document being tailored.
    pub fn restamped(&self, stamper: &mut IdStamper) -> TailorResult<Self> {
        let mut stamp = |id: &str| -> TailorResult<String> { Ok(stamper.stamp(id)) };
        match self {
            Payload::Node(node) => {
                let mut renamed = HashMap::new();
                Ok(Payload::Node(relabel_node(node, &mut stamp, &mut renamed)?))
            }
            Payload::Fragment(fragment) => {
                let mut renamed = HashMap::new();
                let graph = relabel_graph(&fragment.trimmed()?, &mut stamp, &mut renamed)?;
                let lookup = |id: &NodeId| renamed_node(&renamed, id);
                Ok(Payload::Fragment(ForeignFragment {
                    start: lookup(&fragment.start)?,
                    end: lookup(&fragment.end)?,
                    graph,
                }))
            }
        }
    }
}

/// Copy of `graph` with every node and flow id, nested ones included,
/// passed through `rename`. The scope id of the copy is left unchanged;
/// nested scopes take the new id of their node.
pub fn relabel<F>(graph: &ProcessGraph, mut rename: F) -> TailorResult<ProcessGraph>
where
    F: FnMut(&str) -> TailorResult<String>,
{
    relabel_graph(graph, &mut rename, &mut HashMap::new())
}

fn renamed_node(renamed: &HashMap<String, String>, id: &NodeId) -> TailorResult<NodeId> {
    renamed
        .get(id.as_str())
        .map(NodeId::new)
        .ok_or_else(|| TailorError::inconsistent(format!("{} was not relabeled", id)))
}

fn relabel_node<F>(
    node: &FlowNode,
    rename: &mut F,
    renamed: &mut HashMap<String, String>,
) -> TailorResult<FlowNode>
where
    F: FnMut(&str) -> TailorResult<String>,
{
    let id = rename(node.id.as_str())?;
    renamed.insert(node.id.as_str().to_string(), id.clone());
    let mut copy = node.clone();
    copy.id = NodeId::new(id.as_str());
    if let Some(body) = copy.kind.body_mut() {
        let mut relabeled = relabel_graph(body, rename, renamed)?;
        relabeled.set_id(id);
        *body = relabeled;
    }
    Ok(copy)
}

fn relabel_graph<F>(
    graph: &ProcessGraph,
    rename: &mut F,
    renamed: &mut HashMap<String, String>,
) -> TailorResult<ProcessGraph>
where
    F: FnMut(&str) -> TailorResult<String>,
{
    let mut copy = ProcessGraph::new(graph.id());
    copy.set_name(graph.name().map(str::to_string));
    for node in graph.nodes() {
        copy.add_node(relabel_node(node, rename, renamed)?)?;
    }
    for flow in graph.flows() {
        let mut relabeled = SequenceFlow::new(
            rename(flow.id.as_str())?,
            renamed_node(renamed, &flow.source)?,
            renamed_node(renamed, &flow.target)?,
        );
        relabeled.condition = flow.condition.clone();
        copy.add_flow(relabeled)?;
    }
    for extension in graph.extensions() {
        copy.add_extension(extension.clone());
    }
    Ok(copy)
}
