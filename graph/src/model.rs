//! Document model.
//!
//! A `Model` stands for a parsed BPMN definitions document: an id plus the
//! top-level processes it declares.

use std::collections::HashSet;

use bpmnt_core::{TailorError, TailorResult};

use crate::{FlowNode, ProcessGraph};

/// A BPMN document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    id: String,
    processes: Vec<ProcessGraph>,
}

impl Model {
    /// Create an empty document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            processes: Vec::new(),
        }
    }

    /// Create a document holding a single process.
    pub fn with_process(id: impl Into<String>, process: ProcessGraph) -> Self {
        Self {
            id: id.into(),
            processes: vec![process],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Add a top-level process. Ids must stay unique across the document.
    pub fn add_process(&mut self, process: ProcessGraph) -> TailorResult<()> {
        let existing = self.all_ids();
        if existing.contains(process.id()) {
            return Err(TailorError::duplicate(process.id()));
        }
        if let Some(id) = process.all_ids().into_iter().find(|id| existing.contains(id)) {
            return Err(TailorError::duplicate(id));
        }
        self.processes.push(process);
        Ok(())
    }

    /// The first top-level process.
    pub fn process(&self) -> Option<&ProcessGraph> {
        self.processes.first()
    }

    /// Mutable access to the first top-level process.
    pub fn process_mut(&mut self) -> Option<&mut ProcessGraph> {
        self.processes.first_mut()
    }

    /// A top-level process by id.
    pub fn process_by_id(&self, id: &str) -> Option<&ProcessGraph> {
        self.processes.iter().find(|p| p.id() == id)
    }

    pub fn processes(&self) -> &[ProcessGraph] {
        &self.processes
    }

    /// The scope that owns a node, searching every process.
    pub fn scope_of(&self, node_id: &str) -> Option<&ProcessGraph> {
        self.processes.iter().find_map(|p| p.scope_of(node_id))
    }

    /// Mutable access to the scope that owns a node.
    pub fn scope_of_mut(&mut self, node_id: &str) -> Option<&mut ProcessGraph> {
        self.processes
            .iter_mut()
            .find_map(|p| p.scope_of_mut(node_id))
    }

    /// Mutable access to the scope that owns a flow.
    pub fn scope_of_flow_mut(&mut self, flow_id: &str) -> Option<&mut ProcessGraph> {
        self.processes
            .iter_mut()
            .find_map(|p| p.scope_of_flow_mut(flow_id))
    }

    /// Find a node anywhere in the document.
    pub fn find_node(&self, node_id: &str) -> Option<&FlowNode> {
        self.scope_of(node_id).and_then(|s| s.get_node(node_id))
    }

    /// Find a node anywhere in the document, failing with `ElementNotFound`.
    pub fn node(&self, node_id: &str) -> TailorResult<&FlowNode> {
        self.find_node(node_id)
            .ok_or_else(|| TailorError::not_found(node_id))
    }

    /// Ids of every process, node and flow in the document.
    pub fn all_ids(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        for process in &self.processes {
            ids.insert(process.id().to_string());
            ids.extend(process.all_ids());
        }
        ids
    }

    /// Whether an element with this id exists anywhere in the document.
    pub fn contains_id(&self, id: &str) -> bool {
        self.processes
            .iter()
            .any(|p| p.id() == id || p.contains_id(id))
    }

    /// Total number of flow nodes across all scopes.
    pub fn node_count(&self) -> usize {
        fn count(graph: &ProcessGraph) -> usize {
            graph
                .nodes()
                .map(|n| 1 + n.kind.body().map(count).unwrap_or(0))
                .sum()
        }
        self.processes.iter().map(count).sum()
    }
}
