//! Deterministic id allocation for generated elements.

use std::collections::HashSet;

use bpmnt_core::{FlowId, NodeId};
use bpmnt_graph::Model;

/// Allocates gateway and flow ids for one edit.
///
/// Ids are `Gateway_<order>_<n>` and `Flow_<order>_<n>`, skipping anything
/// already used in the document, so replaying the same edits on the same
/// base yields the same ids.
#[derive(Debug, Clone)]
pub struct ElementIds {
    order: u64,
    gateways: u32,
    flows: u32,
    taken: HashSet<String>,
}

impl ElementIds {
    pub fn new(order: u64, taken: HashSet<String>) -> Self {
        Self {
            order,
            gateways: 0,
            flows: 0,
            taken,
        }
    }

    /// Allocator seeded with every id of the document.
    pub fn for_model(model: &Model, order: u64) -> Self {
        Self::new(order, model.all_ids())
    }

    pub fn order(&self) -> u64 {
        self.order
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Mark an id as used.
    pub fn reserve(&mut self, id: impl Into<String>) {
        self.taken.insert(id.into());
    }

    /// Next free gateway id.
    pub fn gateway(&mut self) -> NodeId {
        loop {
            self.gateways += 1;
            let id = format!("Gateway_{}_{}", self.order, self.gateways);
            if self.taken.insert(id.clone()) {
                return NodeId::new(id);
            }
        }
    }

    /// Next free flow id.
    pub fn flow(&mut self) -> FlowId {
        loop {
            self.flows += 1;
            let id = format!("Flow_{}_{}", self.order, self.flows);
            if self.taken.insert(id.clone()) {
                return FlowId::new(id);
            }
        }
    }

    /// Keep `preferred` if it is free, otherwise allocate a new flow id.
    pub fn flow_or_fresh(&mut self, preferred: &FlowId) -> FlowId {
        if self.taken.insert(preferred.to_string()) {
            preferred.clone()
        } else {
            self.flow()
        }
    }
}
