//! Operation log entry types.

use bpmnt_core::NodeId;
use bpmnt_graph::{Model, Payload};

/// Execution order of an operation. The extend record has order 0.
pub type Order = u64;

/// One tailoring operation, with everything needed to replay it.
///
/// Optional anchors are kept exactly as the caller passed them; inference
/// of a missing anchor happens again on replay.
#[derive(Debug, Clone, PartialEq)]
pub enum TailoringOperation {
    /// Start of a tailoring session.
    Extend {
        base_process_id: String,
        new_process_id: String,
    },

    /// Remove a node without healing.
    Suppress { node_id: NodeId },

    /// Set a node's name.
    Rename { element_id: NodeId, new_name: String },

    /// Set a node attribute or flow condition.
    Modify {
        modified_id: String,
        property: String,
        value: String,
    },

    /// Delete a node.
    DeleteNode { node_id: NodeId },

    /// Delete a fragment.
    DeleteFragment {
        starting_node_id: NodeId,
        ending_node_id: NodeId,
    },

    /// Replace a node by a payload.
    ReplaceNode {
        replaced_node_id: NodeId,
        payload: Payload,
    },

    /// Replace a fragment by a payload.
    ReplaceFragment {
        starting_node_id: NodeId,
        ending_node_id: NodeId,
        payload: Payload,
    },

    /// Move a node.
    MoveNode {
        node_id: NodeId,
        after_of: Option<NodeId>,
        before_of: Option<NodeId>,
    },

    /// Move a fragment.
    MoveFragment {
        starting_node_id: NodeId,
        ending_node_id: NodeId,
        after_of: Option<NodeId>,
        before_of: Option<NodeId>,
    },

    /// Put a fragment on parallel branches.
    Parallelize {
        starting_node_id: NodeId,
        ending_node_id: NodeId,
    },

    /// Turn a task into a sub-process.
    Split { task_id: NodeId, sub_model: Model },

    /// Insert a payload.
    Insert {
        after_of: Option<NodeId>,
        before_of: Option<NodeId>,
        payload: Payload,
    },

    /// Insert a payload on a conditional branch or loop.
    ConditionalInsert {
        after_of: NodeId,
        before_of: NodeId,
        payload: Payload,
        condition: String,
        in_loop: bool,
    },
}

impl TailoringOperation {
    /// Extension element name of this operation.
    pub fn element_name(&self) -> &'static str {
        match self {
            TailoringOperation::Extend { .. } => "extend",
            TailoringOperation::Suppress { .. } => "suppress",
            TailoringOperation::Rename { .. } => "rename",
            TailoringOperation::Modify { .. } => "modify",
            TailoringOperation::DeleteNode { .. } => "delete",
            TailoringOperation::DeleteFragment { .. } => "deleteFragment",
            TailoringOperation::ReplaceNode { .. } => "replace",
            TailoringOperation::ReplaceFragment { .. } => "replaceFragment",
            TailoringOperation::MoveNode { .. } => "move",
            TailoringOperation::MoveFragment { .. } => "moveFragment",
            TailoringOperation::Parallelize { .. } => "parallelize",
            TailoringOperation::Split { .. } => "split",
            TailoringOperation::Insert { .. } => "insert",
            TailoringOperation::ConditionalInsert { .. } => "conditionalInsert",
        }
    }

    /// Payload contributed by this operation, if any.
    pub fn payload(&self) -> Option<&Payload> {
        match self {
            TailoringOperation::ReplaceNode { payload, .. }
            | TailoringOperation::ReplaceFragment { payload, .. }
            | TailoringOperation::Insert { payload, .. }
            | TailoringOperation::ConditionalInsert { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Whether the operation carries a graph (payload or sub-model).
    pub fn carries_graph(&self) -> bool {
        self.payload().is_some() || matches!(self, TailoringOperation::Split { .. })
    }

    pub fn is_extend(&self) -> bool {
        matches!(self, TailoringOperation::Extend { .. })
    }
}

/// An operation with its execution order.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// Execution order.
    pub order: Order,
    /// The operation.
    pub op: TailoringOperation,
}

impl OperationRecord {
    /// Create a new record.
    pub fn new(order: Order, op: TailoringOperation) -> Self {
        Self { order, op }
    }
}
