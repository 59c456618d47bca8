//! Ways of naming a node.

use bpmnt_core::NodeId;
use bpmnt_graph::FlowNode;

/// Anything that names a flow node.
pub trait NodeRef {
    fn node_id(&self) -> &str;
}

impl NodeRef for str {
    fn node_id(&self) -> &str {
        self
    }
}

impl NodeRef for String {
    fn node_id(&self) -> &str {
        self.as_str()
    }
}

impl NodeRef for NodeId {
    fn node_id(&self) -> &str {
        self.as_str()
    }
}

impl NodeRef for FlowNode {
    fn node_id(&self) -> &str {
        self.id.as_str()
    }
}

impl<T: NodeRef + ?Sized> NodeRef for &T {
    fn node_id(&self) -> &str {
        (**self).node_id()
    }
}
