//! Parameter values: literals or references to other nodes.
//!
//! Before linking a parameter is an [`Input`], which may name another node
//! by its textual id. Linking turns every `Input` into a [`Param`], which
//! only ever holds a literal or a resolved [`NodeId`].

use crate::graph::id::NodeId;
use crate::graph::node::Node;

/// A reference to another node, by id string or by handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Id(String),
    Handle(NodeId),
}

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        NodeRef::Id(id.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(id: String) -> Self {
        NodeRef::Id(id)
    }
}

impl From<NodeId> for NodeRef {
    fn from(handle: NodeId) -> Self {
        NodeRef::Handle(handle)
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Id(id) => write!(f, "{}", id),
            NodeRef::Handle(handle) => write!(f, "{}", handle),
        }
    }
}

/// Unlinked parameter as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Value(f64),
    Ref(NodeRef),
}

impl Input {
    /// The literal value, if this input is not a reference.
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Input::Value(v) => Some(*v),
            Input::Ref(_) => None,
        }
    }
}

impl From<f64> for Input {
    fn from(value: f64) -> Self {
        Input::Value(value)
    }
}

impl From<&str> for Input {
    fn from(id: &str) -> Self {
        Input::Ref(NodeRef::from(id))
    }
}

impl From<String> for Input {
    fn from(id: String) -> Self {
        Input::Ref(NodeRef::Id(id))
    }
}

impl From<NodeId> for Input {
    fn from(handle: NodeId) -> Self {
        Input::Ref(NodeRef::Handle(handle))
    }
}

/// Linked parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param {
    Value(f64),
    Node(NodeId),
}

impl Param {
    /// Current value: the literal, or the referenced node's value right now.
    #[inline]
    pub fn get(&self, nodes: &[Node]) -> f64 {
        match *self {
            Param::Value(v) => v,
            Param::Node(id) => nodes[id.index()].value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_conversions() {
        assert_eq!(Input::from(2.5), Input::Value(2.5));
        assert_eq!(Input::from("gain"), Input::Ref(NodeRef::Id("gain".into())));
        assert_eq!(Input::from(NodeId(4)), Input::Ref(NodeRef::Handle(NodeId(4))));
        assert_eq!(Input::from(2.5).as_value(), Some(2.5));
        assert_eq!(Input::from("gain").as_value(), None);
    }

    #[test]
    fn test_param_reads_node_value() {
        let mut node = Node::new("a", crate::graph::Operation::Normal);
        node.set_value(7.0);
        node.evaluate(None, &crate::graph::Operation::Normal);
        let nodes = vec![node];
        assert_eq!(Param::Value(1.5).get(&nodes), 1.5);
        assert_eq!(Param::Node(NodeId(0)).get(&nodes), 7.0);
    }
}
