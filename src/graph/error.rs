//! Engine error types.
//!
//! Everything here is raised while building or linking a graph. A linked
//! graph ticks without errors.

use crate::graph::id::NodeId;
use crate::graph::op_kind::OpKind;
use thiserror::Error;

/// Errors that can occur while wiring, linking or driving a motor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{node}': {parameter} refers to unknown node '{target}'")]
    UnresolvedReference {
        node: String,
        parameter: &'static str,
        target: String,
    },

    #[error("Node '{node}': {parameter} refers to {handle}, which is not in the graph")]
    UnknownHandle {
        node: String,
        parameter: &'static str,
        handle: NodeId,
    },

    #[error("Node '{node}': {kind} requires a source node")]
    MissingSource { node: String, kind: OpKind },

    #[error("Node '{node}': {kind} has no defined behavior yet")]
    Unsupported { node: String, kind: OpKind },

    #[error("Node '{node}': divider is a literal zero")]
    DivisionByZero { node: String },

    #[error("Node '{node}': invalid {parameter}: {reason}")]
    InvalidParameter {
        node: String,
        parameter: &'static str,
        reason: String,
    },

    #[error("No node with handle {0}")]
    UnknownNode(NodeId),

    #[error("Node '{node}' is a {kind} node and cannot be triggered")]
    NotTriggerable { node: String, kind: OpKind },

    #[error("Graph has not been linked")]
    NotLinked,
}

pub type GraphResult<T> = std::result::Result<T, GraphError>;
