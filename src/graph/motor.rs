//! Motor: the node graph and its tick loop.
//!
//! Lifecycle:
//! 1. Add nodes in the order they should evaluate.
//! 2. `initiate()` once to resolve every reference.
//! 3. `update()` once per tick; each node sees the values that nodes
//!    earlier in the list produced during the same tick.
//!
//! Evaluation order is insertion order. Nothing reorders nodes by their
//! dependencies.

use crate::graph::error::{GraphError, GraphResult};
use crate::graph::id::NodeId;
use crate::graph::link_report::LinkReport;
use crate::graph::linker::Linker;
use crate::graph::node::Node;
use crate::graph::op_kind::OpKind;
use crate::graph::operation::Operation;
use crate::graph::param::NodeRef;
use serde::{Deserialize, Serialize};

/// Serializable view of one node after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub kind: OpKind,
    pub value: f64,
    pub enabled: bool,
    pub invalid: bool,
}

/// The node graph.
#[derive(Debug, Default)]
pub struct Motor {
    nodes: Vec<Node>,
    /// Seed for `Random` nodes; each node gets `seed + index`.
    seed: Option<u64>,
    tick: u64,
}

impl Motor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Motor whose `Random` nodes produce a reproducible sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    // ── Graph building ──

    /// Append a node. Returns its handle.
    ///
    /// Adding a node invalidates any earlier link.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        if let Some(seed) = self.seed {
            node.reseed(seed.wrapping_add(id.0 as u64));
        }
        self.nodes.push(node);
        for node in &mut self.nodes {
            node.clear_wiring();
        }
        id
    }

    /// Handle of the first node with `id`.
    pub fn find_node(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id() == id)
            .map(NodeId::from_index)
    }

    pub fn node(&self, handle: NodeId) -> Option<&Node> {
        self.nodes.get(handle.index())
    }

    pub fn node_mut(&mut self, handle: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(handle.index())
    }

    /// First node with `id`.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of completed ticks.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// True when every node carries resolved wiring.
    pub fn is_linked(&self) -> bool {
        self.nodes.iter().all(Node::is_linked)
    }

    // ── Link phase ──

    /// Resolve every reference in the graph.
    ///
    /// Either every node is linked or none is changed. Calling this again
    /// produces the same wiring.
    pub fn initiate(&mut self) -> GraphResult<LinkReport> {
        let (wirings, report) = Linker::link(&self.nodes)?;

        for (node, wiring) in self.nodes.iter_mut().zip(wirings) {
            node.set_wiring(wiring);
        }

        tracing::info!(
            "Graph linked: {} nodes, {} sourced, {} parameter references ({} us)",
            report.total_nodes,
            report.sourced_nodes,
            report.resolved_references,
            report.link_time_us,
        );
        for id in &report.duplicate_ids {
            tracing::warn!("Node id '{}' is declared more than once; using the first", id);
        }

        Ok(report)
    }

    // ── Tick phase ──

    /// Evaluate every node once, in insertion order.
    ///
    /// Fails with `NotLinked` before touching any node if a single node
    /// lacks wiring, so a tick is either complete or not run at all.
    pub fn update(&mut self) -> GraphResult<()> {
        if !self.is_linked() {
            return Err(GraphError::NotLinked);
        }

        for idx in 0..self.nodes.len() {
            let node = &self.nodes[idx];
            let Some(wiring) = node.wiring().filter(|_| node.is_enabled()) else {
                continue;
            };
            let source = wiring.source.map(|s| self.nodes[s.index()].value());
            let operation: Operation<f64> = wiring.operation.map(|p| p.get(&self.nodes));

            self.nodes[idx].evaluate(source, &operation);
        }

        self.tick += 1;
        Ok(())
    }

    // ── Node control ──

    fn node_or_err(&mut self, handle: NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(handle.index())
            .ok_or(GraphError::UnknownNode(handle))
    }

    pub fn set_enabled(&mut self, handle: NodeId, enabled: bool) -> GraphResult<()> {
        let node = self.node_or_err(handle)?;
        tracing::debug!(
            "Node '{}' {}",
            node.id(),
            if enabled { "enabled" } else { "disabled" }
        );
        node.enable(enabled);
        Ok(())
    }

    /// Queue a one-shot value for the node's next tick.
    pub fn push_value(&mut self, handle: NodeId, value: f64) -> GraphResult<()> {
        let node = self.node_or_err(handle)?;
        tracing::debug!("Pushing {} into node '{}'", value, node.id());
        node.set_value(value);
        Ok(())
    }

    /// Restart a countdown timer on its next tick.
    pub fn trigger(&mut self, handle: NodeId) -> GraphResult<()> {
        let node = self.node_or_err(handle)?;
        if node.trigger() {
            tracing::debug!("Triggered timer '{}'", node.id());
            Ok(())
        } else {
            Err(GraphError::NotTriggerable {
                node: node.id().to_string(),
                kind: node.kind(),
            })
        }
    }

    /// True if the node has no source or its source is enabled.
    pub fn source_enabled(&self, handle: NodeId) -> bool {
        let Some(node) = self.node(handle) else {
            return true;
        };
        let source = node.linked_source().or_else(|| match node.source() {
            Some(NodeRef::Id(id)) => self.find_node(id),
            Some(NodeRef::Handle(h)) => Some(*h),
            None => None,
        });
        source
            .and_then(|s| self.node(s))
            .map_or(true, Node::is_enabled)
    }

    /// Per-node values for display or export.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.nodes
            .iter()
            .map(|n| NodeSnapshot {
                id: n.id().to_string(),
                name: n.name().to_string(),
                unit: n.unit().to_string(),
                kind: n.kind(),
                value: n.value(),
                enabled: n.is_enabled(),
                invalid: n.is_invalid(),
            })
            .collect()
    }
}
