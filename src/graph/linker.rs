use super::error::{GraphError, GraphResult};
use super::id::NodeId;
use super::link_report::LinkReport;
use super::node::{Node, Wiring};
use super::op_kind::OpKind;
use super::operation::Operation;
use super::param::{Input, NodeRef, Param};
use std::collections::HashMap;

/// Resolves node references into wiring.
pub struct Linker;

impl Linker {
    /// Resolve every source and parameter reference of `nodes`.
    ///
    /// Textual ids resolve to the first node carrying that id; handles are
    /// range-checked. Nothing is modified here: the caller commits the
    /// returned wiring only when every node linked, so a failed pass
    /// leaves the graph as it was.
    ///
    /// # Returns
    /// One `Wiring` per node, in node order, plus a `LinkReport`
    pub(crate) fn link(nodes: &[Node]) -> GraphResult<(Vec<Wiring>, LinkReport)> {
        let start_time = std::time::Instant::now();

        let (index, duplicate_ids) = Self::build_index(nodes);

        let mut wirings = Vec::with_capacity(nodes.len());
        let mut sourced_nodes = 0;
        let mut resolved_references = 0;

        for node in nodes {
            let source = node
                .source()
                .map(|r| Self::resolve(node, "source", r, &index, nodes.len()))
                .transpose()?;

            let kind = node.kind();
            if kind.requires_source() && source.is_none() {
                return Err(GraphError::MissingSource {
                    node: node.id().to_string(),
                    kind,
                });
            }
            if kind == OpKind::RateLimit {
                return Err(GraphError::Unsupported {
                    node: node.id().to_string(),
                    kind,
                });
            }

            let operation = node.operation().try_map(|parameter, input| match input {
                Input::Value(v) => Ok(Param::Value(*v)),
                Input::Ref(r) => {
                    Self::resolve(node, parameter, r, &index, nodes.len()).map(Param::Node)
                }
            })?;

            Self::validate(node, &operation)?;

            if source.is_some() {
                sourced_nodes += 1;
            }
            resolved_references += operation
                .params()
                .iter()
                .filter(|(_, p)| matches!(p, Param::Node(_)))
                .count();

            wirings.push(Wiring { source, operation });
        }

        let report = LinkReport {
            total_nodes: nodes.len(),
            sourced_nodes,
            resolved_references,
            duplicate_ids,
            link_time_us: start_time.elapsed().as_micros() as u64,
        };

        Ok((wirings, report))
    }

    /// Map ids to the first node declaring them, collecting duplicates.
    fn build_index(nodes: &[Node]) -> (HashMap<&str, NodeId>, Vec<String>) {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut duplicates = Vec::new();

        for (idx, node) in nodes.iter().enumerate() {
            if index.contains_key(node.id()) {
                if !duplicates.iter().any(|d| d == node.id()) {
                    duplicates.push(node.id().to_string());
                }
            } else {
                index.insert(node.id(), NodeId::from_index(idx));
            }
        }

        (index, duplicates)
    }

    fn resolve(
        node: &Node,
        parameter: &'static str,
        reference: &NodeRef,
        index: &HashMap<&str, NodeId>,
        len: usize,
    ) -> GraphResult<NodeId> {
        match reference {
            NodeRef::Id(target) => {
                index
                    .get(target.as_str())
                    .copied()
                    .ok_or_else(|| GraphError::UnresolvedReference {
                        node: node.id().to_string(),
                        parameter,
                        target: target.clone(),
                    })
            }
            NodeRef::Handle(handle) => {
                if handle.is_valid() && handle.index() < len {
                    Ok(*handle)
                } else {
                    Err(GraphError::UnknownHandle {
                        node: node.id().to_string(),
                        parameter,
                        handle: *handle,
                    })
                }
            }
        }
    }

    /// Reject literal parameters that can never evaluate sensibly.
    fn validate(node: &Node, operation: &Operation<Param>) -> GraphResult<()> {
        let invalid = |parameter: &'static str, reason: &str| GraphError::InvalidParameter {
            node: node.id().to_string(),
            parameter,
            reason: reason.to_string(),
        };

        for (parameter, param) in operation.params() {
            if let Param::Value(v) = param {
                if !v.is_finite() {
                    return Err(invalid(parameter, "must be a finite number"));
                }
            }
        }

        match operation {
            Operation::Division {
                divider: Param::Value(v),
            } if *v == 0.0 => Err(GraphError::DivisionByZero {
                node: node.id().to_string(),
            }),
            Operation::Average { window: 0 } => Err(invalid("window", "must be at least 1")),
            Operation::Square {
                period: Param::Value(v),
            } if *v <= 0.0 => Err(invalid("period", "must be positive")),
            Operation::Square {
                period: Param::Value(v),
            } if v.fract() != 0.0 => Err(invalid("period", "must be a whole number of ticks")),
            _ => Ok(()),
        }
    }
}
