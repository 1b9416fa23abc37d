//! Plain-text status table, one line per node.

use crate::graph::id::NodeId;
use crate::graph::motor::Motor;
use crate::graph::node::Node;
use std::fmt;

/// Renders a motor as a fixed-width table.
///
/// Columns: name, id, kind, value, `E`/`D` for enabled/disabled, and `SD`
/// when the node's source is disabled.
pub struct StatusTable<'a> {
    motor: &'a Motor,
    header: bool,
}

impl<'a> StatusTable<'a> {
    pub fn new(motor: &'a Motor) -> Self {
        Self {
            motor,
            header: false,
        }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// One status line for `node`.
pub fn status_line(node: &Node, source_enabled: bool) -> String {
    let enabled = if node.is_enabled() { "E" } else { "D" };
    let source = if source_enabled { "  " } else { "SD" };
    format!(
        "{:24} {:10} {:16} {:10.3}  {:1} {:2}",
        node.name(),
        node.id(),
        node.kind().name(),
        node.value(),
        enabled,
        source
    )
}

impl fmt::Display for StatusTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.header {
            writeln!(
                f,
                "{:24} {:10} {:16} {:>10}  {:1} {:2}",
                "Name", "Id", "Kind", "Value", "S", "Src"
            )?;
        }
        for (idx, node) in self.motor.nodes().iter().enumerate() {
            let source_enabled = self.motor.source_enabled(NodeId::from_index(idx));
            writeln!(f, "{}", status_line(node, source_enabled))?;
        }
        Ok(())
    }
}
