/// Summary of a successful link pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkReport {
    /// Number of nodes in the graph.
    pub total_nodes: usize,

    /// Nodes fed by an upstream source.
    pub sourced_nodes: usize,

    /// Parameters (excluding sources) that point at another node.
    pub resolved_references: usize,

    /// Ids declared more than once; lookups resolve to the first.
    pub duplicate_ids: Vec<String>,

    /// Link time in microseconds
    pub link_time_us: u64,
}

impl LinkReport {
    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.total_nodes == 0
    }
}
