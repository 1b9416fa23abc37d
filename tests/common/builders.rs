//! Test data builders for creating test graphs

use pae::graph::{Input, Motor, Node, Operation};

/// Builder for a linked motor with an `in` node feeding other nodes.
pub struct ChainBuilder {
    nodes: Vec<Node>,
    seed: Option<u64>,
}

impl ChainBuilder {
    /// Start with a pass-through `in` node that tests push values into.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("in", Operation::Normal)],
            seed: None,
        }
    }

    /// Add a node fed by `in`.
    pub fn then(mut self, id: &str, operation: Operation<Input>) -> Self {
        self.nodes.push(Node::new(id, operation).with_source("in"));
        self
    }

    /// Add a node exactly as given.
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build and link.
    pub fn build(self) -> Motor {
        let mut motor = match self.seed {
            Some(seed) => Motor::with_seed(seed),
            None => Motor::new(),
        };
        for node in self.nodes {
            motor.add_node(node);
        }
        motor.initiate().expect("test graph links");
        motor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_builder() {
        let motor = ChainBuilder::new()
            .then("double", Operation::multiply(2.0))
            .build();

        assert_eq!(motor.len(), 2);
        assert!(motor.is_linked());
    }
}
