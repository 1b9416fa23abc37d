//! # PAE: Per-tick Automation Engine
//!
//! A small dataflow engine for hobby automation. Signal-processing nodes
//! (trackers, filters, arithmetic, oscillators, timers) are wired into a
//! graph and evaluated once per tick.
//!
//! ## Architecture
//!
//! - **Graph**: nodes, the link phase resolving references, the tick loop
//! - **Config**: TOML graph files and run settings
//! - **Runner**: drives a motor at a fixed interval
//!
//! ## Example
//!
//! ```
//! use pae::graph::{Motor, Node, Operation};
//!
//! let mut motor = Motor::new();
//! let square = motor.add_node(Node::new("square", Operation::square(2.0)));
//! motor.add_node(Node::new("edges", Operation::Counter).with_source(square));
//! motor.initiate().unwrap();
//!
//! for _ in 0..8 {
//!     motor.update().unwrap();
//! }
//! assert_eq!(motor.get("edges").unwrap().value(), 2.0);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod runner;

// Re-export commonly used types
pub use config::{GraphFile, NodeConfig, RunSettings};
pub use error::{PaeError, Result};
pub use graph::{GraphError, Motor, Node, NodeId, OpKind, Operation};
pub use runner::Runner;
