//! Node-graph dataflow engine.
//!
//! Nodes hold a value and an operation. A [`Motor`] owns the nodes in an
//! arena, resolves their references once (`initiate`) and then evaluates
//! every node once per tick (`update`), in insertion order.
//!
//! # Example
//!
//! ```
//! use pae::graph::{Motor, Node, Operation};
//!
//! let mut motor = Motor::new();
//! motor.add_node(Node::new("sin", Operation::sine(1.0, 0.0)));
//! motor.add_node(Node::new("peak", Operation::Max).with_source("sin"));
//! motor.initiate().unwrap();
//!
//! for _ in 0..100 {
//!     motor.update().unwrap();
//! }
//! assert!(motor.get("peak").unwrap().value() > 0.9);
//! ```
//!
//! # Design
//!
//! - **Enum dispatch** — `Operation<P>` carries only the parameters of its kind.
//! - **Typed link phases** — `Operation<Input>` before linking,
//!   `Operation<Param>` after, `Operation<f64>` during one evaluation.
//! - **Arena handles** — nodes refer to each other by `NodeId`, never by ownership.

pub mod display;
pub mod error;
pub mod filter;
pub mod id;
pub mod link_report;
mod linker;
pub mod motor;
pub mod node;
pub mod op_kind;
pub mod operation;
pub mod param;

pub use display::{status_line, StatusTable};
pub use error::{GraphError, GraphResult};
pub use filter::MovingAverage;
pub use id::NodeId;
pub use link_report::LinkReport;
pub use motor::{Motor, NodeSnapshot};
pub use node::{Node, COUNTDOWN_RELOAD};
pub use op_kind::OpKind;
pub use operation::{Operation, Params, DEFAULT_WINDOW};
pub use param::{Input, NodeRef, Param};
