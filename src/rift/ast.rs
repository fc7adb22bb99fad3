//! Expression tree and the RIFT-2 coordination step
//!
//! [`AstNode`] is a plain owned tree: every node owns its children, so there is a single root
//! and no cycles. The parser hands the root to its caller; everything after that borrows it.

pub mod coordinator;
pub mod node;
pub mod traits;

pub use coordinator::{count_nodes, AstCoordinator, CoordinationReport, OptimizationPass};
pub use node::AstNode;
pub use traits::Visitor;
