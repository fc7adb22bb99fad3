//! RIFT-2: post-parse coordination
//!
//! The coordinator borrows the finished tree, measures it and resolves which optimization
//! passes the governance enables. It never rewrites the tree: passes are bookkeeping only.

use super::AstNode;
use crate::rift::governance::CoordinatorConfig;

/// An `OPTIMIZATION_PASSES` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationPass {
    pub name: String,
    pub enabled: bool,
}

impl OptimizationPass {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        OptimizationPass {
            name: name.into(),
            enabled,
        }
    }
}

/// What the coordinator learned about a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinationReport {
    pub node_count: usize,
    pub depth: usize,
    pub leaf_count: usize,
    /// All configured passes, in governance order
    pub passes: Vec<OptimizationPass>,
}

impl CoordinationReport {
    pub fn enabled_passes(&self) -> Vec<&str> {
        self.passes
            .iter()
            .filter(|pass| pass.enabled)
            .map(|pass| pass.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AstCoordinator {
    passes: Vec<OptimizationPass>,
}

impl AstCoordinator {
    pub fn new(config: &CoordinatorConfig) -> Self {
        Self::with_passes(config.passes.clone())
    }

    pub fn with_passes(passes: Vec<OptimizationPass>) -> Self {
        AstCoordinator { passes }
    }

    pub fn passes(&self) -> &[OptimizationPass] {
        &self.passes
    }

    /// Measure `root` and resolve the pass list; an absent tree measures as zero
    pub fn coordinate(&self, root: Option<&AstNode>) -> CoordinationReport {
        let report = CoordinationReport {
            node_count: count_nodes(root),
            depth: root.map_or(0, AstNode::depth),
            leaf_count: root.map_or(0, AstNode::leaf_count),
            passes: self.passes.clone(),
        };

        tracing::info!(
            node_count = report.node_count,
            depth = report.depth,
            enabled_passes = ?report.enabled_passes(),
            "coordination complete"
        );
        report
    }
}

/// 1 + the count of each child, missing children counting as 0
pub fn count_nodes(root: Option<&AstNode>) -> usize {
    root.map_or(0, AstNode::node_count)
}
