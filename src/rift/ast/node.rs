use super::traits::Visitor;
use serde::Serialize;

/// A node of the expression tree
///
/// `UnaryOp` is part of the tree vocabulary but the expression grammar never produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AstNode {
    Identifier {
        value: String,
    },
    Number {
        value: String,
    },
    BinaryOp {
        operator: String,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    UnaryOp {
        operator: String,
        operand: Box<AstNode>,
    },
}

impl AstNode {
    pub fn identifier(value: impl Into<String>) -> Self {
        AstNode::Identifier {
            value: value.into(),
        }
    }

    pub fn number(value: impl Into<String>) -> Self {
        AstNode::Number {
            value: value.into(),
        }
    }

    pub fn binary(operator: impl Into<String>, left: AstNode, right: AstNode) -> Self {
        AstNode::BinaryOp {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: impl Into<String>, operand: AstNode) -> Self {
        AstNode::UnaryOp {
            operator: operator.into(),
            operand: Box::new(operand),
        }
    }

    /// Variant name as it appears in diagnostics
    pub fn node_type(&self) -> &'static str {
        match self {
            AstNode::Identifier { .. } => "Identifier",
            AstNode::Number { .. } => "Number",
            AstNode::BinaryOp { .. } => "BinaryOp",
            AstNode::UnaryOp { .. } => "UnaryOp",
        }
    }

    /// Direct children, left to right
    pub fn children(&self) -> Vec<&AstNode> {
        match self {
            AstNode::Identifier { .. } | AstNode::Number { .. } => Vec::new(),
            AstNode::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            AstNode::UnaryOp { operand, .. } => vec![operand.as_ref()],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, AstNode::Identifier { .. } | AstNode::Number { .. })
    }

    /// This node plus all of its descendants
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(AstNode::node_count)
            .sum::<usize>()
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(AstNode::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children().into_iter().map(AstNode::leaf_count).sum()
    }

    /// Dispatch to the visitor method for this node's variant
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            AstNode::Identifier { value } => visitor.visit_identifier(value),
            AstNode::Number { value } => visitor.visit_number(value),
            AstNode::BinaryOp {
                operator,
                left,
                right,
            } => visitor.visit_binary_op(operator, left, right),
            AstNode::UnaryOp { operator, operand } => visitor.visit_unary_op(operator, operand),
        }
    }
}
