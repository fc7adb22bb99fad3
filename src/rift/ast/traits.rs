//! Visitor interface for walking the expression tree
//!
//! Default implementations are empty, so a visitor only overrides the node types it cares
//! about. Composite nodes hand their children to the visitor; descending is up to the
//! implementation (`left.accept(self)`).

use super::AstNode;

pub trait Visitor {
    fn visit_identifier(&mut self, _value: &str) {}
    fn visit_number(&mut self, _value: &str) {}
    fn visit_binary_op(&mut self, _operator: &str, _left: &AstNode, _right: &AstNode) {}
    fn visit_unary_op(&mut self, _operator: &str, _operand: &AstNode) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct LeafCollector {
        leaves: Vec<String>,
    }

    impl Visitor for LeafCollector {
        fn visit_identifier(&mut self, value: &str) {
            self.leaves.push(value.to_string());
        }

        fn visit_number(&mut self, value: &str) {
            self.leaves.push(value.to_string());
        }

        fn visit_binary_op(&mut self, _operator: &str, left: &AstNode, right: &AstNode) {
            left.accept(self);
            right.accept(self);
        }

        fn visit_unary_op(&mut self, _operator: &str, operand: &AstNode) {
            operand.accept(self);
        }
    }

    #[derive(Default)]
    struct OperatorCounter {
        seen: usize,
    }

    impl Visitor for OperatorCounter {
        fn visit_binary_op(&mut self, _operator: &str, _left: &AstNode, _right: &AstNode) {
            self.seen += 1;
        }
    }

    #[test]
    fn test_visitor_descends_in_order() {
        let tree = AstNode::binary(
            "-",
            AstNode::binary("-", AstNode::identifier("a"), AstNode::identifier("b")),
            AstNode::unary("-", AstNode::number("3")),
        );
        let mut collector = LeafCollector::default();
        tree.accept(&mut collector);
        assert_eq!(collector.leaves, vec!["a", "b", "3"]);
    }

    #[test]
    fn test_default_methods_do_not_descend() {
        let tree = AstNode::binary(
            "+",
            AstNode::binary("*", AstNode::identifier("a"), AstNode::identifier("b")),
            AstNode::number("1"),
        );
        let mut counter = OperatorCounter::default();
        tree.accept(&mut counter);
        assert_eq!(counter.seen, 1);
    }
}
