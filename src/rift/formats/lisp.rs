//! Nested-parenthesis tree rendering
//!
//! ## Format
//!
//! - Leaves render on one line: `(Identifier x)`, `(Number 2)`
//! - Operators open `(BinOp op` / `(UnaryOp op`, render their children one level deeper and
//!   close with `)` at their own indentation
//! - Two spaces per level, everything wrapped in an `(AST ... )` envelope
//!
//! ## Example
//!
//! ```text
//! (AST
//!   (BinOp +
//!     (Identifier x)
//!     (Number 2)
//!   )
//! )
//! ```
//!
//! The output is meant for reading and snapshot tests; it is not parsed back.

use super::registry::{FormatError, Formatter};
use crate::rift::ast::{AstNode, Visitor};

struct LispSerializer {
    output: String,
    indent_level: usize,
}

impl LispSerializer {
    fn new() -> Self {
        LispSerializer {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(&"  ".repeat(self.indent_level));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn open(&mut self, head: &str) {
        self.line(&format!("({head}"));
        self.indent_level += 1;
    }

    fn close(&mut self) {
        self.indent_level -= 1;
        self.line(")");
    }
}

impl Visitor for LispSerializer {
    fn visit_identifier(&mut self, value: &str) {
        self.line(&format!("(Identifier {value})"));
    }

    fn visit_number(&mut self, value: &str) {
        self.line(&format!("(Number {value})"));
    }

    fn visit_binary_op(&mut self, operator: &str, left: &AstNode, right: &AstNode) {
        self.open(&format!("BinOp {operator}"));
        left.accept(self);
        right.accept(self);
        self.close();
    }

    fn visit_unary_op(&mut self, operator: &str, operand: &AstNode) {
        self.open(&format!("UnaryOp {operator}"));
        operand.accept(self);
        self.close();
    }
}

/// Render a tree, or the empty envelope when there is none
pub fn render_lisp(root: Option<&AstNode>) -> String {
    let mut serializer = LispSerializer::new();
    serializer.open("AST");
    if let Some(root) = root {
        root.accept(&mut serializer);
    }
    serializer.close();
    serializer.output
}

/// `LISP_STYLE_AST` formatter
pub struct LispFormatter;

impl Formatter for LispFormatter {
    fn name(&self) -> &str {
        "LISP_STYLE_AST"
    }

    fn render(&self, root: Option<&AstNode>) -> Result<String, FormatError> {
        Ok(render_lisp(root))
    }

    fn description(&self) -> &str {
        "Indented nested-parenthesis tree"
    }
}
