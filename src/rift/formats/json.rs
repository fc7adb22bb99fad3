//! JSON export of the tree
//!
//! Nodes are tagged by `type` (`identifier`, `number`, `binary_op`, `unary_op`). An absent
//! tree exports as `null`.

use super::registry::{FormatError, Formatter};
use crate::rift::ast::AstNode;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "JSON"
    }

    fn render(&self, root: Option<&AstNode>) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&root)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tagged JSON tree"
    }
}
