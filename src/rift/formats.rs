//! Output formats for the expression tree (RIFT-3)
//!
//! - `LISP_STYLE_AST`: the canonical nested-parenthesis rendering
//! - `JSON`: the tree as tagged JSON, available when the governance enables `json_export`

pub mod json;
pub mod lisp;
pub mod registry;

pub use json::JsonFormatter;
pub use lisp::{render_lisp, LispFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
