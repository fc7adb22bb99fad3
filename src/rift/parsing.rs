//! Parser
//!
//! RIFT-1 turns a [`TokenStream`](crate::rift::lexing::TokenStream) into a single expression
//! tree. The parser walks the stream with one forward cursor and never backtracks.
//!
//! Binary operators and their binding power come from the parser governance
//! (`PRECEDENCE_TABLE`). With the default table this is the classic two-level grammar:
//!
//!     expression := term ( ('+' | '-') term )*
//!     term       := factor ( ('*' | '/') factor )*
//!     factor     := IDENTIFIER | NUMBER
//!
//! Every level is left-associative.

pub mod error;
pub mod parser;
pub mod precedence;

pub use error::ParseError;
pub use parser::{parse, MissingOperandPolicy, Parser};
pub use precedence::PrecedenceTable;
