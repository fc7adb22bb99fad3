//! Parse errors
//!
//! Positions are token columns (1-based ordinals in the stream).

use crate::rift::lexing::TokenKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A binary operator with nothing usable on its right
    #[error("Operator '{operator}' at position {position} is missing its right operand")]
    MissingOperand { operator: String, position: usize },

    /// The expression does not start with an identifier or number
    #[error("Expected an identifier or number at position {position}, found {kind} '{found}'")]
    ExpectedOperand {
        found: String,
        kind: TokenKind,
        position: usize,
    },

    /// Tokens left over after a complete expression (strict parsing only)
    #[error("Unexpected {kind} token '{value}' at position {position}")]
    UnexpectedToken {
        value: String,
        kind: TokenKind,
        position: usize,
    },
}
