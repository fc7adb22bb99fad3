//! Precedence-climbing expression parser
//!
//! The parser owns a single forward cursor over the token slice. `parse` reads one expression
//! starting at the first token and stops at the first token that cannot continue it; anything
//! after that is left unconsumed. Callers that need the whole stream consumed use
//! [`Parser::parse_complete`] or compare [`Parser::position`] with the stream length.
//!
//! A binary operator without a right operand is handled according to the
//! [`MissingOperandPolicy`]: `Reject` reports it, `Truncate` stops at the operator and keeps the
//! tree built so far.

use super::{ParseError, PrecedenceTable};
use crate::rift::ast::AstNode;
use crate::rift::governance::ParserConfig;
use crate::rift::lexing::{Token, TokenKind, TokenStream};

/// What to do when an operand is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingOperandPolicy {
    /// Report a [`ParseError`]
    Reject,
    /// Stop at the dangling operator and return the tree built so far
    Truncate,
}

impl MissingOperandPolicy {
    /// Parse the `PARSER_OPTIONS.missing_operand` governance value
    pub fn from_governance_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(MissingOperandPolicy::Reject),
            "truncate" => Some(MissingOperandPolicy::Truncate),
            _ => None,
        }
    }
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    precedence: PrecedenceTable,
    policy: MissingOperandPolicy,
    halted: bool,
}

impl<'a> Parser<'a> {
    /// Parser with the default precedence table that rejects missing operands
    pub fn new(tokens: &'a TokenStream) -> Self {
        Self::with_config(tokens, &ParserConfig::default())
    }

    /// Parser driven by the RIFT-1 governance
    pub fn with_config(tokens: &'a TokenStream, config: &ParserConfig) -> Self {
        Parser {
            tokens: tokens.tokens(),
            position: 0,
            precedence: config.precedence.clone(),
            policy: config.missing_operand,
            halted: false,
        }
    }

    /// Token under the cursor, `None` once the stream is exhausted
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.position)
    }

    /// Move the cursor forward by one; a no-op past the end
    pub fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Parse one expression from the start of the stream
    ///
    /// An empty stream has no tree and is `Ok(None)`. Trailing tokens are ignored.
    pub fn parse(&mut self) -> Result<Option<AstNode>, ParseError> {
        self.position = 0;
        self.halted = false;

        let Some(first) = self.current() else {
            tracing::info!("empty token stream, no AST");
            return Ok(None);
        };

        let root = self.parse_expression(0)?;
        if root.is_none() && self.policy == MissingOperandPolicy::Reject {
            return Err(ParseError::ExpectedOperand {
                found: first.value.clone(),
                kind: first.kind,
                position: first.column,
            });
        }

        tracing::info!(
            consumed = self.position,
            total = self.tokens.len(),
            "parsing complete"
        );
        Ok(root)
    }

    /// Like [`Parser::parse`], but every token must be consumed
    pub fn parse_complete(&mut self) -> Result<Option<AstNode>, ParseError> {
        let root = self.parse()?;
        if let Some(token) = self.current() {
            return Err(ParseError::UnexpectedToken {
                value: token.value.clone(),
                kind: token.kind,
                position: token.column,
            });
        }
        Ok(root)
    }

    /// Precedence climbing: fold every operator binding at least `min_level` into `left`
    fn parse_expression(&mut self, min_level: u8) -> Result<Option<AstNode>, ParseError> {
        let Some(mut left) = self.parse_factor() else {
            return Ok(None);
        };

        while let Some((operator, level)) = self.binary_operator() {
            if level < min_level {
                break;
            }
            let operator_position = self.position;
            self.advance();

            // Operands of the right side must bind strictly tighter: left-associative
            match self.parse_expression(level + 1)? {
                Some(right) => left = AstNode::binary(operator.value.clone(), left, right),
                None => {
                    self.dangling_operator(operator, operator_position)?;
                    break;
                }
            }
        }

        Ok(Some(left))
    }

    fn parse_factor(&mut self) -> Option<AstNode> {
        let token = self.current()?;
        let node = match token.kind {
            TokenKind::Identifier => AstNode::identifier(token.value.clone()),
            TokenKind::Number => AstNode::number(token.value.clone()),
            _ => return None,
        };
        self.advance();
        Some(node)
    }

    /// The operator under the cursor and its level, if it is a configured binary operator
    fn binary_operator(&self) -> Option<(&'a Token, u8)> {
        if self.halted {
            return None;
        }
        let token = self.current()?;
        if token.kind != TokenKind::Operator {
            return None;
        }
        self.precedence
            .level(&token.value)
            .map(|level| (token, level))
    }

    fn dangling_operator(&mut self, operator: &Token, position: usize) -> Result<(), ParseError> {
        match self.policy {
            MissingOperandPolicy::Reject => Err(ParseError::MissingOperand {
                operator: operator.value.clone(),
                position: operator.column,
            }),
            MissingOperandPolicy::Truncate => {
                tracing::warn!(
                    operator = %operator.value,
                    position = operator.column,
                    "operator has no right operand, truncating expression"
                );
                self.position = position;
                self.halted = true;
                Ok(())
            }
        }
    }
}

/// Parse with the default parser configuration
pub fn parse(tokens: &TokenStream) -> Result<Option<AstNode>, ParseError> {
    Parser::new(tokens).parse()
}
