//! Lexer
//!
//! RIFT-0 turns a single line of source text into a [`TokenStream`].
//!
//! The lexer is deliberately simple: lexemes are runs of non-whitespace characters, and every
//! lexeme is classified on its own by the [`PatternClassifier`]. Which patterns exist, which
//! token kind they produce and how ambiguous matches are ranked all come from the tokenizer's
//! governance (`TOKEN_PATTERNS`), not from this module.
//!
//! Whitespace only ever separates lexemes. A `Whitespace` rule may be configured, and is kept
//! in the rule set, but no `Whitespace` token is ever emitted by the word-splitting lexer.

pub mod classifier;
pub mod tokenizer;
pub mod tokens;

pub use classifier::{
    classify, Classification, IdAllocator, PatternClassifier, PatternCompilationError,
    PatternRule, RuleId,
};
pub use tokenizer::{tokenize, TokenizeError, Tokenizer};
pub use tokens::{Token, TokenKind, TokenStream};
