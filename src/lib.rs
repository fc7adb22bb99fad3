//! # rift
//!
//! A small, governance-configured expression front end.
//!
//! Processing runs through four ordered stages, each driven by its own governance record:
//!
//! - RIFT-0 tokenizer: lexemes classified by priority-ranked regex rules
//! - RIFT-1 parser bridge: precedence-climbing parser producing a binary-operator AST
//! - RIFT-2 AST coordinator: structural statistics and optimization-pass bookkeeping
//! - RIFT-3 output: canonical nested-parenthesis rendering, optional JSON export
//!
//! The stage behavior (patterns, priorities, precedence, passes, formats) comes from
//! [`rift::governance`], never from hardcoded tables in the stages themselves.

pub mod rift;
