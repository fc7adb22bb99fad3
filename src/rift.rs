//! Main module for rift library functionality

pub mod ast;
pub mod formats;
pub mod governance;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
