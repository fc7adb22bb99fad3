//! The four-stage pipeline
//!
//! RIFT-0 tokenizer → RIFT-1 parser → RIFT-2 coordinator → RIFT-3 output. Stages run strictly in
//! order; each consumes the complete output of the previous one.

pub mod executor;

pub use executor::{ExecutionError, ExecutionOptions, PipelineExecutor, PipelineOutput};
