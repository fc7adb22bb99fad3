//! Configuration-layer errors
//!
//! These are fail-fast: a stage whose configuration cannot be resolved is not constructed.

use super::Stage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Stage id {0} is outside RIFT-0..RIFT-3")]
    UnknownStage(i64),

    #[error("Stage {0} configuration is not loaded")]
    StageNotLoaded(Stage),

    #[error("Expected a {expected} configuration, found {found}")]
    StageMismatch { expected: Stage, found: Stage },

    #[error("Stage {stage} is missing section '{section}'")]
    MissingSection { stage: Stage, section: String },

    #[error("Stage {stage} is missing key '{section}.{key}'")]
    MissingKey {
        stage: Stage,
        section: String,
        key: String,
    },

    #[error("Stage {stage} key '{section}.{key}' is '{value}', expected {expected}")]
    InvalidValue {
        stage: Stage,
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Unknown token kind '{0}'")]
    UnknownTokenKind(String),

    #[error("Unknown operator name '{0}'")]
    UnknownOperator(String),

    #[error("Invalid governance document: {0}")]
    Document(String),

    #[error("Cannot read '{path}': {message}")]
    Io { path: String, message: String },
}
