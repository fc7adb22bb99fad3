//! Stage identifiers

use super::ConfigurationError;
use std::fmt;

/// One ordered phase of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// RIFT-0: lexemes to tokens
    Tokenizer,
    /// RIFT-1: tokens to AST
    Parser,
    /// RIFT-2: AST statistics and pass selection
    Coordinator,
    /// RIFT-3: AST rendering
    Output,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 4] = [
        Stage::Tokenizer,
        Stage::Parser,
        Stage::Coordinator,
        Stage::Output,
    ];

    /// Numeric stage id (0..=3)
    pub fn id(self) -> u8 {
        match self {
            Stage::Tokenizer => 0,
            Stage::Parser => 1,
            Stage::Coordinator => 2,
            Stage::Output => 3,
        }
    }

    /// Resolve a numeric stage id
    pub fn from_id(id: u8) -> Result<Self, ConfigurationError> {
        match id {
            0 => Ok(Stage::Tokenizer),
            1 => Ok(Stage::Parser),
            2 => Ok(Stage::Coordinator),
            3 => Ok(Stage::Output),
            other => Err(ConfigurationError::UnknownStage(i64::from(other))),
        }
    }

    /// Label used in logs, e.g. `RIFT-0`
    pub fn label(self) -> &'static str {
        match self {
            Stage::Tokenizer => "RIFT-0",
            Stage::Parser => "RIFT-1",
            Stage::Coordinator => "RIFT-2",
            Stage::Output => "RIFT-3",
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = ConfigurationError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Stage::from_id(id)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
