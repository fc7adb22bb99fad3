//! RIFT-0 tokenizer
//!
//! Splits input on whitespace and classifies each lexeme. One token per lexeme, in input
//! order, columns numbered from 1.

use super::classifier::{PatternClassifier, PatternRule};
use super::tokens::{Token, TokenStream};
use crate::rift::governance::TokenizerConfig;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// Only raised when the tokenizer was configured to reject input without lexemes
    #[error("Input contains no lexemes")]
    EmptyInput,
}

pub struct Tokenizer {
    classifier: PatternClassifier,
    reject_empty_input: bool,
}

impl Tokenizer {
    /// Build a tokenizer from the RIFT-0 governance
    pub fn new(config: &TokenizerConfig) -> Self {
        Tokenizer {
            classifier: PatternClassifier::new(config.rules.iter().cloned()),
            reject_empty_input: config.reject_empty_input,
        }
    }

    /// Build a lenient tokenizer from an explicit rule list
    pub fn from_rules(rules: impl IntoIterator<Item = PatternRule>) -> Self {
        Tokenizer {
            classifier: PatternClassifier::new(rules),
            reject_empty_input: false,
        }
    }

    pub fn reject_empty_input(mut self, reject: bool) -> Self {
        self.reject_empty_input = reject;
        self
    }

    pub fn classifier(&self) -> &PatternClassifier {
        &self.classifier
    }

    /// Tokenize a single line of input
    ///
    /// Input without any lexeme yields an empty stream, unless the tokenizer rejects empty
    /// input, in which case it is [`TokenizeError::EmptyInput`].
    pub fn tokenize(&self, input: &str) -> Result<TokenStream, TokenizeError> {
        let mut stream = TokenStream::new();

        for lexeme in input.split_whitespace() {
            let classification = self.classifier.classify(lexeme);
            let column = stream.len() + 1;
            tracing::debug!(
                lexeme,
                kind = %classification.kind,
                priority = classification.priority,
                column,
                "classified lexeme"
            );
            stream.push(Token::new(
                classification.kind,
                lexeme,
                column,
                classification.priority,
            ));
        }

        if stream.is_empty() && self.reject_empty_input {
            return Err(TokenizeError::EmptyInput);
        }

        tracing::info!(tokens = stream.len(), "tokenization complete");
        Ok(stream)
    }
}

/// Lenient one-shot tokenization against an explicit rule list
pub fn tokenize(input: &str, rules: &[PatternRule]) -> TokenStream {
    // A tokenizer built from bare rules never rejects input
    Tokenizer::from_rules(rules.iter().cloned())
        .tokenize(input)
        .unwrap_or_default()
}
