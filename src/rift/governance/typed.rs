//! Typed per-stage configuration
//!
//! Stage processors never read governance strings directly. Each stage has a config struct with
//! statically known fields, derived from its [`StageConfig`] with `TryFrom`. Free-form maps
//! survive only where the set is genuinely open-ended (token kinds in `TOKEN_PATTERNS`, pass
//! names in `OPTIMIZATION_PASSES`).

use super::{ConfigurationError, Stage, StageConfig};
use crate::rift::ast::OptimizationPass;
use crate::rift::lexing::{PatternRule, TokenKind};
use crate::rift::parsing::{MissingOperandPolicy, PrecedenceTable};
use once_cell::sync::Lazy;
use regex::Regex;

pub const TOKEN_PATTERNS: &str = "TOKEN_PATTERNS";
pub const DFA_CONFIGURATION: &str = "DFA_CONFIGURATION";
pub const PRECEDENCE_TABLE: &str = "PRECEDENCE_TABLE";
pub const PARSER_OPTIONS: &str = "PARSER_OPTIONS";
pub const OPTIMIZATION_PASSES: &str = "OPTIMIZATION_PASSES";
pub const OUTPUT_FORMATS: &str = "OUTPUT_FORMATS";

/// `IDENTIFIER_PATTERN` -> `IDENTIFIER`
static PATTERN_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<kind>[A-Z][A-Z0-9_]*)_PATTERN$").unwrap());

/// `MULTIPLY_PRECEDENCE` -> `MULTIPLY`
static PRECEDENCE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<name>[A-Z][A-Z0-9_]*)_PRECEDENCE$").unwrap());

fn expect_stage(config: &StageConfig, expected: Stage) -> Result<(), ConfigurationError> {
    if config.stage == expected {
        Ok(())
    } else {
        Err(ConfigurationError::StageMismatch {
            expected,
            found: config.stage,
        })
    }
}

fn require_section(config: &StageConfig, section: &str) -> Result<(), ConfigurationError> {
    if config.has_section(section) {
        Ok(())
    } else {
        Err(ConfigurationError::MissingSection {
            stage: config.stage,
            section: section.to_string(),
        })
    }
}

/// RIFT-0 configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Classification rules in governance order
    pub rules: Vec<PatternRule>,
    /// Treat input without any lexeme as an error instead of an empty stream
    pub reject_empty_input: bool,
    /// Informational; unmatched lexemes always degrade to `Unknown`
    pub error_recovery: bool,
}

impl TryFrom<&StageConfig> for TokenizerConfig {
    type Error = ConfigurationError;

    fn try_from(config: &StageConfig) -> Result<Self, Self::Error> {
        expect_stage(config, Stage::Tokenizer)?;
        require_section(config, TOKEN_PATTERNS)?;

        let mut rules = Vec::new();
        for (key, pattern) in config.section(TOKEN_PATTERNS) {
            let Some(captures) = PATTERN_KEY.captures(key) else {
                continue;
            };
            let kind_name = &captures["kind"];
            let kind = TokenKind::from_governance_name(kind_name)
                .ok_or_else(|| ConfigurationError::UnknownTokenKind(kind_name.to_string()))?;
            let priority_key = format!("{}_PRIORITY", kind_name);
            let priority_value = config.require(TOKEN_PATTERNS, &priority_key)?;
            let priority = priority_value.trim().parse::<i32>().map_err(|_| {
                config.invalid(TOKEN_PATTERNS, &priority_key, priority_value, "an integer")
            })?;
            rules.push(PatternRule::new(pattern, kind, priority));
        }

        Ok(TokenizerConfig {
            rules,
            reject_empty_input: config
                .get_bool(DFA_CONFIGURATION, "reject_empty_input")?
                .unwrap_or(false),
            error_recovery: config
                .get_bool(DFA_CONFIGURATION, "error_recovery")?
                .unwrap_or(true),
        })
    }
}

/// RIFT-1 configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub precedence: PrecedenceTable,
    pub missing_operand: MissingOperandPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            precedence: PrecedenceTable::default(),
            missing_operand: MissingOperandPolicy::Reject,
        }
    }
}

fn operator_symbol(name: &str) -> Option<&'static str> {
    match name {
        "PLUS" => Some("+"),
        "MINUS" => Some("-"),
        "MULTIPLY" => Some("*"),
        "DIVIDE" => Some("/"),
        _ => None,
    }
}

impl TryFrom<&StageConfig> for ParserConfig {
    type Error = ConfigurationError;

    fn try_from(config: &StageConfig) -> Result<Self, Self::Error> {
        expect_stage(config, Stage::Parser)?;
        require_section(config, PRECEDENCE_TABLE)?;

        let mut precedence = PrecedenceTable::empty();
        for (key, value) in config.section(PRECEDENCE_TABLE) {
            let Some(captures) = PRECEDENCE_KEY.captures(key) else {
                continue;
            };
            let name = &captures["name"];
            let symbol = operator_symbol(name)
                .ok_or_else(|| ConfigurationError::UnknownOperator(name.to_string()))?;
            let level = value
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|level| *level > 0 && *level < u8::MAX)
                .ok_or_else(|| {
                    config.invalid(PRECEDENCE_TABLE, key, value, "an integer in 1..=254")
                })?;
            precedence.insert(symbol, level);
        }

        let missing_operand = match config.get(PARSER_OPTIONS, "missing_operand") {
            None => MissingOperandPolicy::Reject,
            Some(value) => MissingOperandPolicy::from_governance_value(value).ok_or_else(|| {
                config.invalid(PARSER_OPTIONS, "missing_operand", value, "'reject' or 'truncate'")
            })?,
        };

        Ok(ParserConfig {
            precedence,
            missing_operand,
        })
    }
}

/// RIFT-2 configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Passes in governance order, enabled or not
    pub passes: Vec<OptimizationPass>,
}

impl TryFrom<&StageConfig> for CoordinatorConfig {
    type Error = ConfigurationError;

    fn try_from(config: &StageConfig) -> Result<Self, Self::Error> {
        expect_stage(config, Stage::Coordinator)?;

        let mut passes = Vec::new();
        for (name, _) in config.section(OPTIMIZATION_PASSES) {
            let enabled = config
                .get_bool(OPTIMIZATION_PASSES, name)?
                .unwrap_or(false);
            passes.push(OptimizationPass::new(name, enabled));
        }
        Ok(CoordinatorConfig { passes })
    }
}

/// RIFT-3 configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub primary_format: String,
    pub secondary_format: Option<String>,
    pub debug_format: Option<String>,
    pub json_export: bool,
    pub debug_output: bool,
}

impl TryFrom<&StageConfig> for OutputConfig {
    type Error = ConfigurationError;

    fn try_from(config: &StageConfig) -> Result<Self, Self::Error> {
        expect_stage(config, Stage::Output)?;
        require_section(config, OUTPUT_FORMATS)?;

        Ok(OutputConfig {
            primary_format: config.require(OUTPUT_FORMATS, "primary_format")?.to_string(),
            secondary_format: config
                .get(OUTPUT_FORMATS, "secondary_format")
                .map(str::to_string),
            debug_format: config.get(OUTPUT_FORMATS, "debug_format").map(str::to_string),
            json_export: config
                .get_bool(OUTPUT_FORMATS, "json_export")?
                .unwrap_or(false),
            debug_output: config
                .get_bool(OUTPUT_FORMATS, "debug_output")?
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(stage: Stage) -> StageConfig {
        StageConfig::builtin(stage).unwrap()
    }

    #[test]
    fn test_tokenizer_config_from_defaults() {
        let config = TokenizerConfig::try_from(&builtin(Stage::Tokenizer)).unwrap();
        let kinds: Vec<_> = config.rules.iter().map(|r| (r.kind, r.priority)).collect();
        assert_eq!(
            kinds,
            vec![
                (TokenKind::Identifier, 100),
                (TokenKind::Number, 90),
                (TokenKind::Operator, 80),
                (TokenKind::Whitespace, 10),
            ]
        );
        assert!(!config.reject_empty_input);
        assert!(config.error_recovery);
    }

    #[test]
    fn test_tokenizer_config_missing_priority() {
        let stage = StageConfig::new(Stage::Tokenizer, "TOKENIZER", "LEXICAL_ANALYSIS")
            .with_entry(TOKEN_PATTERNS, "NUMBER_PATTERN", "^[0-9]+$");
        assert_eq!(
            TokenizerConfig::try_from(&stage).unwrap_err(),
            ConfigurationError::MissingKey {
                stage: Stage::Tokenizer,
                section: TOKEN_PATTERNS.into(),
                key: "NUMBER_PRIORITY".into(),
            }
        );
    }

    #[test]
    fn test_tokenizer_config_unknown_kind() {
        let stage = StageConfig::new(Stage::Tokenizer, "TOKENIZER", "LEXICAL_ANALYSIS")
            .with_entry(TOKEN_PATTERNS, "STRING_PATTERN", "^\".*\"$")
            .with_entry(TOKEN_PATTERNS, "STRING_PRIORITY", "50");
        assert_eq!(
            TokenizerConfig::try_from(&stage).unwrap_err(),
            ConfigurationError::UnknownTokenKind("STRING".into())
        );
    }

    #[test]
    fn test_tokenizer_config_missing_section() {
        let stage = StageConfig::new(Stage::Tokenizer, "TOKENIZER", "LEXICAL_ANALYSIS");
        assert!(matches!(
            TokenizerConfig::try_from(&stage),
            Err(ConfigurationError::MissingSection { .. })
        ));
    }

    #[test]
    fn test_tokenizer_config_last_write_wins() {
        let mut stage = builtin(Stage::Tokenizer);
        stage.add(TOKEN_PATTERNS, "NUMBER_PRIORITY", "150");
        let config = TokenizerConfig::try_from(&stage).unwrap();
        assert_eq!(config.rules[1].kind, TokenKind::Number);
        assert_eq!(config.rules[1].priority, 150);
    }

    #[test]
    fn test_stage_mismatch() {
        assert_eq!(
            TokenizerConfig::try_from(&builtin(Stage::Parser)).unwrap_err(),
            ConfigurationError::StageMismatch {
                expected: Stage::Tokenizer,
                found: Stage::Parser,
            }
        );
    }

    #[test]
    fn test_parser_config_from_defaults() {
        let config = ParserConfig::try_from(&builtin(Stage::Parser)).unwrap();
        assert_eq!(config.precedence, PrecedenceTable::default());
        assert_eq!(config.missing_operand, MissingOperandPolicy::Reject);
    }

    #[test]
    fn test_parser_config_truncate_policy() {
        let mut stage = builtin(Stage::Parser);
        stage.add(PARSER_OPTIONS, "missing_operand", "truncate");
        let config = ParserConfig::try_from(&stage).unwrap();
        assert_eq!(config.missing_operand, MissingOperandPolicy::Truncate);
    }

    #[test]
    fn test_parser_config_bad_precedence() {
        let mut stage = builtin(Stage::Parser);
        stage.add(PRECEDENCE_TABLE, "PLUS_PRECEDENCE", "high");
        assert!(matches!(
            ParserConfig::try_from(&stage),
            Err(ConfigurationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parser_config_unknown_operator() {
        let mut stage = builtin(Stage::Parser);
        stage.add(PRECEDENCE_TABLE, "MODULO_PRECEDENCE", "20");
        assert_eq!(
            ParserConfig::try_from(&stage).unwrap_err(),
            ConfigurationError::UnknownOperator("MODULO".into())
        );
    }

    #[test]
    fn test_coordinator_config_from_defaults() {
        let config = CoordinatorConfig::try_from(&builtin(Stage::Coordinator)).unwrap();
        assert_eq!(
            config.passes,
            vec![
                OptimizationPass::new("constant_folding", true),
                OptimizationPass::new("dead_code_elimination", true),
                OptimizationPass::new("common_subexpression_elimination", false),
            ]
        );
    }

    #[test]
    fn test_coordinator_config_without_passes() {
        let stage = StageConfig::new(Stage::Coordinator, "AST_COORDINATOR", "SEMANTIC_ANALYSIS");
        let config = CoordinatorConfig::try_from(&stage).unwrap();
        assert!(config.passes.is_empty());
    }

    #[test]
    fn test_output_config_from_defaults() {
        let config = OutputConfig::try_from(&builtin(Stage::Output)).unwrap();
        assert_eq!(config.primary_format, "LISP_STYLE_AST");
        assert_eq!(config.secondary_format.as_deref(), Some("C_CODE"));
        assert_eq!(config.debug_format.as_deref(), Some("DOT_GRAPH"));
        assert!(config.json_export);
        assert!(!config.debug_output);
    }

    #[test]
    fn test_output_config_requires_primary_format() {
        let stage = StageConfig::new(Stage::Output, "OUTPUT_GENERATOR", "CODE_GENERATION")
            .with_entry(OUTPUT_FORMATS, "json_export", "enabled");
        assert!(matches!(
            OutputConfig::try_from(&stage),
            Err(ConfigurationError::MissingKey { .. })
        ));
    }
}
