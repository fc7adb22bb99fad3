//! Integration tests for PipelineExecutor
//!
//! These run the four stages end to end, with the built-in governance and with governance
//! directories written to a temporary location.

use proptest::prelude::*;
use rift::rift::ast::AstNode;
use rift::rift::formats::render_lisp;
use rift::rift::governance::{ConfigurationError, GovernanceStore, Stage};
use rift::rift::lexing::TokenKind;
use rift::rift::pipeline::{ExecutionError, ExecutionOptions, PipelineExecutor};
use std::fs;

#[test]
fn test_render_reference_expression() {
    let executor = PipelineExecutor::new().unwrap();
    let output = executor.execute("x + 2 * y").unwrap();

    insta::assert_snapshot!(output.rendered.trim_end(), @r"
(AST
  (BinOp +
    (Identifier x)
    (BinOp *
      (Number 2)
      (Identifier y)
    )
  )
)
");
}

#[test]
fn test_render_left_associative_chain() {
    let executor = PipelineExecutor::new().unwrap();
    let output = executor.execute("a - b - c").unwrap();

    insta::assert_snapshot!(output.rendered.trim_end(), @r"
(AST
  (BinOp -
    (BinOp -
      (Identifier a)
      (Identifier b)
    )
    (Identifier c)
  )
)
");
}

#[test]
fn test_report_for_reference_expression() {
    let executor = PipelineExecutor::new().unwrap();
    let output = executor.execute("x + 2 * y").unwrap();

    assert_eq!(output.report.node_count, 5);
    assert_eq!(output.report.depth, 3);
    assert_eq!(output.report.leaf_count, 3);
    assert_eq!(
        output.report.enabled_passes(),
        vec!["constant_folding", "dead_code_elimination"]
    );

    let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Operator,
            TokenKind::Number,
            TokenKind::Operator,
            TokenKind::Identifier,
        ]
    );
}

#[test]
fn test_whitespace_only_input() {
    let executor = PipelineExecutor::new().unwrap();
    let output = executor.execute("    ").unwrap();

    assert!(output.tokens.is_empty());
    assert!(output.ast.is_none());
    assert_eq!(output.report.node_count, 0);
    assert_eq!(output.rendered, "(AST\n)\n");
}

#[test]
fn test_json_export() {
    let executor = PipelineExecutor::new().unwrap();
    let options = ExecutionOptions {
        format: Some("JSON".to_string()),
        strict: false,
    };
    let output = executor.execute_with("a * 2", &options).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output.rendered).unwrap();

    assert_eq!(
        value,
        serde_json::json!({
            "type": "binary_op",
            "operator": "*",
            "left": { "type": "identifier", "value": "a" },
            "right": { "type": "number", "value": "2" }
        })
    );
}

const TRUNCATING_PARSER: &str = r#"
stage_id: 1
stage_name: PARSER_BRIDGE
sp_alignment: SYNTACTIC_ANALYSIS
sections:
  PRECEDENCE_TABLE:
    MULTIPLY_PRECEDENCE: 20
    DIVIDE_PRECEDENCE: 20
    PLUS_PRECEDENCE: 10
    MINUS_PRECEDENCE: 10
  PARSER_OPTIONS:
    missing_operand: truncate
"#;

const FLAT_PRECEDENCE_PARSER: &str = r#"
stage_id: 1
stage_name: PARSER_BRIDGE
sp_alignment: SYNTACTIC_ANALYSIS
sections:
  PRECEDENCE_TABLE:
    MULTIPLY_PRECEDENCE: 10
    PLUS_PRECEDENCE: 10
"#;

const SINGLE_CHAR_TOKENIZER: &str = r#"
stage_id: 0
stage_name: TOKENIZER
sp_alignment: LEXICAL_ANALYSIS
sections:
  TOKEN_PATTERNS:
    NUMBER_PATTERN: '^[0-9]+$'
    NUMBER_PRIORITY: 90
    UNKNOWN_PATTERN: '^.$'
    UNKNOWN_PRIORITY: 95
"#;

#[test]
fn test_governance_directory_truncates() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("riftrc.1.yaml"), TRUNCATING_PARSER).unwrap();

    let governance = GovernanceStore::load_dir(dir.path()).unwrap();
    assert_eq!(governance.stages().count(), 4);

    let executor = PipelineExecutor::with_governance(governance);
    let output = executor.execute("a * b +").unwrap();
    assert_eq!(output.report.node_count, 3);
    assert_eq!(output.consumed, 3);
    assert!(!output.is_complete());
}

#[test]
fn test_governance_directory_changes_precedence() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("riftrc.1.yaml"), FLAT_PRECEDENCE_PARSER).unwrap();

    let executor = PipelineExecutor::with_governance(GovernanceStore::load_dir(dir.path()).unwrap());
    let output = executor.execute("a + b * c").unwrap();
    assert_eq!(
        output.ast,
        Some(AstNode::binary(
            "*",
            AstNode::binary("+", AstNode::identifier("a"), AstNode::identifier("b")),
            AstNode::identifier("c"),
        ))
    );

    // '-' is not in this table, so it ends the expression
    let output = executor.execute("a - b").unwrap();
    assert_eq!(output.ast, Some(AstNode::identifier("a")));
}

#[test]
fn test_governance_directory_changes_classification() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("riftrc.0.yaml"), SINGLE_CHAR_TOKENIZER).unwrap();

    let executor = PipelineExecutor::with_governance(GovernanceStore::load_dir(dir.path()).unwrap());
    let tokens = executor.tokenize("5 55").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| (t.kind, t.priority)).collect();
    assert_eq!(
        kinds,
        vec![(TokenKind::Unknown, 95), (TokenKind::Number, 90)]
    );
}

#[test]
fn test_governance_file_for_wrong_stage() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("riftrc.2.yaml"), TRUNCATING_PARSER).unwrap();

    assert_eq!(
        GovernanceStore::load_dir(dir.path()).unwrap_err(),
        ConfigurationError::StageMismatch {
            expected: Stage::Coordinator,
            found: Stage::Parser,
        }
    );
}

#[test]
fn test_governance_directory_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(matches!(
        GovernanceStore::load_dir(&missing),
        Err(ConfigurationError::Io { .. })
    ));
}

#[test]
fn test_invalid_governance_surfaces_at_stage() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("riftrc.1.yaml"),
        TRUNCATING_PARSER.replace("truncate", "guess"),
    )
    .unwrap();

    let executor = PipelineExecutor::with_governance(GovernanceStore::load_dir(dir.path()).unwrap());
    // Tokenizer governance is untouched
    assert!(executor.tokenize("a").is_ok());
    assert!(matches!(
        executor.execute("a"),
        Err(ExecutionError::Configuration(
            ConfigurationError::InvalidValue { .. }
        ))
    ));
}

/// Random expressions over the default operator set
fn expression() -> impl Strategy<Value = String> {
    let operand = prop_oneof!["[a-z][a-z0-9_]{0,4}", "[0-9]{1,3}"];
    let operator = prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")];
    (operand.clone(), prop::collection::vec((operator, operand), 0..8)).prop_map(
        |(first, rest)| {
            let mut source = first;
            for (operator, operand) in rest {
                source.push(' ');
                source.push_str(operator);
                source.push(' ');
                source.push_str(&operand);
            }
            source
        },
    )
}

proptest! {
    #[test]
    fn test_well_formed_expressions_consume_everything(source in expression()) {
        let executor = PipelineExecutor::new().unwrap();
        let output = executor.execute(&source).unwrap();
        let ast = output.ast.as_ref().unwrap();

        prop_assert!(output.is_complete());
        // Every lexeme becomes exactly one node
        prop_assert_eq!(output.report.node_count, output.tokens.len());
        prop_assert_eq!(output.report.leaf_count, (output.tokens.len() + 1) / 2);
        prop_assert_eq!(ast.node_count(), output.report.node_count);
    }

    #[test]
    fn test_rendering_is_idempotent(source in expression()) {
        let executor = PipelineExecutor::new().unwrap();
        let first = executor.execute(&source).unwrap();
        let second = executor.execute(&source).unwrap();

        prop_assert_eq!(&first.rendered, &second.rendered);
        prop_assert_eq!(render_lisp(first.ast.as_ref()), first.rendered.clone());
        prop_assert_eq!(first.rendered.matches('(').count(), first.rendered.matches(')').count());
    }
}
