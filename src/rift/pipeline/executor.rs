//! Pipeline executor that runs the stages against a governance store

use crate::rift::ast::{AstCoordinator, AstNode, CoordinationReport};
use crate::rift::formats::{FormatError, FormatRegistry};
use crate::rift::governance::{
    ConfigurationError, CoordinatorConfig, GovernanceStore, OutputConfig, ParserConfig, Stage,
    StageConfig, TokenizerConfig,
};
use crate::rift::lexing::{TokenStream, TokenizeError, Tokenizer};
use crate::rift::parsing::{ParseError, Parser};
use thiserror::Error;

/// Errors during pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Per-run overrides
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Output format; the governance `primary_format` when unset
    pub format: Option<String>,
    /// Require the parser to consume every token
    pub strict: bool,
}

/// Everything the stages produced
#[derive(Debug)]
pub struct PipelineOutput {
    pub tokens: TokenStream,
    pub ast: Option<AstNode>,
    /// Tokens the parser consumed; trailing tokens are ignored unless running strict
    pub consumed: usize,
    pub report: CoordinationReport,
    pub format: String,
    pub rendered: String,
}

impl PipelineOutput {
    /// Whether the parser reached the end of the token stream
    pub fn is_complete(&self) -> bool {
        self.consumed == self.tokens.len()
    }
}

/// Runs the four stages in order
pub struct PipelineExecutor {
    governance: GovernanceStore,
}

impl PipelineExecutor {
    /// Create executor with the built-in governance
    pub fn new() -> Result<Self, ConfigurationError> {
        Ok(Self::with_governance(GovernanceStore::with_defaults()?))
    }

    /// Create executor with a custom governance store
    pub fn with_governance(governance: GovernanceStore) -> Self {
        Self { governance }
    }

    pub fn governance(&self) -> &GovernanceStore {
        &self.governance
    }

    /// Run every stage with the governance defaults
    pub fn execute(&self, source: &str) -> Result<PipelineOutput, ExecutionError> {
        self.execute_with(source, &ExecutionOptions::default())
    }

    pub fn execute_with(
        &self,
        source: &str,
        options: &ExecutionOptions,
    ) -> Result<PipelineOutput, ExecutionError> {
        // RIFT-0
        let tokens = self.tokenize(source)?;

        // RIFT-1
        let (ast, consumed) = {
            let stage = self.enter(Stage::Parser)?;
            let _guard = stage.span.enter();
            let config = ParserConfig::try_from(stage.config)?;
            let mut parser = Parser::with_config(&tokens, &config);
            let ast = if options.strict {
                parser.parse_complete()?
            } else {
                parser.parse()?
            };
            if !parser.is_exhausted() {
                tracing::info!(
                    consumed = parser.position(),
                    total = tokens.len(),
                    "trailing tokens ignored"
                );
            }
            (ast, parser.position())
        };

        // RIFT-2
        let report = {
            let stage = self.enter(Stage::Coordinator)?;
            let _guard = stage.span.enter();
            let config = CoordinatorConfig::try_from(stage.config)?;
            AstCoordinator::new(&config).coordinate(ast.as_ref())
        };

        // RIFT-3
        let (format, rendered) = {
            let stage = self.enter(Stage::Output)?;
            let _guard = stage.span.enter();
            let config = OutputConfig::try_from(stage.config)?;
            let registry = FormatRegistry::from_config(&config);
            let format = options
                .format
                .clone()
                .unwrap_or_else(|| config.primary_format.clone());
            let rendered = registry.render(ast.as_ref(), &format)?;
            tracing::info!(format = %format, bytes = rendered.len(), "output rendered");
            (format, rendered)
        };

        Ok(PipelineOutput {
            tokens,
            ast,
            consumed,
            report,
            format,
            rendered,
        })
    }

    /// Run RIFT-0 only
    pub fn tokenize(&self, source: &str) -> Result<TokenStream, ExecutionError> {
        let stage = self.enter(Stage::Tokenizer)?;
        let _guard = stage.span.enter();
        let config = TokenizerConfig::try_from(stage.config)?;
        let tokenizer = Tokenizer::new(&config);
        let fallbacks = tokenizer.classifier().diagnostics();
        if !fallbacks.is_empty() {
            tracing::info!(
                rules = tokenizer.classifier().rule_count(),
                fallbacks = fallbacks.len(),
                "tokenizer built with degraded patterns"
            );
        }
        Ok(tokenizer.tokenize(source)?)
    }

    /// Look up a stage's governance and open its span
    fn enter(&self, stage: Stage) -> Result<StageRun<'_>, ConfigurationError> {
        let config = self.governance.stage(stage)?;
        let span = tracing::info_span!(
            "stage",
            stage = %stage,
            name = %config.stage_name,
            sp_alignment = %config.sp_alignment
        );
        span.in_scope(|| {
            tracing::info!(
                governance_version = %config.governance_version,
                "stage started"
            )
        });
        Ok(StageRun { config, span })
    }
}

struct StageRun<'a> {
    config: &'a StageConfig,
    span: tracing::Span,
}
