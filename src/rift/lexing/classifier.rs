//! Priority-resolving pattern classifier
//!
//! Every rule is tried against the whole lexeme (patterns are anchored at both ends no matter
//! how they are written). Among the rules that match, the one with the strictly greatest
//! priority wins; on equal priority the earliest rule in the supplied order wins. When nothing
//! matches the result is `Unknown` with the sentinel priority `0`.
//!
//! Patterns are compiled once, when the classifier is built. A pattern that fails to compile is
//! not fatal: the rule stays in the rule set but never matches, and the failure is kept as a
//! [`PatternCompilationError`] diagnostic (and logged) so the fallback is observable.

use super::TokenKind;
use regex::Regex;
use thiserror::Error;

/// Priority reported for lexemes no rule matched
pub const UNMATCHED_PRIORITY: i32 = 0;

/// A `(pattern, kind, priority)` classification rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub pattern: String,
    pub kind: TokenKind,
    pub priority: i32,
}

impl PatternRule {
    pub fn new(pattern: impl Into<String>, kind: TokenKind, priority: i32) -> Self {
        PatternRule {
            pattern: pattern.into(),
            kind,
            priority,
        }
    }
}

/// Identifier handed to a rule when a classifier is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub usize);

/// Sequential id source owned by whoever builds the rules
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    pub fn next_id(&mut self) -> RuleId {
        let id = RuleId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A pattern that could not be compiled and was degraded to "never matches"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pattern '{pattern}' of rule {} failed to compile: {message}", .rule.0)]
pub struct PatternCompilationError {
    pub rule: RuleId,
    pub pattern: String,
    pub message: String,
}

/// Outcome of classifying one lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: TokenKind,
    pub priority: i32,
    /// The winning rule, `None` when nothing matched
    pub rule: Option<RuleId>,
}

impl Classification {
    pub fn unmatched() -> Self {
        Classification {
            kind: TokenKind::Unknown,
            priority: UNMATCHED_PRIORITY,
            rule: None,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    id: RuleId,
    rule: PatternRule,
    matcher: Option<Regex>,
}

impl CompiledRule {
    fn matches(&self, lexeme: &str) -> bool {
        self.matcher
            .as_ref()
            .map_or(false, |matcher| matcher.is_match(lexeme))
    }
}

#[derive(Debug, Clone)]
pub struct PatternClassifier {
    rules: Vec<CompiledRule>,
    diagnostics: Vec<PatternCompilationError>,
}

impl PatternClassifier {
    /// Compile `rules`, keeping their order
    pub fn new(rules: impl IntoIterator<Item = PatternRule>) -> Self {
        let mut ids = IdAllocator::new();
        let mut compiled = Vec::new();
        let mut diagnostics = Vec::new();

        for rule in rules {
            let id = ids.next_id();
            let matcher = match Regex::new(&anchored(&rule.pattern)) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    let diagnostic = PatternCompilationError {
                        rule: id,
                        pattern: rule.pattern.clone(),
                        message: e.to_string(),
                    };
                    tracing::warn!(
                        rule = id.0,
                        kind = %rule.kind,
                        pattern = %rule.pattern,
                        "pattern failed to compile, rule will never match"
                    );
                    diagnostics.push(diagnostic);
                    None
                }
            };
            compiled.push(CompiledRule { id, rule, matcher });
        }

        PatternClassifier {
            rules: compiled,
            diagnostics,
        }
    }

    /// Classify a lexeme: highest priority wins, first rule wins a tie
    pub fn classify(&self, lexeme: &str) -> Classification {
        let mut best: Option<&CompiledRule> = None;
        for candidate in self.rules.iter().filter(|rule| rule.matches(lexeme)) {
            match best {
                Some(current) if candidate.rule.priority <= current.rule.priority => {}
                _ => best = Some(candidate),
            }
        }

        best.map_or_else(Classification::unmatched, |winner| Classification {
            kind: winner.rule.kind,
            priority: winner.rule.priority,
            rule: Some(winner.id),
        })
    }

    /// Rules in the order they were supplied
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &PatternRule)> {
        self.rules.iter().map(|compiled| (compiled.id, &compiled.rule))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Patterns that were degraded to "never matches"
    pub fn diagnostics(&self) -> &[PatternCompilationError] {
        &self.diagnostics
    }
}

/// One-shot classification against an explicit rule list
pub fn classify(lexeme: &str, rules: &[PatternRule]) -> Classification {
    PatternClassifier::new(rules.iter().cloned()).classify(lexeme)
}

fn anchored(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}
