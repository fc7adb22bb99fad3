//! Format registry for AST rendering
//!
//! Each format implements the `Formatter` trait and is registered with `FormatRegistry` under
//! its governance name (`OUTPUT_FORMATS.primary_format` and friends).

use crate::rift::ast::AstNode;
use crate::rift::governance::OutputConfig;
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during rendering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not registered, either unknown or not implemented
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for tree formatters
///
/// An absent tree (empty input) must render too.
pub trait Formatter: Send + Sync {
    /// The governance name of this format (e.g. "LISP_STYLE_AST")
    fn name(&self) -> &str;

    /// Render a tree in this format
    fn render(&self, root: Option<&AstNode>) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of tree formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Render a tree using the specified format
    pub fn render(&self, root: Option<&AstNode>, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.render(root)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with every built-in formatter
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::LispFormatter);
        registry.register(super::JsonFormatter);
        registry
    }

    /// Create a registry holding the formats the RIFT-3 governance allows
    ///
    /// Configured formats without an implementation are logged and left out.
    pub fn from_config(config: &OutputConfig) -> Self {
        let mut registry = Self::new();
        registry.register(super::LispFormatter);
        if config.json_export {
            registry.register(super::JsonFormatter);
        }

        let configured = [
            Some(&config.primary_format),
            config.secondary_format.as_ref(),
            config.debug_format.as_ref(),
        ];
        for name in configured.into_iter().flatten() {
            if !registry.has(name) {
                tracing::info!(format = %name, "configured output format is not available");
            }
        }
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
