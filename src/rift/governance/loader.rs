//! Governance documents
//!
//! Each stage is described by one YAML document, `riftrc.<N>.yaml`:
//!
//!     stage_id: 0
//!     stage_name: TOKENIZER
//!     sp_alignment: LEXICAL_ANALYSIS
//!     governance_version: "1.0.0"
//!     sections:
//!       TOKEN_PATTERNS:
//!         IDENTIFIER_PATTERN: '^[a-zA-Z_]\w*$'
//!         IDENTIFIER_PRIORITY: 100
//!
//! Section and key order is kept as written. Scalars (strings, numbers, booleans) are stored in
//! their string form; anything else is rejected.
//!
//! The default documents under `governance/` are embedded into the binary so a store can always
//! be built without touching the filesystem. [`load_dir`] overlays whatever documents a
//! directory provides on top of those defaults.

use super::store::{GovernanceStore, StageConfig};
use super::{ConfigurationError, Stage};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

const DEFAULT_TOKENIZER: &str = include_str!("../../../governance/riftrc.0.yaml");
const DEFAULT_PARSER: &str = include_str!("../../../governance/riftrc.1.yaml");
const DEFAULT_COORDINATOR: &str = include_str!("../../../governance/riftrc.2.yaml");
const DEFAULT_OUTPUT: &str = include_str!("../../../governance/riftrc.3.yaml");

#[derive(Debug, Deserialize)]
struct StageDocument {
    stage_id: i64,
    stage_name: String,
    sp_alignment: String,
    #[serde(default = "default_version")]
    governance_version: String,
    #[serde(default)]
    sections: Mapping,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// The embedded default document for a stage
pub fn default_document(stage: Stage) -> &'static str {
    match stage {
        Stage::Tokenizer => DEFAULT_TOKENIZER,
        Stage::Parser => DEFAULT_PARSER,
        Stage::Coordinator => DEFAULT_COORDINATOR,
        Stage::Output => DEFAULT_OUTPUT,
    }
}

/// File name a stage document is looked up under
pub fn stage_file_name(stage: Stage) -> String {
    format!("riftrc.{}.yaml", stage.id())
}

/// Parse a single stage document
pub fn parse_stage_document(source: &str) -> Result<StageConfig, ConfigurationError> {
    let document: StageDocument = serde_yaml::from_str(source)
        .map_err(|e| ConfigurationError::Document(e.to_string()))?;

    let id = u8::try_from(document.stage_id)
        .map_err(|_| ConfigurationError::UnknownStage(document.stage_id))?;
    let stage = Stage::from_id(id)?;
    let mut config = StageConfig::new(stage, document.stage_name, document.sp_alignment)
        .with_version(document.governance_version);

    for (name, body) in &document.sections {
        let section = scalar_to_string(name)
            .ok_or_else(|| ConfigurationError::Document("section names must be scalars".into()))?;
        let entries = match body {
            Value::Mapping(entries) => entries,
            Value::Null => continue,
            _ => {
                return Err(ConfigurationError::Document(format!(
                    "section '{}' must be a mapping of keys to values",
                    section
                )))
            }
        };
        for (key, value) in entries {
            let key = scalar_to_string(key).ok_or_else(|| {
                ConfigurationError::Document(format!("section '{}' has a non-scalar key", section))
            })?;
            let value = scalar_to_string(value).ok_or_else(|| {
                ConfigurationError::Document(format!(
                    "key '{}.{}' must have a scalar value",
                    section, key
                ))
            })?;
            config.add(section.clone(), key, value);
        }
    }

    Ok(config)
}

/// Read and parse a stage document from disk
pub fn load_file(path: &Path) -> Result<StageConfig, ConfigurationError> {
    let source = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_stage_document(&source)
}

/// Build a store from the defaults, overlaid with any `riftrc.N.yaml` found in `dir`
///
/// A document must describe the stage its file name claims.
pub fn load_dir(dir: &Path) -> Result<GovernanceStore, ConfigurationError> {
    if !dir.is_dir() {
        return Err(ConfigurationError::Io {
            path: dir.display().to_string(),
            message: "not a directory".to_string(),
        });
    }

    let mut store = GovernanceStore::with_defaults()?;
    for stage in Stage::ALL {
        let path = dir.join(stage_file_name(stage));
        if !path.is_file() {
            continue;
        }
        let config = load_file(&path)?;
        if config.stage != stage {
            return Err(ConfigurationError::StageMismatch {
                expected: stage,
                found: config.stage,
            });
        }
        tracing::info!(stage = %stage, path = %path.display(), "governance override loaded");
        store.insert(config);
    }
    Ok(store)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl GovernanceStore {
    /// See [`load_dir`]
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigurationError> {
        load_dir(dir)
    }
}
