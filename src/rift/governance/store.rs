//! Governance store
//!
//! A [`StageConfig`] keeps its entries in insertion order. Lookups scan from the newest entry
//! backwards, so adding the same `(section, key)` twice means the last write wins; there is no
//! deletion. Section views preserve the position of a key's first appearance, which is what
//! keeps pattern rules in insertion order.

use super::loader;
use super::{ConfigurationError, Stage};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// One `(section, key) -> value` governance entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GovernanceEntry {
    pub section: String,
    pub key: String,
    pub value: String,
}

/// The governance record for a single stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageConfig {
    pub stage: Stage,
    pub stage_name: String,
    pub sp_alignment: String,
    pub governance_version: String,
    entries: Vec<GovernanceEntry>,
}

impl StageConfig {
    pub fn new(stage: Stage, stage_name: impl Into<String>, sp_alignment: impl Into<String>) -> Self {
        StageConfig {
            stage,
            stage_name: stage_name.into(),
            sp_alignment: sp_alignment.into(),
            governance_version: "1.0.0".to_string(),
            entries: Vec::new(),
        }
    }

    /// The embedded default configuration for `stage`
    pub fn builtin(stage: Stage) -> Result<Self, ConfigurationError> {
        loader::parse_stage_document(loader::default_document(stage))
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.governance_version = version.into();
        self
    }

    /// Builder form of [`StageConfig::add`]
    pub fn with_entry(
        mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.add(section, key, value);
        self
    }

    /// Append an entry. An existing `(section, key)` is shadowed, not removed.
    pub fn add(&mut self, section: impl Into<String>, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push(GovernanceEntry {
            section: section.into(),
            key: key.into(),
            value: value.into(),
        });
    }

    /// Value of the most recently added entry for `(section, key)`
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.section == section && entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Like [`StageConfig::get`], but absence is a [`ConfigurationError::MissingKey`]
    pub fn require(&self, section: &str, key: &str) -> Result<&str, ConfigurationError> {
        self.get(section, key)
            .ok_or_else(|| ConfigurationError::MissingKey {
                stage: self.stage,
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    pub fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, ConfigurationError> {
        match self.get(section, key) {
            None => Ok(None),
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| self.invalid(section, key, value, "an integer")),
        }
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, ConfigurationError> {
        match self.get(section, key) {
            None => Ok(None),
            Some(value) => parse_flag(value)
                .map(Some)
                .ok_or_else(|| self.invalid(section, key, value, "a boolean")),
        }
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.entries.iter().any(|entry| entry.section == section)
    }

    /// Section names in order of first appearance
    pub fn section_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.section.as_str()) {
                names.push(entry.section.as_str());
            }
        }
        names
    }

    /// Effective `(key, value)` pairs of a section
    ///
    /// Keys keep the position of their first appearance and carry their latest value.
    pub fn section(&self, section: &str) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.section == section) {
            match pairs.iter_mut().find(|(key, _)| *key == entry.key) {
                Some(pair) => pair.1 = entry.value.as_str(),
                None => pairs.push((entry.key.as_str(), entry.value.as_str())),
            }
        }
        pairs
    }

    pub fn entries(&self) -> &[GovernanceEntry] {
        &self.entries
    }

    pub(crate) fn invalid(
        &self,
        section: &str,
        key: &str,
        value: &str,
        expected: &'static str,
    ) -> ConfigurationError {
        ConfigurationError::InvalidValue {
            stage: self.stage,
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

/// Parse the boolean spellings used across governance files
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "enabled" | "yes" | "on" | "1" => Some(true),
        "false" | "disabled" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Governance records for all stages, keyed by stage
#[derive(Debug, Clone, Default)]
pub struct GovernanceStore {
    stages: BTreeMap<Stage, StageConfig>,
}

impl GovernanceStore {
    /// Create an empty store
    pub fn new() -> Self {
        GovernanceStore {
            stages: BTreeMap::new(),
        }
    }

    /// Create a store with the embedded default configuration of every stage
    pub fn with_defaults() -> Result<Self, ConfigurationError> {
        let mut store = Self::new();
        for stage in Stage::ALL {
            store.load_stage(stage.id())?;
        }
        Ok(store)
    }

    /// Load the default configuration for a stage id, once
    ///
    /// Loading an already present stage is a no-op that returns the existing record.
    pub fn load_stage(&mut self, stage_id: u8) -> Result<&StageConfig, ConfigurationError> {
        let stage = Stage::from_id(stage_id)?;
        match self.stages.entry(stage) {
            Entry::Occupied(existing) => {
                tracing::debug!(stage = %stage, "stage configuration already loaded");
                Ok(&*existing.into_mut())
            }
            Entry::Vacant(slot) => {
                let config = StageConfig::builtin(stage)?;
                tracing::info!(
                    stage = %stage,
                    name = %config.stage_name,
                    sp_alignment = %config.sp_alignment,
                    sections = config.section_names().len(),
                    "loaded stage configuration"
                );
                Ok(&*slot.insert(config))
            }
        }
    }

    /// Install a stage record, replacing any previous one for the same stage
    pub fn insert(&mut self, config: StageConfig) -> Option<StageConfig> {
        self.stages.insert(config.stage, config)
    }

    pub fn is_loaded(&self, stage: Stage) -> bool {
        self.stages.contains_key(&stage)
    }

    pub fn stage(&self, stage: Stage) -> Result<&StageConfig, ConfigurationError> {
        self.stages
            .get(&stage)
            .ok_or(ConfigurationError::StageNotLoaded(stage))
    }

    /// Loaded stage records in stage order
    pub fn stages(&self) -> impl Iterator<Item = &StageConfig> {
        self.stages.values()
    }

    pub fn get(&self, stage: Stage, section: &str, key: &str) -> Option<&str> {
        self.stages.get(&stage)?.get(section, key)
    }

    pub fn get_int(
        &self,
        stage: Stage,
        section: &str,
        key: &str,
    ) -> Result<Option<i64>, ConfigurationError> {
        self.stage(stage)?.get_int(section, key)
    }

    pub fn get_bool(
        &self,
        stage: Stage,
        section: &str,
        key: &str,
    ) -> Result<Option<bool>, ConfigurationError> {
        self.stage(stage)?.get_bool(section, key)
    }
}
