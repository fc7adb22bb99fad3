//! Governance: externally supplied, per-stage configuration
//!
//! Every stage of the pipeline is driven by a [`StageConfig`]: a stage id, two descriptive
//! labels and an ordered list of `(section, key, value)` entries. The [`GovernanceStore`] owns
//! the records for all four stages and is read-only once the pipeline starts.
//!
//! Layers:
//! - `store`   raw string lookup with last-insert-wins semantics
//! - `loader`  YAML documents (`riftrc.N.yaml`), embedded defaults, directory overlays
//! - `typed`   the statically known per-stage configs that stage processors consume

pub mod error;
pub mod loader;
pub mod stage;
pub mod store;
pub mod typed;

pub use error::ConfigurationError;
pub use stage::Stage;
pub use store::{parse_flag, GovernanceEntry, GovernanceStore, StageConfig};
pub use typed::{CoordinatorConfig, OutputConfig, ParserConfig, TokenizerConfig};
