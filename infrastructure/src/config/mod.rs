//! Configuration file loading for decision-consensus
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONSENSUS_*` environment variables
//! 2. Explicitly given file
//! 3. Project root: `./consensus.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/decision-consensus/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod validation;

pub use file_config::{FileConfig, FileConsensusConfig, FileLoggingConfig};
pub use loader::ConfigLoader;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
