//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is `#[serde(default)]`, so a partial file (or no file at
//! all) yields the built-in defaults for whatever is missing.

mod consensus;
mod logging;

pub use consensus::FileConsensusConfig;
pub use logging::FileLoggingConfig;

use super::validation::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Engine limits and finalization policy
    pub consensus: FileConsensusConfig,
    /// Tracing and event log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.consensus.validate();
        issues.extend(self.logging.parse_filter().1);
        issues
    }

    /// True when no issue is severe enough to refuse startup.
    pub fn is_usable(&self) -> bool {
        !self.validate().iter().any(ConfigIssue::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::{ConfigIssueCode, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[consensus]
max_voters = 50
max_membership_pages = 20
finalize_on_vote = false
finalize_on_deadlock = true
min_deadline_lead_secs = 300

[logging]
level = "debug"
json = true
event_log = "events.jsonl"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let engine = config.consensus.to_engine_config();

        assert_eq!(engine.max_voters, 50);
        assert_eq!(engine.max_membership_pages, 20);
        assert!(!engine.finalize_on_vote);
        assert!(engine.finalize_on_deadlock);
        assert_eq!(engine.min_deadline_lead(), chrono::Duration::minutes(5));
        assert!(config.logging.json);
        assert_eq!(
            config.logging.event_log.as_deref(),
            Some(std::path::Path::new("events.jsonl"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(config.is_usable());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[consensus]
max_voters = 0

[logging]
level = "loud=please=now"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(matches!(
            issues[1].code,
            ConfigIssueCode::InvalidLogLevel { .. }
        ));
        assert!(!config.is_usable());
    }
}
