//! Logging configuration from TOML (`[logging]` section)

use super::super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const FALLBACK_LEVEL: &str = "info";

/// Raw logging configuration
///
/// # Example
///
/// ```toml
/// [logging]
/// level = "info,consensus_application=debug"   # EnvFilter directive
/// json = false
/// event_log = "/var/log/consensus/events.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit newline-delimited JSON instead of human-readable lines
    pub json: bool,
    /// Append decision lifecycle events to this JSONL file
    pub event_log: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: FALLBACK_LEVEL.to_string(),
            json: false,
            event_log: None,
        }
    }
}

impl FileLoggingConfig {
    /// Build the filter, falling back to `info` with a warning on a bad directive.
    pub fn parse_filter(&self) -> (EnvFilter, Vec<ConfigIssue>) {
        match EnvFilter::try_new(&self.level) {
            Ok(filter) => (filter, vec![]),
            Err(e) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidLogLevel {
                        value: self.level.clone(),
                    },
                    message: format!(
                        "logging.level: cannot parse '{}' ({}), falling back to '{}'",
                        self.level, e, FALLBACK_LEVEL
                    ),
                };
                (EnvFilter::new(FALLBACK_LEVEL), vec![issue])
            }
        }
    }
}
