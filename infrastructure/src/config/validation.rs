//! Structured configuration issues.
//!
//! [`FileConfig::validate`](super::FileConfig::validate) reports every
//! problem at once instead of failing on the first one, so a caller can
//! print warnings and refuse to start only on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: a fallback value is used instead.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A limit that must be positive is zero.
    ZeroLimit { field: String },
    /// A value exceeds its upper bound.
    OutOfRange { field: String, max: u64 },
    /// The log filter directive could not be parsed.
    InvalidLogLevel { value: String },
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
