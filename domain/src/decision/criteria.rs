//! Success criteria for decisions
//!
//! This module defines the rules used to determine whether a decision passes.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;

/// Percentage of required voters that must vote yes under
/// [`SuccessCriteria::SuperMajority`].
pub const SUPER_MAJORITY_PERCENT: usize = 66;

/// Rule for determining whether a decision is approved
///
/// The rules differ in *denominator*, not only in threshold:
/// - `SimpleMajority`: yes votes over votes cast, strictly more than half
/// - `SuperMajority`: yes votes over required voters, at least 66%
/// - `Unanimous`: no "no" votes, quorum met, at least one yes
///
/// # Example
///
/// ```
/// use consensus_domain::decision::SuccessCriteria;
///
/// let rule: SuccessCriteria = "super_majority".parse().unwrap();
/// assert_eq!(rule, SuccessCriteria::SuperMajority);
/// assert_eq!(rule.to_string(), "super_majority");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuccessCriteria {
    /// More than half of the votes cast must be yes
    #[default]
    SimpleMajority,

    /// At least 66% of required voters must vote yes
    SuperMajority,

    /// Nobody votes no and quorum is reached
    Unanimous,
}

impl SuccessCriteria {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessCriteria::SimpleMajority => "simple_majority",
            SuccessCriteria::SuperMajority => "super_majority",
            SuccessCriteria::Unanimous => "unanimous",
        }
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            SuccessCriteria::SimpleMajority => "simple majority (more than 50% of votes cast)".to_string(),
            SuccessCriteria::SuperMajority => format!(
                "super majority (at least {}% of required voters)",
                SUPER_MAJORITY_PERCENT
            ),
            SuccessCriteria::Unanimous => "unanimous (no objections, quorum required)".to_string(),
        }
    }
}

impl std::fmt::Display for SuccessCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SuccessCriteria {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "simple_majority" | "majority" | "simple" => Ok(SuccessCriteria::SimpleMajority),
            "super_majority" | "supermajority" | "super" => Ok(SuccessCriteria::SuperMajority),
            "unanimous" | "unanimity" => Ok(SuccessCriteria::Unanimous),
            other => Err(DomainError::InvalidCriteria(format!(
                "unknown criteria '{}'. Valid: simple_majority, super_majority, unanimous",
                other
            ))),
        }
    }
}
