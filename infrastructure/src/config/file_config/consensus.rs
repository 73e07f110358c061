//! Engine configuration from TOML (`[consensus]` section)

use super::super::validation::{ConfigIssue, ConfigIssueCode, Severity};
use consensus_application::EngineConfig;
use serde::{Deserialize, Serialize};

/// Raw engine configuration
///
/// # Example
///
/// ```toml
/// [consensus]
/// max_voters = 500
/// max_membership_pages = 1000
/// finalize_on_vote = true
/// finalize_on_deadlock = false   # keep deadlock advisory
/// min_deadline_lead_secs = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Largest voter set a decision may have
    pub max_voters: usize,
    /// Upper bound on pages read from one group or channel
    pub max_membership_pages: usize,
    /// Run the finalization trigger after every vote
    pub finalize_on_vote: bool,
    /// Finalize as soon as the outcome can no longer change
    pub finalize_on_deadlock: bool,
    /// Minimum gap between creation and deadline, in seconds
    pub min_deadline_lead_secs: u64,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            max_voters: engine.max_voters,
            max_membership_pages: engine.max_membership_pages,
            finalize_on_vote: engine.finalize_on_vote,
            finalize_on_deadlock: engine.finalize_on_deadlock,
            min_deadline_lead_secs: engine.min_deadline_lead_secs,
        }
    }
}

impl FileConsensusConfig {
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_max_voters(self.max_voters)
            .with_max_membership_pages(self.max_membership_pages)
            .with_finalize_on_vote(self.finalize_on_vote)
            .with_finalize_on_deadlock(self.finalize_on_deadlock)
            .with_min_deadline_lead_secs(self.min_deadline_lead_secs)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues: Vec<ConfigIssue> = [
            ("consensus.max_voters", self.max_voters),
            ("consensus.max_membership_pages", self.max_membership_pages),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, _)| ConfigIssue {
            severity: Severity::Error,
            code: ConfigIssueCode::ZeroLimit {
                field: field.to_string(),
            },
            message: format!("{}: must be at least 1", field),
        })
        .collect();

        let max_lead = EngineConfig::MAX_DEADLINE_LEAD_SECS;
        if self.min_deadline_lead_secs > max_lead {
            let field = "consensus.min_deadline_lead_secs";
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::OutOfRange {
                    field: field.to_string(),
                    max: max_lead,
                },
                message: format!(
                    "{}: {} exceeds the maximum of {}",
                    field, self.min_deadline_lead_secs, max_lead
                ),
            });
        }
        issues
    }
}
