//! Engine configuration: use case limits and policy switches.
//!
//! [`EngineConfig`] groups the static parameters that control voter
//! resolution, decision creation and finalization. These are
//! application-layer concerns, not domain policy.

use consensus_domain::TriggerPolicy;
use serde::{Deserialize, Serialize};

/// Engine limits and policy switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Largest voter set a decision may have; larger sets are rejected.
    pub max_voters: usize,
    /// Upper bound on pages read from one membership source.
    pub max_membership_pages: usize,
    /// Evaluate the finalization trigger after every recorded vote.
    pub finalize_on_vote: bool,
    /// Finalize early once a decision is deadlocked.
    pub finalize_on_deadlock: bool,
    /// Minimum gap between creation time and deadline, in seconds.
    pub min_deadline_lead_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_voters: 500,
            max_membership_pages: 1000,
            finalize_on_vote: true,
            finalize_on_deadlock: false,
            min_deadline_lead_secs: 0,
        }
    }
}

impl EngineConfig {
    /// Largest accepted `min_deadline_lead_secs` (ten years).
    pub const MAX_DEADLINE_LEAD_SECS: u64 = 10 * 365 * 24 * 3600;

    // ==================== Builder Methods ====================

    pub fn with_max_voters(mut self, max: usize) -> Self {
        self.max_voters = max;
        self
    }

    pub fn with_max_membership_pages(mut self, max: usize) -> Self {
        self.max_membership_pages = max;
        self
    }

    pub fn with_finalize_on_vote(mut self, enabled: bool) -> Self {
        self.finalize_on_vote = enabled;
        self
    }

    pub fn with_finalize_on_deadlock(mut self, enabled: bool) -> Self {
        self.finalize_on_deadlock = enabled;
        self
    }

    pub fn with_min_deadline_lead_secs(mut self, secs: u64) -> Self {
        self.min_deadline_lead_secs = secs;
        self
    }

    // ==================== Derived Values ====================

    pub fn trigger_policy(&self) -> TriggerPolicy {
        TriggerPolicy {
            finalize_on_deadlock: self.finalize_on_deadlock,
        }
    }

    /// Saturates to `Duration::MAX` when the lead does not fit a `Duration`.
    pub fn min_deadline_lead(&self) -> chrono::Duration {
        i64::try_from(self.min_deadline_lead_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}
