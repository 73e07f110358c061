//! Decision lifecycle state machine.
//!
//! ```text
//!            ┌──────────► Approved
//!  Active ───┤
//!            └──────────► Rejected
//! ```
//!
//! `Active` is the only non-terminal state. Terminal states never change
//! again, and the only way out of `Active` is a [`FinalizationRecord`]
//! produced by the finalization trigger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consensus::outcome::DecisionOutcome;
use crate::core::error::DomainError;

/// Status of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Accepting votes
    #[default]
    Active,
    /// Finalized: the success criteria were met
    Approved,
    /// Finalized: the success criteria were not met
    Rejected,
}

impl DecisionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, DecisionStatus::Active)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Terminal status for a computed outcome.
    pub fn for_outcome(passed: bool) -> Self {
        if passed {
            DecisionStatus::Approved
        } else {
            DecisionStatus::Rejected
        }
    }

    /// Validate a transition and return the new status.
    ///
    /// Only `Active -> Approved` and `Active -> Rejected` are allowed.
    pub fn transition_to(self, to: DecisionStatus) -> Result<DecisionStatus, DomainError> {
        match (self, to) {
            (DecisionStatus::Active, DecisionStatus::Approved | DecisionStatus::Rejected) => Ok(to),
            (from, to) => Err(DomainError::InvalidTransition { from, to }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Active => "active",
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a decision left the active state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizationReason {
    /// Every required voter has voted
    AllVotesCast,
    /// The deadline passed
    DeadlineReached,
    /// The outcome could no longer change (only when enabled)
    Deadlocked,
}

impl FinalizationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalizationReason::AllVotesCast => "all_votes_cast",
            FinalizationReason::DeadlineReached => "deadline_reached",
            FinalizationReason::Deadlocked => "deadlocked",
        }
    }
}

impl std::fmt::Display for FinalizationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frozen result of a finalization, persisted with the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizationRecord {
    pub status: DecisionStatus,
    pub outcome: DecisionOutcome,
    pub reason: FinalizationReason,
    pub finalized_at: DateTime<Utc>,
}

impl FinalizationRecord {
    pub fn new(
        outcome: DecisionOutcome,
        reason: FinalizationReason,
        finalized_at: DateTime<Utc>,
    ) -> Self {
        Self {
            status: DecisionStatus::for_outcome(outcome.passed),
            outcome,
            reason,
            finalized_at,
        }
    }
}
