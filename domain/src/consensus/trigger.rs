//! Finalization trigger.
//!
//! Decides whether an active decision must be finalized now and, if so,
//! builds the [`FinalizationRecord`] to commit. Time is always passed in
//! by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::counts::{calculate_vote_counts, required_voters_count, required_voters_voted};
use super::deadlock::detect_deadlock;
use super::outcome::evaluate_decision;
use crate::decision::{Decision, DecisionStatus, FinalizationReason, FinalizationRecord, Vote, Voter};

/// Knobs for the trigger that are not part of the decision itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TriggerPolicy {
    /// Also finalize as soon as the decision is deadlocked
    pub finalize_on_deadlock: bool,
}

/// Result of evaluating the finalization trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FinalizationCheck {
    /// The decision must leave the active state
    Finalize { reason: FinalizationReason },
    /// Still collecting votes
    Pending { voted: usize, required: usize },
    /// The decision is already terminal
    AlreadyFinalized { status: DecisionStatus },
}

impl FinalizationCheck {
    pub fn should_finalize(&self) -> bool {
        matches!(self, FinalizationCheck::Finalize { .. })
    }

    pub fn reason(&self) -> String {
        match self {
            FinalizationCheck::Finalize { reason } => reason.to_string(),
            FinalizationCheck::Pending { voted, required } => {
                format!("waiting for votes ({}/{})", voted, required)
            }
            FinalizationCheck::AlreadyFinalized { status } => {
                format!("already finalized ({})", status)
            }
        }
    }
}

/// Decide whether `decision` must be finalized at `now`.
///
/// Completion (every required voter has voted) is checked before the
/// deadline so a decision completed exactly at its deadline reports
/// `AllVotesCast`.
pub fn should_finalize(
    decision: &Decision,
    voters: &[Voter],
    votes: &[Vote],
    now: DateTime<Utc>,
    policy: TriggerPolicy,
) -> FinalizationCheck {
    if decision.status().is_terminal() {
        return FinalizationCheck::AlreadyFinalized {
            status: decision.status(),
        };
    }

    let required = required_voters_count(voters);
    let voted = required_voters_voted(voters, votes);

    if voted >= required {
        return FinalizationCheck::Finalize {
            reason: FinalizationReason::AllVotesCast,
        };
    }

    if decision.is_past_deadline(now) {
        return FinalizationCheck::Finalize {
            reason: FinalizationReason::DeadlineReached,
        };
    }

    if policy.finalize_on_deadlock {
        let report = detect_deadlock(
            decision.success_criteria,
            calculate_vote_counts(votes),
            required,
            decision.quorum.map(|q| q as usize),
        );
        if report.deadlocked {
            return FinalizationCheck::Finalize {
                reason: FinalizationReason::Deadlocked,
            };
        }
    }

    FinalizationCheck::Pending { voted, required }
}

/// Evaluate the trigger and, when it fires, compute the record to commit.
pub fn prepare_finalization(
    decision: &Decision,
    voters: &[Voter],
    votes: &[Vote],
    now: DateTime<Utc>,
    policy: TriggerPolicy,
) -> Result<FinalizationRecord, FinalizationCheck> {
    match should_finalize(decision, voters, votes, now, policy) {
        FinalizationCheck::Finalize { reason } => Ok(FinalizationRecord::new(
            evaluate_decision(decision, voters, votes),
            reason,
            now,
        )),
        other => Err(other),
    }
}
