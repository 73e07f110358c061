//! Outcome calculator.
//!
//! Pure functions that decide whether a decision passes under its
//! [`SuccessCriteria`]. The three policies use different denominators:
//!
//! | Criteria | Passes when | Denominator |
//! |----------|-------------|-------------|
//! | `SimpleMajority` | `yes / total > 0.5` | votes cast |
//! | `SuperMajority` | `yes / required >= 0.66` | required voters |
//! | `Unanimous` | `no == 0 && total >= quorum && yes > 0` | quorum |
//!
//! Comparisons are done in integer arithmetic so the thresholds are exact.

use serde::{Deserialize, Serialize};

use super::counts::{VoteCounts, calculate_vote_counts, required_voters_count};
use crate::decision::{Decision, SUPER_MAJORITY_PERCENT, SuccessCriteria, Vote, Voter};

/// Result of applying a success criteria to a tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub criteria: SuccessCriteria,
    pub passed: bool,
    pub counts: VoteCounts,
    pub required_voters_count: usize,
    /// Policy-specific yes percentage (0-100): of votes cast for simple
    /// majority and unanimity, of required voters for super majority.
    pub percentage: f64,
}

/// Apply `criteria` to `counts`.
///
/// `quorum` only affects [`SuccessCriteria::Unanimous`]; when `None` the
/// quorum is `required_voters_count`.
pub fn calculate_outcome(
    criteria: SuccessCriteria,
    counts: VoteCounts,
    required_voters_count: usize,
    quorum: Option<usize>,
) -> DecisionOutcome {
    let passed = passes(criteria, &counts, required_voters_count, quorum);
    let percentage = match criteria {
        SuccessCriteria::SimpleMajority | SuccessCriteria::Unanimous => {
            percent(counts.yes, counts.total)
        }
        SuccessCriteria::SuperMajority => percent(counts.yes, required_voters_count),
    };

    DecisionOutcome {
        criteria,
        passed,
        counts,
        required_voters_count,
        percentage,
    }
}

/// Recompute a decision's outcome from its full voter and vote lists.
pub fn evaluate_decision(decision: &Decision, voters: &[Voter], votes: &[Vote]) -> DecisionOutcome {
    calculate_outcome(
        decision.success_criteria,
        calculate_vote_counts(votes),
        required_voters_count(voters),
        decision.quorum.map(|q| q as usize),
    )
}

pub(crate) fn passes(
    criteria: SuccessCriteria,
    counts: &VoteCounts,
    required_voters_count: usize,
    quorum: Option<usize>,
) -> bool {
    match criteria {
        SuccessCriteria::SimpleMajority => counts.total > 0 && counts.yes * 2 > counts.total,
        SuccessCriteria::SuperMajority => {
            required_voters_count > 0
                && counts.yes * 100 >= required_voters_count * SUPER_MAJORITY_PERCENT
        }
        SuccessCriteria::Unanimous => {
            let quorum = quorum.unwrap_or(required_voters_count);
            counts.no == 0 && counts.total >= quorum && counts.yes > 0
        }
    }
}

pub(crate) fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}
