//! Deadlock detection.
//!
//! A decision is deadlocked when it cannot pass any more, however the
//! remaining required voters vote. Detection is advisory and never changes
//! decision status by itself.

use serde::{Deserialize, Serialize};

use super::counts::VoteCounts;
use super::outcome::{passes, percent};
use crate::decision::SuccessCriteria;

/// Advisory deadlock assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlockReport {
    pub deadlocked: bool,
    /// Required voters who have not voted yet
    pub remaining_votes: usize,
    /// Policy percentage if every remaining voter voted yes
    pub best_case_percentage: f64,
}

/// Assess whether `counts` can still reach a passing outcome.
///
/// Simple and super majority assume every remaining voter votes yes and
/// re-apply the normal threshold. Unanimity is deadlocked by any single "no";
/// otherwise it stays open while votes remain.
pub fn detect_deadlock(
    criteria: SuccessCriteria,
    counts: VoteCounts,
    required_voters_count: usize,
    quorum: Option<usize>,
) -> DeadlockReport {
    let remaining = required_voters_count.saturating_sub(counts.total);
    let best = VoteCounts::new(counts.yes + remaining, counts.no, counts.abstain);

    let best_case_percentage = match criteria {
        SuccessCriteria::SimpleMajority | SuccessCriteria::Unanimous => {
            percent(best.yes, best.total)
        }
        SuccessCriteria::SuperMajority => percent(best.yes, required_voters_count),
    };

    let deadlocked = match criteria {
        SuccessCriteria::SimpleMajority | SuccessCriteria::SuperMajority => {
            !passes(criteria, &best, required_voters_count, quorum)
        }
        SuccessCriteria::Unanimous => {
            if counts.no > 0 {
                true
            } else if remaining > 0 {
                false
            } else {
                !passes(criteria, &counts, required_voters_count, quorum)
            }
        }
    };

    DeadlockReport {
        deadlocked,
        remaining_votes: remaining,
        best_case_percentage,
    }
}
