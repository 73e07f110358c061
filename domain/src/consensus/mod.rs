//! Consensus evaluation
//!
//! Pure, side-effect free rules applied to a decision's current votes:
//!
//! - [`counts`]: tally votes into [`VoteCounts`]
//! - [`outcome`]: apply the success criteria ([`calculate_outcome`])
//! - [`deadlock`]: advisory "can it still pass?" check ([`detect_deadlock`])
//! - [`trigger`]: when a decision must be finalized ([`should_finalize`])
//!
//! Every function recomputes from the full vote list; nothing here keeps a
//! running tally.

pub mod counts;
pub mod deadlock;
pub mod outcome;
pub mod trigger;

pub use counts::{VoteCounts, calculate_vote_counts, required_voters_count, required_voters_voted};
pub use deadlock::{DeadlockReport, detect_deadlock};
pub use outcome::{DecisionOutcome, calculate_outcome, evaluate_decision};
pub use trigger::{FinalizationCheck, TriggerPolicy, prepare_finalization, should_finalize};
