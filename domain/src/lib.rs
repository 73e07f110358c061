//! Domain layer for decision-consensus
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns, and
//! never reads the clock: every time-dependent rule takes `now` explicitly.
//!
//! # Core Concepts
//!
//! ## Decision
//!
//! A proposal with a [`SuccessCriteria`], a deadline and a fixed set of
//! [`Voter`]s. Voters cast [`Vote`]s (yes / no / abstain) while the decision
//! is [`DecisionStatus::Active`].
//!
//! ## Consensus
//!
//! - **Outcome**: [`calculate_outcome`] applies the criteria to a tally
//! - **Deadlock**: [`detect_deadlock`] tells whether passing is still possible
//! - **Trigger**: [`should_finalize`] decides when a decision must close
//!
//! ## Voters
//!
//! [`parse_user_references`] / [`parse_group_references`] normalize chat
//! references; [`VoterSetBuilder`] unions and bounds the resolved set.

pub mod consensus;
pub mod core;
pub mod decision;
pub mod voters;

// Re-export commonly used types
pub use consensus::{
    DeadlockReport, DecisionOutcome, FinalizationCheck, TriggerPolicy, VoteCounts,
    calculate_outcome, calculate_vote_counts, detect_deadlock, evaluate_decision,
    prepare_finalization, required_voters_count, should_finalize,
};
pub use core::error::{DomainError, ErrorCategory};
pub use decision::{
    Decision, DecisionId, DecisionStatus, FinalizationReason, FinalizationRecord,
    SuccessCriteria, UserId, Vote, VoteType, Voter,
};
pub use voters::{
    ChannelId, GroupId, Member, ParsedGroups, ParsedUsers, ReferenceInput, VoterSetBuilder,
    parse_channel_reference, parse_group_references, parse_user_references, voters_for,
};
