//! Decision subdomain
//!
//! A [`Decision`] is proposed together with a fixed snapshot of [`Voter`]s.
//! Voters cast [`Vote`]s while the decision is active; finalization freezes
//! the outcome and moves the decision to a terminal [`DecisionStatus`].

pub mod criteria;
pub mod entities;
pub mod lifecycle;
pub mod value_objects;

pub use criteria::{SUPER_MAJORITY_PERCENT, SuccessCriteria};
pub use entities::{Decision, Vote, Voter};
pub use lifecycle::{DecisionStatus, FinalizationReason, FinalizationRecord};
pub use value_objects::{DecisionId, UserId, VoteType};
