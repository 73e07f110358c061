//! Decision store port
//!
//! Key-value persistence for decisions, voter snapshots and votes.
//!
//! The contract:
//! - single-key reads and writes only, no joins
//! - `upsert_vote` replaces the whole record stored under
//!   `(decision_id, user_id)`; concurrent writes to one key are linearized
//!   by the store and the last committed write wins
//! - `upsert_vote` is conditional too: it is refused with
//!   [`StoreError::DecisionClosed`] once the decision is terminal
//! - `finalize_if_active` is a conditional write: it commits only if the
//!   stored decision is still active at commit time
//! - `insert_decision` stores a decision together with its voter snapshot,
//!   all or nothing

use async_trait::async_trait;
use consensus_domain::{
    Decision, DecisionId, DecisionStatus, FinalizationRecord, UserId, Vote, Voter,
};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Decision already exists: {0}")]
    AlreadyExists(DecisionId),

    #[error("Decision not found: {0}")]
    NotFound(DecisionId),

    #[error("Decision {decision_id} is closed ({status})")]
    DecisionClosed {
        decision_id: DecisionId,
        status: DecisionStatus,
    },

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result of a conditional finalization write.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeWrite {
    /// This call moved the decision out of `Active`
    Committed(Decision),
    /// Someone else finalized first; the stored decision is returned unchanged
    AlreadyFinalized(Decision),
}

/// Persistence for the consensus engine.
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Store a new decision and its voters atomically.
    async fn insert_decision(
        &self,
        decision: &Decision,
        voters: &[Voter],
    ) -> Result<(), StoreError>;

    async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError>;

    async fn get_voter(
        &self,
        decision_id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Voter>, StoreError>;

    async fn list_voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError>;

    /// Replace the vote stored under `(vote.decision_id, vote.user_id)`,
    /// checked against the decision's status in the same atomic step.
    async fn upsert_vote(&self, vote: &Vote) -> Result<(), StoreError>;

    async fn list_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError>;

    /// Commit `record` only if the decision is still active.
    async fn finalize_if_active(
        &self,
        decision_id: &DecisionId,
        record: &FinalizationRecord,
    ) -> Result<FinalizeWrite, StoreError>;

    /// Ids of every decision whose status is active.
    async fn list_active_decisions(&self) -> Result<Vec<DecisionId>, StoreError>;
}
