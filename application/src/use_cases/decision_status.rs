//! Decision status read model.
//!
//! A finalized decision reports the outcome frozen at finalization time;
//! it is never recomputed from the vote ledger.

use crate::ports::clock::Clock;
use crate::ports::decision_store::{DecisionStore, StoreError};
use chrono::{DateTime, Utc};
use consensus_domain::{
    DeadlockReport, Decision, DecisionId, DecisionOutcome, ErrorCategory, VoteCounts,
    calculate_vote_counts, detect_deadlock, required_voters_count,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecisionStatusError {
    #[error("Decision not found: {0}")]
    DecisionNotFound(DecisionId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DecisionStatusError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DecisionStatusError::DecisionNotFound(_) => ErrorCategory::NotFound,
            DecisionStatusError::Store(_) => ErrorCategory::Dependency,
        }
    }
}

/// Point-in-time view of a decision for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionSnapshot {
    pub decision: Decision,
    pub counts: VoteCounts,
    pub required_voters_count: usize,
    /// Required voters who have not voted yet
    pub remaining_voters: usize,
    pub deadline: DateTime<Utc>,
    pub past_deadline: bool,
    pub deadlock: DeadlockReport,
    /// Frozen outcome, present once finalized
    pub outcome: Option<DecisionOutcome>,
}

impl DecisionSnapshot {
    pub fn is_finalized(&self) -> bool {
        self.outcome.is_some()
    }
}

pub struct GetDecisionStatusUseCase<S: DecisionStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DecisionStore + 'static> GetDecisionStatusUseCase<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(
        &self,
        decision_id: &DecisionId,
    ) -> Result<DecisionSnapshot, DecisionStatusError> {
        let decision = self
            .store
            .get_decision(decision_id)
            .await?
            .ok_or_else(|| DecisionStatusError::DecisionNotFound(decision_id.clone()))?;

        let (counts, required, outcome) = match decision.finalization() {
            Some(record) => (
                record.outcome.counts,
                record.outcome.required_voters_count,
                Some(record.outcome.clone()),
            ),
            None => {
                let voters = self.store.list_voters(decision_id).await?;
                let votes = self.store.list_votes(decision_id).await?;
                (
                    calculate_vote_counts(&votes),
                    required_voters_count(&voters),
                    None,
                )
            }
        };

        let deadlock = detect_deadlock(
            decision.success_criteria,
            counts,
            required,
            decision.quorum.map(|q| q as usize),
        );

        Ok(DecisionSnapshot {
            counts,
            required_voters_count: required,
            remaining_voters: required.saturating_sub(counts.total),
            deadline: decision.deadline,
            past_deadline: decision.is_past_deadline(self.clock.now()),
            deadlock,
            outcome,
            decision,
        })
    }
}
