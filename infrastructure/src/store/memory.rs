//! In-memory decision store.
//!
//! All tables live behind one `RwLock`, so every write (including the
//! decision + voter insert and the conditional finalize) is applied
//! atomically and writes to the same key are linearized in lock order.

use async_trait::async_trait;
use consensus_application::ports::decision_store::{DecisionStore, FinalizeWrite, StoreError};
use consensus_domain::{Decision, DecisionId, FinalizationRecord, UserId, Vote, Voter};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
struct Tables {
    decisions: HashMap<DecisionId, Decision>,
    voters: HashMap<DecisionId, Vec<Voter>>,
    votes: HashMap<DecisionId, HashMap<UserId, Vote>>,
}

/// Process-local [`DecisionStore`].
#[derive(Debug, Default)]
pub struct InMemoryDecisionStore {
    tables: RwLock<Tables>,
}

impl InMemoryDecisionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(e: PoisonError<T>) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

#[async_trait]
impl DecisionStore for InMemoryDecisionStore {
    async fn insert_decision(
        &self,
        decision: &Decision,
        voters: &[Voter],
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if tables.decisions.contains_key(&decision.id) {
            return Err(StoreError::AlreadyExists(decision.id.clone()));
        }
        tables
            .decisions
            .insert(decision.id.clone(), decision.clone());
        tables.voters.insert(decision.id.clone(), voters.to_vec());
        Ok(())
    }

    async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.decisions.get(id).cloned())
    }

    async fn get_voter(
        &self,
        decision_id: &DecisionId,
        user_id: &UserId,
    ) -> Result<Option<Voter>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables
            .voters
            .get(decision_id)
            .and_then(|voters| voters.iter().find(|v| &v.user_id == user_id))
            .cloned())
    }

    async fn list_voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        Ok(tables.voters.get(decision_id).cloned().unwrap_or_default())
    }

    async fn upsert_vote(&self, vote: &Vote) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let decision = tables
            .decisions
            .get(&vote.decision_id)
            .ok_or_else(|| StoreError::NotFound(vote.decision_id.clone()))?;
        if !decision.is_active() {
            return Err(StoreError::DecisionClosed {
                decision_id: vote.decision_id.clone(),
                status: decision.status(),
            });
        }
        tables
            .votes
            .entry(vote.decision_id.clone())
            .or_default()
            .insert(vote.user_id.clone(), vote.clone());
        Ok(())
    }

    async fn list_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        let mut votes: Vec<Vote> = tables
            .votes
            .get(decision_id)
            .map(|by_user| by_user.values().cloned().collect())
            .unwrap_or_default();
        votes.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(votes)
    }

    async fn finalize_if_active(
        &self,
        decision_id: &DecisionId,
        record: &FinalizationRecord,
    ) -> Result<FinalizeWrite, StoreError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        let decision = tables
            .decisions
            .get_mut(decision_id)
            .ok_or_else(|| StoreError::NotFound(decision_id.clone()))?;

        if !decision.is_active() {
            return Ok(FinalizeWrite::AlreadyFinalized(decision.clone()));
        }

        // Finalize a copy so a rejected transition leaves the stored row untouched
        let mut finalized = decision.clone();
        finalized
            .finalize(record.clone())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        *decision = finalized.clone();
        Ok(FinalizeWrite::Committed(finalized))
    }

    async fn list_active_decisions(&self) -> Result<Vec<DecisionId>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;
        let mut ids: Vec<DecisionId> = tables
            .decisions
            .values()
            .filter(|d| d.is_active())
            .map(|d| d.id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}
