//! Decision, Voter and Vote entities.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::criteria::SuccessCriteria;
use super::lifecycle::{DecisionStatus, FinalizationRecord};
use super::value_objects::{DecisionId, UserId, VoteType};
use crate::core::error::DomainError;

/// A proposal put to a fixed set of voters.
///
/// `status` and `finalization` are private: the only way to change them is
/// [`Decision::finalize`], which enforces the lifecycle state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub name: String,
    pub proposal: String,
    pub success_criteria: SuccessCriteria,
    pub deadline: DateTime<Utc>,
    pub creator_id: UserId,
    /// Explicit quorum for unanimous decisions (defaults to the required-voter count)
    pub quorum: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    status: DecisionStatus,
    finalization: Option<FinalizationRecord>,
}

impl Decision {
    pub fn new(
        id: impl Into<DecisionId>,
        name: impl Into<String>,
        proposal: impl Into<String>,
        success_criteria: SuccessCriteria,
        deadline: DateTime<Utc>,
        creator_id: impl Into<UserId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            proposal: proposal.into(),
            success_criteria,
            deadline,
            creator_id: creator_id.into(),
            quorum: None,
            created_at: now,
            updated_at: now,
            status: DecisionStatus::Active,
            finalization: None,
        }
    }

    pub fn with_quorum(mut self, quorum: u32) -> Self {
        self.quorum = Some(quorum);
        self
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// The frozen outcome, present once the decision is terminal.
    pub fn finalization(&self) -> Option<&FinalizationRecord> {
        self.finalization.as_ref()
    }

    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// Check a freshly built decision before it is persisted.
    pub fn validate_new(
        &self,
        voter_count: usize,
        now: DateTime<Utc>,
        min_deadline_lead: Duration,
    ) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidDecision("name must not be empty".to_string()));
        }
        if self.proposal.trim().is_empty() {
            return Err(DomainError::InvalidDecision(
                "proposal must not be empty".to_string(),
            ));
        }
        let earliest = now.checked_add_signed(min_deadline_lead).ok_or_else(|| {
            DomainError::InvalidDecision(format!(
                "minimum deadline lead of {}s is out of range",
                min_deadline_lead.num_seconds()
            ))
        })?;
        if self.deadline <= earliest {
            return Err(DomainError::InvalidDecision(format!(
                "deadline {} must be after {}",
                self.deadline.to_rfc3339(),
                earliest.to_rfc3339()
            )));
        }
        if voter_count == 0 {
            return Err(DomainError::InvalidDecision(
                "at least one voter is required".to_string(),
            ));
        }
        if let Some(quorum) = self.quorum {
            if self.success_criteria != SuccessCriteria::Unanimous {
                return Err(DomainError::InvalidDecision(format!(
                    "quorum only applies to unanimous decisions, not {}",
                    self.success_criteria
                )));
            }
            if quorum == 0 || quorum as usize > voter_count {
                return Err(DomainError::InvalidDecision(format!(
                    "quorum must be between 1 and the voter count {}, got {}",
                    voter_count, quorum
                )));
            }
        }
        Ok(())
    }

    /// Move from `Active` to the terminal status carried by `record`.
    pub fn finalize(&mut self, record: FinalizationRecord) -> Result<(), DomainError> {
        self.status = self.status.transition_to(record.status)?;
        self.updated_at = record.finalized_at;
        self.finalization = Some(record);
        Ok(())
    }
}

/// A user eligible to vote on a decision. Fixed at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voter {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub required: bool,
}

impl Voter {
    pub fn required(decision_id: DecisionId, user_id: UserId) -> Self {
        Self {
            decision_id,
            user_id,
            required: true,
        }
    }
}

/// A ballot keyed by `(decision_id, user_id)`; the latest write replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub vote_type: VoteType,
    pub voted_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(
        decision_id: DecisionId,
        user_id: UserId,
        vote_type: VoteType,
        voted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            decision_id,
            user_id,
            vote_type,
            voted_at,
        }
    }

    pub fn key(&self) -> (DecisionId, UserId) {
        (self.decision_id.clone(), self.user_id.clone())
    }
}
