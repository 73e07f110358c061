//! Create Decision use case
//!
//! Resolves the voter set, validates the decision and stores both in one
//! atomic write. Any failure before that write (an unresolved handle, a
//! failed membership lookup, an oversized voter set) leaves the store
//! untouched.

use super::resolve_voters::{ResolveVotersError, ResolveVotersUseCase, VoterSelection};
use crate::config::EngineConfig;
use crate::ports::clock::Clock;
use crate::ports::decision_events::{DecisionEvent, DecisionEventSink, NoDecisionEvents};
use crate::ports::decision_store::{DecisionStore, StoreError};
use crate::ports::membership_directory::MembershipDirectory;
use chrono::{DateTime, Duration, Utc};
use consensus_domain::{
    Decision, DecisionId, DomainError, ErrorCategory, SuccessCriteria, UserId, Voter, voters_for,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when creating a decision
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateDecisionError {
    #[error("Voter resolution failed: {0}")]
    Voters(#[from] ResolveVotersError),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CreateDecisionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CreateDecisionError::Voters(e) => e.category(),
            CreateDecisionError::Invalid(e) => e.category(),
            CreateDecisionError::Store(StoreError::AlreadyExists(_)) => ErrorCategory::Conflict,
            CreateDecisionError::Store(_) => ErrorCategory::Dependency,
        }
    }
}

/// Input for the CreateDecision use case
#[derive(Debug, Clone)]
pub struct CreateDecisionInput {
    /// Caller-assigned id (for example the id of the originating message)
    pub id: DecisionId,
    pub name: String,
    pub proposal: String,
    pub success_criteria: SuccessCriteria,
    pub deadline: DateTime<Utc>,
    pub creator_id: UserId,
    /// Explicit quorum for unanimous decisions
    pub quorum: Option<u32>,
    pub voters: VoterSelection,
}

impl CreateDecisionInput {
    pub fn new(
        id: impl Into<DecisionId>,
        name: impl Into<String>,
        proposal: impl Into<String>,
        deadline: DateTime<Utc>,
        creator_id: impl Into<UserId>,
        voters: VoterSelection,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            proposal: proposal.into(),
            success_criteria: SuccessCriteria::default(),
            deadline,
            creator_id: creator_id.into(),
            quorum: None,
            voters,
        }
    }

    pub fn with_criteria(mut self, criteria: SuccessCriteria) -> Self {
        self.success_criteria = criteria;
        self
    }

    pub fn with_quorum(mut self, quorum: u32) -> Self {
        self.quorum = Some(quorum);
        self
    }
}

/// Output of the CreateDecision use case
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDecisionOutput {
    pub decision: Decision,
    pub voters: Vec<Voter>,
    /// User tokens the resolver did not recognize
    pub ignored_references: Vec<String>,
}

/// Use case for creating a decision together with its voter snapshot
pub struct CreateDecisionUseCase<D: MembershipDirectory + 'static, S: DecisionStore + 'static> {
    resolver: ResolveVotersUseCase<D>,
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn DecisionEventSink>,
    min_deadline_lead: Duration,
}

impl<D: MembershipDirectory + 'static, S: DecisionStore + 'static> CreateDecisionUseCase<D, S> {
    pub fn new(
        directory: Arc<D>,
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            resolver: ResolveVotersUseCase::new(directory, config.clone()),
            store,
            clock,
            events: Arc::new(NoDecisionEvents),
            min_deadline_lead: config.min_deadline_lead(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DecisionEventSink>) -> Self {
        self.events = events;
        self
    }

    pub async fn execute(
        &self,
        input: CreateDecisionInput,
    ) -> Result<CreateDecisionOutput, CreateDecisionError> {
        let resolved = self.resolver.execute(&input.voters).await?;

        let now = self.clock.now();
        let mut decision = Decision::new(
            input.id,
            input.name,
            input.proposal,
            input.success_criteria,
            input.deadline,
            input.creator_id,
            now,
        );
        if let Some(quorum) = input.quorum {
            decision = decision.with_quorum(quorum);
        }
        decision.validate_new(resolved.user_ids.len(), now, self.min_deadline_lead)?;

        let voters = voters_for(&decision.id, &resolved.user_ids);
        self.store.insert_decision(&decision, &voters).await?;

        info!(
            "Decision {} created by {}: {} voters, {}, deadline {}",
            decision.id,
            decision.creator_id,
            voters.len(),
            decision.success_criteria,
            decision.deadline.to_rfc3339()
        );
        self.events
            .record(&DecisionEvent::created(&decision, voters.len()));

        Ok(CreateDecisionOutput {
            decision,
            voters,
            ignored_references: resolved.ignored_references,
        })
    }
}
