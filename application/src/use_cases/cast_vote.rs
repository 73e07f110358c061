//! Cast Vote use case
//!
//! Records one voter's ballot. Each rejection carries a distinct reason so
//! the caller can tell an ineligible voter from a closed decision from a
//! system failure.

use super::finalize_decision::{FinalizeDecisionUseCase, FinalizeOutcome};
use crate::config::EngineConfig;
use crate::ports::clock::Clock;
use crate::ports::decision_events::{DecisionEvent, DecisionEventSink, NoDecisionEvents};
use crate::ports::decision_store::{DecisionStore, StoreError};
use consensus_domain::{
    DecisionId, DecisionStatus, ErrorCategory, UserId, Vote, VoteCounts, VoteType,
    calculate_vote_counts,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur when casting a vote
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastVoteError {
    #[error("Decision not found: {0}")]
    DecisionNotFound(DecisionId),

    #[error("Decision {decision_id} is already finalized ({status})")]
    DecisionFinalized {
        decision_id: DecisionId,
        status: DecisionStatus,
    },

    #[error("{user_id} is not a required voter on decision {decision_id}")]
    NotEligible {
        decision_id: DecisionId,
        user_id: UserId,
    },

    #[error("Invalid vote type: '{0}'")]
    InvalidVoteType(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CastVoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CastVoteError::DecisionNotFound(_) => ErrorCategory::NotFound,
            CastVoteError::DecisionFinalized { .. } => ErrorCategory::Conflict,
            CastVoteError::NotEligible { .. } | CastVoteError::InvalidVoteType(_) => {
                ErrorCategory::Validation
            }
            CastVoteError::Store(_) => ErrorCategory::Dependency,
        }
    }
}

/// Input for the CastVote use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastVoteInput {
    pub decision_id: DecisionId,
    pub user_id: UserId,
    pub vote_type: VoteType,
}

impl CastVoteInput {
    pub fn new(
        decision_id: impl Into<DecisionId>,
        user_id: impl Into<UserId>,
        vote_type: VoteType,
    ) -> Self {
        Self {
            decision_id: decision_id.into(),
            user_id: user_id.into(),
            vote_type,
        }
    }

    /// Build an input from an unvalidated vote type such as `"yes"`.
    pub fn parse(
        decision_id: impl Into<DecisionId>,
        user_id: impl Into<UserId>,
        vote_type: &str,
    ) -> Result<Self, CastVoteError> {
        let parsed = vote_type
            .parse()
            .map_err(|_| CastVoteError::InvalidVoteType(vote_type.to_string()))?;
        Ok(Self::new(decision_id, user_id, parsed))
    }
}

/// Output of the CastVote use case
#[derive(Debug, Clone, PartialEq)]
pub struct CastVoteOutput {
    pub vote: Vote,
    /// Tally recomputed from every stored vote after this one was written
    pub counts: VoteCounts,
    /// Present when the post-vote trigger ran
    pub finalization: Option<FinalizeOutcome>,
}

/// Use case for recording votes
pub struct CastVoteUseCase<S: DecisionStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn DecisionEventSink>,
    finalizer: FinalizeDecisionUseCase<S>,
    finalize_on_vote: bool,
}

impl<S: DecisionStore + 'static> CastVoteUseCase<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: &EngineConfig) -> Self {
        let finalizer =
            FinalizeDecisionUseCase::new(store.clone(), clock.clone(), config.trigger_policy());
        Self {
            store,
            clock,
            events: Arc::new(NoDecisionEvents),
            finalizer,
            finalize_on_vote: config.finalize_on_vote,
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DecisionEventSink>) -> Self {
        self.finalizer = self.finalizer.with_events(events.clone());
        self.events = events;
        self
    }

    pub async fn execute(&self, input: CastVoteInput) -> Result<CastVoteOutput, CastVoteError> {
        let CastVoteInput {
            decision_id,
            user_id,
            vote_type,
        } = input;

        let decision = self
            .store
            .get_decision(&decision_id)
            .await?
            .ok_or_else(|| CastVoteError::DecisionNotFound(decision_id.clone()))?;

        if !decision.is_active() {
            return Err(CastVoteError::DecisionFinalized {
                decision_id,
                status: decision.status(),
            });
        }

        match self.store.get_voter(&decision_id, &user_id).await? {
            Some(voter) if voter.required => {}
            _ => {
                return Err(CastVoteError::NotEligible {
                    decision_id,
                    user_id,
                });
            }
        }

        let vote = Vote::new(decision_id.clone(), user_id, vote_type, self.clock.now());
        self.store.upsert_vote(&vote).await.map_err(|e| match e {
            // Finalized after the status check above
            StoreError::DecisionClosed {
                decision_id,
                status,
            } => CastVoteError::DecisionFinalized {
                decision_id,
                status,
            },
            other => CastVoteError::Store(other),
        })?;

        let counts = calculate_vote_counts(&self.store.list_votes(&decision_id).await?);
        info!(
            "Vote recorded on {}: {} voted {} {}",
            decision_id,
            vote.user_id,
            vote.vote_type,
            counts.summary()
        );
        self.events.record(&DecisionEvent::VoteRecorded {
            vote: vote.clone(),
            counts,
        });

        let finalization = if self.finalize_on_vote {
            // The vote is already committed; a trigger failure is left to the sweep
            match self.finalizer.execute(&decision_id).await {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    warn!("Post-vote finalization of {} failed: {}", decision_id, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(CastVoteOutput {
            vote,
            counts,
            finalization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FixedClock, MockStore, RecordingEvents, t0};
    use chrono::Duration;
    use crate::ports::decision_store::FinalizeWrite;
    use consensus_domain::{
        Decision, FinalizationReason, FinalizationRecord, SuccessCriteria, Voter,
        evaluate_decision, voters_for,
    };

    struct Fixture {
        store: Arc<MockStore>,
        clock: Arc<FixedClock>,
        events: Arc<RecordingEvents>,
    }

    impl Fixture {
        async fn new(users: &[&str]) -> Self {
            let store = Arc::new(MockStore::default());
            let decision = Decision::new(
                "d-1",
                "Friday deploys",
                "Allow production deploys on Fridays",
                SuccessCriteria::SimpleMajority,
                t0() + Duration::hours(1),
                "U0CREATOR",
                t0(),
            );
            let ids: Vec<UserId> = users.iter().map(|u| UserId::new(*u)).collect();
            let mut voters = voters_for(&decision.id, &ids);
            voters.push(Voter {
                decision_id: decision.id.clone(),
                user_id: UserId::new("UOPTIONAL"),
                required: false,
            });
            store.insert_decision(&decision, &voters).await.unwrap();
            Self {
                store,
                clock: Arc::new(FixedClock::at(t0())),
                events: Arc::new(RecordingEvents::default()),
            }
        }

        fn use_case(&self, config: EngineConfig) -> CastVoteUseCase<MockStore> {
            CastVoteUseCase::new(self.store.clone(), self.clock.clone(), &config)
                .with_events(self.events.clone())
        }
    }

    #[tokio::test]
    async fn test_vote_is_recorded_and_tallied() {
        let f = Fixture::new(&["U1", "U2", "U3"]).await;
        let use_case = f.use_case(EngineConfig::default());

        let output = use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Yes))
            .await
            .unwrap();

        assert_eq!(output.counts, VoteCounts::new(1, 0, 0));
        assert_eq!(output.vote.voted_at, t0());
        assert!(matches!(
            output.finalization,
            Some(FinalizeOutcome::NotReady { .. })
        ));
        assert_eq!(f.events.types(), vec!["vote_recorded"]);
    }

    #[tokio::test]
    async fn test_revote_replaces_previous_choice() {
        let f = Fixture::new(&["U1", "U2", "U3"]).await;
        let use_case = f.use_case(EngineConfig::default());

        use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Yes))
            .await
            .unwrap();
        f.clock.advance(Duration::minutes(5));
        let output = use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::No))
            .await
            .unwrap();

        assert_eq!(output.counts, VoteCounts::new(0, 1, 0));
        assert_eq!(output.vote.voted_at, t0() + Duration::minutes(5));
        let stored = f.store.list_votes(&DecisionId::new("d-1")).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].vote_type, VoteType::No);
    }

    #[tokio::test]
    async fn test_identical_revote_only_advances_timestamp() {
        let f = Fixture::new(&["U1", "U2"]).await;
        let use_case = f.use_case(EngineConfig::default());

        use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Abstain))
            .await
            .unwrap();
        f.clock.advance(Duration::seconds(30));
        use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Abstain))
            .await
            .unwrap();

        let stored = f.store.list_votes(&DecisionId::new("d-1")).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].vote_type, VoteType::Abstain);
        assert_eq!(stored[0].voted_at, t0() + Duration::seconds(30));
    }

    #[tokio::test]
    async fn test_last_vote_finalizes_decision() {
        let f = Fixture::new(&["U1", "U2"]).await;
        let use_case = f.use_case(EngineConfig::default());

        use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Yes))
            .await
            .unwrap();
        let output = use_case
            .execute(CastVoteInput::new("d-1", "U2", VoteType::Yes))
            .await
            .unwrap();

        let finalization = output.finalization.unwrap();
        assert!(finalization.is_finalized());
        assert_eq!(
            finalization.decision().unwrap().status(),
            DecisionStatus::Approved
        );
        assert_eq!(
            f.events.types(),
            vec!["vote_recorded", "vote_recorded", "decision_finalized"]
        );
    }

    #[tokio::test]
    async fn test_finalize_on_vote_can_be_disabled() {
        let f = Fixture::new(&["U1"]).await;
        let use_case = f.use_case(EngineConfig::default().with_finalize_on_vote(false));

        let output = use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Yes))
            .await
            .unwrap();

        assert!(output.finalization.is_none());
        let decision = f
            .store
            .get_decision(&DecisionId::new("d-1"))
            .await
            .unwrap()
            .unwrap();
        assert!(decision.is_active());
    }

    #[tokio::test]
    async fn test_vote_on_finalized_decision_is_a_conflict() {
        let f = Fixture::new(&["U1", "U2"]).await;
        let use_case = f.use_case(EngineConfig::default());
        use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::No))
            .await
            .unwrap();
        use_case
            .execute(CastVoteInput::new("d-1", "U2", VoteType::No))
            .await
            .unwrap();

        let err = use_case
            .execute(CastVoteInput::new("d-1", "U2", VoteType::Yes))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CastVoteError::DecisionFinalized {
                decision_id: DecisionId::new("d-1"),
                status: DecisionStatus::Rejected,
            }
        );
        assert_eq!(err.category(), ErrorCategory::Conflict);
        let stored = f.store.list_votes(&DecisionId::new("d-1")).await.unwrap();
        assert!(stored.iter().all(|v| v.vote_type == VoteType::No));
    }

    /// Commits a finalization while the use case looks up the voter, i.e.
    /// after its status check and before its vote write.
    struct FinalizeDuringLookup(Arc<MockStore>);

    #[async_trait::async_trait]
    impl DecisionStore for FinalizeDuringLookup {
        async fn insert_decision(
            &self,
            decision: &Decision,
            voters: &[Voter],
        ) -> Result<(), StoreError> {
            self.0.insert_decision(decision, voters).await
        }

        async fn get_decision(&self, id: &DecisionId) -> Result<Option<Decision>, StoreError> {
            self.0.get_decision(id).await
        }

        async fn get_voter(
            &self,
            decision_id: &DecisionId,
            user_id: &UserId,
        ) -> Result<Option<Voter>, StoreError> {
            let decision = self.0.get_decision(decision_id).await?.unwrap();
            let record = FinalizationRecord::new(
                evaluate_decision(&decision, &[], &[]),
                FinalizationReason::DeadlineReached,
                t0(),
            );
            self.0.finalize_if_active(decision_id, &record).await?;
            self.0.get_voter(decision_id, user_id).await
        }

        async fn list_voters(&self, decision_id: &DecisionId) -> Result<Vec<Voter>, StoreError> {
            self.0.list_voters(decision_id).await
        }

        async fn upsert_vote(&self, vote: &Vote) -> Result<(), StoreError> {
            self.0.upsert_vote(vote).await
        }

        async fn list_votes(&self, decision_id: &DecisionId) -> Result<Vec<Vote>, StoreError> {
            self.0.list_votes(decision_id).await
        }

        async fn finalize_if_active(
            &self,
            decision_id: &DecisionId,
            record: &FinalizationRecord,
        ) -> Result<FinalizeWrite, StoreError> {
            self.0.finalize_if_active(decision_id, record).await
        }

        async fn list_active_decisions(&self) -> Result<Vec<DecisionId>, StoreError> {
            self.0.list_active_decisions().await
        }
    }

    #[tokio::test]
    async fn test_finalization_between_check_and_write_rejects_vote() {
        let f = Fixture::new(&["U1", "U2"]).await;
        let use_case = CastVoteUseCase::new(
            Arc::new(FinalizeDuringLookup(f.store.clone())),
            f.clock.clone(),
            &EngineConfig::default(),
        )
        .with_events(f.events.clone());

        let err = use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Yes))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CastVoteError::DecisionFinalized {
                decision_id: DecisionId::new("d-1"),
                status: DecisionStatus::Rejected,
            }
        );
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(
            f.store
                .list_votes(&DecisionId::new("d-1"))
                .await
                .unwrap()
                .is_empty()
        );
        assert!(f.events.types().is_empty());
    }

    #[tokio::test]
    async fn test_rejections_carry_distinct_categories() {
        let f = Fixture::new(&["U1"]).await;
        let use_case = f.use_case(EngineConfig::default());

        let missing = use_case
            .execute(CastVoteInput::new("nope", "U1", VoteType::Yes))
            .await
            .unwrap_err();
        assert_eq!(missing.category(), ErrorCategory::NotFound);

        let outsider = use_case
            .execute(CastVoteInput::new("d-1", "U9", VoteType::Yes))
            .await
            .unwrap_err();
        assert_eq!(outsider.category(), ErrorCategory::Validation);

        let optional = use_case
            .execute(CastVoteInput::new("d-1", "UOPTIONAL", VoteType::Yes))
            .await
            .unwrap_err();
        assert!(matches!(optional, CastVoteError::NotEligible { .. }));

        *f.store.fail_writes.lock().unwrap() = true;
        let failure = use_case
            .execute(CastVoteInput::new("d-1", "U1", VoteType::Yes))
            .await
            .unwrap_err();
        assert_eq!(failure.category(), ErrorCategory::Dependency);
        assert!(f.events.types().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_vote_type() {
        let err = CastVoteInput::parse("d-1", "U1", "maybe").unwrap_err();
        assert_eq!(err, CastVoteError::InvalidVoteType("maybe".to_string()));
        assert_eq!(err.category(), ErrorCategory::Validation);

        let input = CastVoteInput::parse("d-1", "U1", "Yes").unwrap();
        assert_eq!(input.vote_type, VoteType::Yes);
    }
}
