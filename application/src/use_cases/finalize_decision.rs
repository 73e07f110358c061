//! Finalize Decision use case
//!
//! Evaluates the finalization trigger and commits a terminal status through
//! the store's conditional write. Safe to call redundantly and concurrently
//! (from the vote path, a periodic sweep, or an explicit request): at most
//! one caller ever observes [`FinalizeOutcome::Finalized`] for a decision.

use crate::ports::clock::Clock;
use crate::ports::decision_events::{DecisionEvent, DecisionEventSink, NoDecisionEvents};
use crate::ports::decision_store::{DecisionStore, FinalizeWrite, StoreError};
use consensus_domain::{
    Decision, DecisionId, ErrorCategory, FinalizationCheck, TriggerPolicy, prepare_finalization,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during finalization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinalizeDecisionError {
    #[error("Decision not found: {0}")]
    DecisionNotFound(DecisionId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl FinalizeDecisionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinalizeDecisionError::DecisionNotFound(_) => ErrorCategory::NotFound,
            FinalizeDecisionError::Store(StoreError::NotFound(_)) => ErrorCategory::NotFound,
            FinalizeDecisionError::Store(_) => ErrorCategory::Dependency,
        }
    }
}

/// Result of one finalization attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalizeOutcome {
    /// This call committed the terminal status
    Finalized(Decision),
    /// The decision was already terminal; nothing was recomputed or written
    AlreadyFinalized(Decision),
    /// The trigger did not fire
    NotReady {
        decision_id: DecisionId,
        check: FinalizationCheck,
    },
}

impl FinalizeOutcome {
    pub fn is_finalized(&self) -> bool {
        matches!(self, FinalizeOutcome::Finalized(_))
    }

    /// The terminal decision, whoever committed it.
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            FinalizeOutcome::Finalized(d) | FinalizeOutcome::AlreadyFinalized(d) => Some(d),
            FinalizeOutcome::NotReady { .. } => None,
        }
    }
}

/// Summary of a sweep over all active decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub evaluated: usize,
    pub finalized: usize,
    pub already_finalized: usize,
    pub pending: usize,
    pub failed: usize,
}

/// Use case for finalizing decisions
pub struct FinalizeDecisionUseCase<S: DecisionStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn DecisionEventSink>,
    policy: TriggerPolicy,
}

impl<S: DecisionStore + 'static> FinalizeDecisionUseCase<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, policy: TriggerPolicy) -> Self {
        Self {
            store,
            clock,
            events: Arc::new(NoDecisionEvents),
            policy,
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DecisionEventSink>) -> Self {
        self.events = events;
        self
    }

    pub async fn execute(
        &self,
        decision_id: &DecisionId,
    ) -> Result<FinalizeOutcome, FinalizeDecisionError> {
        let decision = self
            .store
            .get_decision(decision_id)
            .await?
            .ok_or_else(|| FinalizeDecisionError::DecisionNotFound(decision_id.clone()))?;

        if !decision.is_active() {
            debug!("Decision {} already {}", decision.id, decision.status());
            return Ok(FinalizeOutcome::AlreadyFinalized(decision));
        }

        let voters = self.store.list_voters(decision_id).await?;
        let votes = self.store.list_votes(decision_id).await?;
        let now = self.clock.now();

        let record = match prepare_finalization(&decision, &voters, &votes, now, self.policy) {
            Ok(record) => record,
            Err(FinalizationCheck::AlreadyFinalized { .. }) => {
                return Ok(FinalizeOutcome::AlreadyFinalized(decision));
            }
            Err(check) => {
                debug!("Decision {} not ready: {}", decision_id, check.reason());
                return Ok(FinalizeOutcome::NotReady {
                    decision_id: decision_id.clone(),
                    check,
                });
            }
        };

        match self.store.finalize_if_active(decision_id, &record).await? {
            FinalizeWrite::Committed(decision) => {
                info!(
                    "Decision {} finalized as {} ({}, {} {})",
                    decision.id,
                    record.status,
                    record.reason,
                    record.outcome.counts.summary(),
                    record.outcome.criteria
                );
                self.events.record(&DecisionEvent::DecisionFinalized {
                    decision_id: decision.id.clone(),
                    record,
                });
                Ok(FinalizeOutcome::Finalized(decision))
            }
            FinalizeWrite::AlreadyFinalized(decision) => {
                info!(
                    "Decision {} was finalized concurrently as {}",
                    decision.id,
                    decision.status()
                );
                Ok(FinalizeOutcome::AlreadyFinalized(decision))
            }
        }
    }

    /// Evaluate every active decision once.
    ///
    /// A failure on one decision is logged and counted; it never stops the
    /// sweep.
    pub async fn sweep(&self) -> Result<SweepReport, FinalizeDecisionError> {
        let active = self.store.list_active_decisions().await?;
        let mut report = SweepReport::default();

        for decision_id in &active {
            report.evaluated += 1;
            match self.execute(decision_id).await {
                Ok(FinalizeOutcome::Finalized(_)) => report.finalized += 1,
                Ok(FinalizeOutcome::AlreadyFinalized(_)) => report.already_finalized += 1,
                Ok(FinalizeOutcome::NotReady { .. }) => report.pending += 1,
                Err(e) => {
                    warn!("Sweep failed for decision {}: {}", decision_id, e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Sweep evaluated {} decisions: {} finalized, {} already finalized, {} pending, {} failed",
            report.evaluated,
            report.finalized,
            report.already_finalized,
            report.pending,
            report.failed
        );
        Ok(report)
    }
}
