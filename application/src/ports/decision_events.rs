//! Port for structured decision event logging.
//!
//! Defines the [`DecisionEventSink`] trait for recording lifecycle events
//! (decision created, vote recorded, decision finalized) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable event stream (e.g. JSONL) for downstream consumers.

use chrono::{DateTime, Utc};
use consensus_domain::{
    Decision, DecisionId, FinalizationRecord, SuccessCriteria, UserId, Vote, VoteCounts,
};
use serde::Serialize;

/// A decision lifecycle event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionEvent {
    DecisionCreated {
        decision_id: DecisionId,
        name: String,
        criteria: SuccessCriteria,
        deadline: DateTime<Utc>,
        creator_id: UserId,
        voter_count: usize,
    },
    VoteRecorded {
        vote: Vote,
        counts: VoteCounts,
    },
    DecisionFinalized {
        decision_id: DecisionId,
        record: FinalizationRecord,
    },
}

impl DecisionEvent {
    pub fn created(decision: &Decision, voter_count: usize) -> Self {
        DecisionEvent::DecisionCreated {
            decision_id: decision.id.clone(),
            name: decision.name.clone(),
            criteria: decision.success_criteria,
            deadline: decision.deadline,
            creator_id: decision.creator_id.clone(),
            voter_count,
        }
    }

    /// Event type identifier (e.g., "vote_recorded").
    pub fn event_type(&self) -> &'static str {
        match self {
            DecisionEvent::DecisionCreated { .. } => "decision_created",
            DecisionEvent::VoteRecorded { .. } => "vote_recorded",
            DecisionEvent::DecisionFinalized { .. } => "decision_finalized",
        }
    }

    pub fn decision_id(&self) -> &DecisionId {
        match self {
            DecisionEvent::DecisionCreated { decision_id, .. }
            | DecisionEvent::DecisionFinalized { decision_id, .. } => decision_id,
            DecisionEvent::VoteRecorded { vote, .. } => &vote.decision_id,
        }
    }
}

/// Port for recording decision events.
///
/// `record` is synchronous and infallible: a broken sink must never fail a
/// vote or a finalization.
pub trait DecisionEventSink: Send + Sync {
    fn record(&self, event: &DecisionEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoDecisionEvents;

impl DecisionEventSink for NoDecisionEvents {
    fn record(&self, _event: &DecisionEvent) {}
}
