//! Application layer for decision-consensus
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ports::{
    clock::Clock,
    decision_events::{DecisionEvent, DecisionEventSink, NoDecisionEvents},
    decision_store::{DecisionStore, FinalizeWrite, StoreError},
    membership_directory::{
        DirectoryError, MemberPage, MembershipDirectory, MembershipSource, member_pages,
    },
};
pub use use_cases::cast_vote::{CastVoteError, CastVoteInput, CastVoteOutput, CastVoteUseCase};
pub use use_cases::create_decision::{
    CreateDecisionError, CreateDecisionInput, CreateDecisionOutput, CreateDecisionUseCase,
};
pub use use_cases::decision_status::{
    DecisionSnapshot, DecisionStatusError, GetDecisionStatusUseCase,
};
pub use use_cases::finalize_decision::{
    FinalizeDecisionError, FinalizeDecisionUseCase, FinalizeOutcome, SweepReport,
};
pub use use_cases::resolve_voters::{
    ResolveVotersError, ResolveVotersUseCase, ResolvedVoters, VoterSelection,
};
