//! Domain error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decision::lifecycle::DecisionStatus;

/// Coarse classification of a failure, shared by every layer.
///
/// Callers use this to pick a corrective action: fix the input
/// (`Validation`), check the target (`NotFound`), accept that the decision
/// already closed (`Conflict`), or retry later (`Dependency`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Dependency,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Conflict => "conflict",
            ErrorCategory::Dependency => "dependency",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid vote type: '{0}' (expected yes, no or abstain)")]
    InvalidVoteType(String),

    #[error("Invalid success criteria: {0}")]
    InvalidCriteria(String),

    #[error("Invalid decision: {0}")]
    InvalidDecision(String),

    #[error("Voter set too large: {count} voters exceeds the maximum of {max}")]
    VoterLimitExceeded { count: usize, max: usize },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: DecisionStatus,
        to: DecisionStatus,
    },
}

impl DomainError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DomainError::InvalidTransition { .. } => ErrorCategory::Conflict,
            _ => ErrorCategory::Validation,
        }
    }
}
