//! Eligible voter set assembly.

use std::collections::HashSet;

use super::value_objects::Member;
use crate::core::error::DomainError;
use crate::decision::{DecisionId, UserId, Voter};

/// Accumulates voter ids from several sources, counting each user once.
///
/// # Example
///
/// ```
/// use consensus_domain::decision::UserId;
/// use consensus_domain::voters::VoterSetBuilder;
///
/// let mut builder = VoterSetBuilder::new(10);
/// builder.extend([UserId::new("U1"), UserId::new("U4")]);
/// builder.extend([UserId::new("U1"), UserId::new("U2"), UserId::new("U3")]);
/// assert_eq!(builder.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct VoterSetBuilder {
    max_voters: usize,
    seen: HashSet<UserId>,
    ordered: Vec<UserId>,
}

impl VoterSetBuilder {
    pub fn new(max_voters: usize) -> Self {
        Self {
            max_voters,
            seen: HashSet::new(),
            ordered: Vec::new(),
        }
    }

    pub fn insert(&mut self, user_id: UserId) -> bool {
        if self.seen.insert(user_id.clone()) {
            self.ordered.push(user_id);
            true
        } else {
            false
        }
    }

    pub fn extend<I>(&mut self, user_ids: I)
    where
        I: IntoIterator<Item = UserId>,
    {
        for user_id in user_ids {
            self.insert(user_id);
        }
    }

    /// Add channel members, skipping bots and the system account.
    pub fn extend_humans<'a, I>(&mut self, members: I)
    where
        I: IntoIterator<Item = &'a Member>,
    {
        self.extend(
            members
                .into_iter()
                .filter(|m| m.is_human())
                .map(|m| m.user_id.clone()),
        );
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn exceeds_limit(&self) -> bool {
        self.ordered.len() > self.max_voters
    }

    /// Finish the set. Oversized sets are rejected, never truncated.
    pub fn build(self) -> Result<Vec<UserId>, DomainError> {
        if self.exceeds_limit() {
            return Err(DomainError::VoterLimitExceeded {
                count: self.ordered.len(),
                max: self.max_voters,
            });
        }
        Ok(self.ordered)
    }
}

/// Snapshot resolved ids as required voters of `decision_id`.
pub fn voters_for(decision_id: &DecisionId, user_ids: &[UserId]) -> Vec<Voter> {
    user_ids
        .iter()
        .map(|u| Voter::required(decision_id.clone(), u.clone()))
        .collect()
}
