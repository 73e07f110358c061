//! Vote tallies.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::decision::{Vote, VoteType, Voter};

/// Aggregated vote counts. `total == yes + no + abstain` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteCounts {
    pub yes: usize,
    pub no: usize,
    pub abstain: usize,
    pub total: usize,
}

impl VoteCounts {
    pub fn new(yes: usize, no: usize, abstain: usize) -> Self {
        Self {
            yes,
            no,
            abstain,
            total: yes + no + abstain,
        }
    }

    /// Tally a list of ballot choices.
    pub fn from_types<I>(types: I) -> Self
    where
        I: IntoIterator<Item = VoteType>,
    {
        let (mut yes, mut no, mut abstain) = (0, 0, 0);
        for vote_type in types {
            match vote_type {
                VoteType::Yes => yes += 1,
                VoteType::No => no += 1,
                VoteType::Abstain => abstain += 1,
            }
        }
        Self::new(yes, no, abstain)
    }

    /// Generate a visual summary (e.g., "[●●○◌]": yes, yes, no, abstain)
    pub fn summary(&self) -> String {
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.yes));
        summary.extend(std::iter::repeat_n('○', self.no));
        summary.extend(std::iter::repeat_n('◌', self.abstain));
        summary.push(']');
        summary
    }
}

/// Tally the full, current vote list. Always recomputed, never incremental.
pub fn calculate_vote_counts(votes: &[Vote]) -> VoteCounts {
    VoteCounts::from_types(votes.iter().map(|v| v.vote_type))
}

/// Number of voters flagged as required.
pub fn required_voters_count(voters: &[Voter]) -> usize {
    voters.iter().filter(|v| v.required).count()
}

/// Number of distinct required voters with at least one recorded vote.
pub fn required_voters_voted(voters: &[Voter], votes: &[Vote]) -> usize {
    let required: HashSet<_> = voters
        .iter()
        .filter(|v| v.required)
        .map(|v| &v.user_id)
        .collect();
    votes
        .iter()
        .map(|v| &v.user_id)
        .filter(|user| required.contains(user))
        .collect::<HashSet<_>>()
        .len()
}
