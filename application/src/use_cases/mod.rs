//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod cast_vote;
pub mod create_decision;
pub mod decision_status;
pub mod finalize_decision;
pub mod resolve_voters;

#[cfg(test)]
pub(crate) mod test_support;
