//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod clock;
pub mod decision_events;
pub mod decision_store;
pub mod membership_directory;
