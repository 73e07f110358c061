//! Decision store adapters.

mod memory;

pub use memory::InMemoryDecisionStore;
