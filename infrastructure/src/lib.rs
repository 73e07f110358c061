//! Infrastructure layer for decision-consensus
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration loading and tracing setup.

pub mod clock;
pub mod config;
pub mod directory;
pub mod logging;
pub mod store;


// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{
    ConfigIssue, ConfigIssueCode, ConfigLoader, FileConfig, FileConsensusConfig,
    FileLoggingConfig, Severity,
};
pub use directory::StaticMembershipDirectory;
pub use logging::{JsonlEventLog, event_sink, init_tracing};
pub use store::InMemoryDecisionStore;
