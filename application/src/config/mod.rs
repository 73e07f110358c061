//! Application-level configuration.
//!
//! - [`EngineConfig`]: voter limits, pagination bounds and finalization
//!   policy switches shared by the use cases

pub mod engine_config;

pub use engine_config::EngineConfig;
