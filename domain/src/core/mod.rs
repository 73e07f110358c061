//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`error::ErrorCategory`]: validation / not found / conflict / dependency

pub mod error;
