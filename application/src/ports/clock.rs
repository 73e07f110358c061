//! Clock port
//!
//! Deadline checks read time through this port rather than a global
//! `now()`, so finalization can be tested at exact instants.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
