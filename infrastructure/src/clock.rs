//! Wall-clock adapter for the [`Clock`] port.

use chrono::{DateTime, Utc};
use consensus_application::ports::clock::Clock;

/// Reads the system clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
