//! Logging infrastructure
//!
//! - [`init_tracing`] installs the global `tracing` subscriber from the
//!   `[logging]` section
//! - [`JsonlEventLog`] writes the machine-readable decision event stream,
//!   implementing the [`DecisionEventSink`] port

mod event_log;

pub use event_log::JsonlEventLog;

use crate::config::FileLoggingConfig;
use consensus_application::ports::decision_events::{DecisionEventSink, NoDecisionEvents};
use std::sync::Arc;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level` when set. Fails if a
/// global subscriber is already installed.
pub fn init_tracing(config: &FileLoggingConfig) -> Result<(), TryInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config.parse_filter().0,
    };

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init()
    }
}

/// The event sink configured by `event_log`, or a no-op sink.
pub fn event_sink(config: &FileLoggingConfig) -> Arc<dyn DecisionEventSink> {
    match config.event_log.as_deref().and_then(JsonlEventLog::open) {
        Some(log) => Arc::new(log),
        None => Arc::new(NoDecisionEvents),
    }
}
