//! Tracing subscriber setup and timing helpers.
//!
//! The library only emits `tracing` events. Installing a subscriber is left
//! to the host, which can use [`init_tracing`] or bring its own.

use crate::errors::AssetflowError;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "ASSETFLOW_LOG";

/// Filter from [`LOG_ENV`], falling back to `default` when unset or invalid.
#[must_use]
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs a global `fmt` subscriber.
///
/// `default_filter` uses `EnvFilter` syntax, e.g. `assetflow=debug`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str, json: bool) -> Result<(), AssetflowError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(true);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| AssetflowError::Config(format!("cannot install tracing subscriber: {e}")))
}

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
    name: &'static str,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the span name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Finishes the span and returns the duration.
    #[must_use]
    pub fn finish(self) -> f64 {
        self.elapsed_ms()
    }
}
