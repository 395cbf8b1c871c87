//! Observability utilities.

mod tracing;

pub use self::tracing::{env_filter, init_tracing, SpanTimer, LOG_ENV};
