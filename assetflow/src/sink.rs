//! Output sinks receiving resolved assets and localization payloads.

use crate::core::{AssetDescriptor, LocalizationPayload};
use tracing::{debug, info, Level};

/// Receives resolved assets one at a time.
///
/// The host is responsible for actual file inclusion. Registering the same
/// handle twice is left to the host's policy.
pub trait RegistrationSink: Send + Sync {
    /// Registers one asset.
    fn register(&self, asset: &AssetDescriptor);
}

/// Receives localization payloads one at a time.
pub trait LocalizationSink: Send + Sync {
    /// Attaches one payload to its script.
    fn localize(&self, payload: &LocalizationPayload);
}

/// A sink that discards everything.
///
/// Used as the default when no sink is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl RegistrationSink for NoOpSink {
    fn register(&self, _asset: &AssetDescriptor) {}
}

impl LocalizationSink for NoOpSink {
    fn localize(&self, _payload: &LocalizationPayload) {}
}

/// A sink that logs through the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingSink {
    level: Level,
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingSink {
    /// Creates a logging sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    /// Creates an info-level logging sink.
    #[must_use]
    pub fn info() -> Self {
        Self::new(Level::INFO)
    }
}

impl RegistrationSink for LoggingSink {
    fn register(&self, asset: &AssetDescriptor) {
        if self.level == Level::DEBUG {
            debug!(
                handle = %asset.handle,
                kind = ?asset.kind,
                deps = ?asset.dependencies,
                "Register {}", asset.handle
            );
        } else {
            info!(
                handle = %asset.handle,
                kind = ?asset.kind,
                deps = ?asset.dependencies,
                "Register {}", asset.handle
            );
        }
    }
}

impl LocalizationSink for LoggingSink {
    fn localize(&self, payload: &LocalizationPayload) {
        if self.level == Level::DEBUG {
            debug!(
                handle = %payload.handle,
                object_name = %payload.object_name,
                keys = payload.data.len(),
                "Localize {}", payload.object_name
            );
        } else {
            info!(
                handle = %payload.handle,
                object_name = %payload.object_name,
                keys = payload.data.len(),
                "Localize {}", payload.object_name
            );
        }
    }
}

/// One call received by a [`CollectingSink`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCall {
    /// An asset registration.
    Register(AssetDescriptor),
    /// A localization payload.
    Localize(LocalizationPayload),
}

/// A sink that records every call, for tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    calls: parking_lot::RwLock<Vec<SinkCall>>,
}

impl CollectingSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in arrival order.
    #[must_use]
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.read().clone()
    }

    /// Handles registered so far.
    #[must_use]
    pub fn registered_handles(&self) -> Vec<String> {
        self.calls
            .read()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Register(asset) => Some(asset.handle.clone()),
                SinkCall::Localize(_) => None,
            })
            .collect()
    }

    /// Object names localized so far.
    #[must_use]
    pub fn localized_objects(&self) -> Vec<String> {
        self.calls
            .read()
            .iter()
            .filter_map(|call| match call {
                SinkCall::Localize(payload) => Some(payload.object_name.clone()),
                SinkCall::Register(_) => None,
            })
            .collect()
    }

    /// Number of calls received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.read().len()
    }

    /// Returns true if nothing was received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.read().is_empty()
    }

    /// Clears all recorded calls.
    pub fn clear(&self) {
        self.calls.write().clear();
    }
}

impl RegistrationSink for CollectingSink {
    fn register(&self, asset: &AssetDescriptor) {
        self.calls.write().push(SinkCall::Register(asset.clone()));
    }
}

impl LocalizationSink for CollectingSink {
    fn localize(&self, payload: &LocalizationPayload) {
        self.calls.write().push(SinkCall::Localize(payload.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AssetSource;

    fn asset() -> AssetDescriptor {
        AssetDescriptor::script("avada-fade", AssetSource::url("/fade.js"))
    }

    fn payload() -> LocalizationPayload {
        LocalizationPayload::new("avada-fade", "avadaFadeVars", serde_json::Map::new())
    }

    #[test]
    fn test_noop_sink() {
        let sink = NoOpSink;
        sink.register(&asset());
        sink.localize(&payload());
    }

    #[test]
    fn test_logging_sink() {
        let sink = LoggingSink::debug();
        sink.register(&asset());
        sink.localize(&payload());
        LoggingSink::default().register(&asset());
    }

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.register(&asset());
        sink.localize(&payload());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.registered_handles(), vec!["avada-fade"]);
        assert_eq!(sink.localized_objects(), vec!["avadaFadeVars"]);
        assert!(matches!(sink.calls()[0], SinkCall::Register(_)));
    }

    #[test]
    fn test_collecting_sink_clear() {
        let sink = CollectingSink::new();
        sink.register(&asset());
        sink.clear();
        assert!(sink.is_empty());
    }
}
