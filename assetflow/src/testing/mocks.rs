//! Registry doubles.

use crate::combine::{InMemoryStyleRegistry, RegisteredStyle, StyleRegistry};
use parking_lot::Mutex;

/// A style registry that counts how often it is scanned.
#[derive(Debug, Default)]
pub struct CountingStyleRegistry {
    inner: InMemoryStyleRegistry,
    scans: Mutex<usize>,
    lookups: Mutex<usize>,
}

impl CountingStyleRegistry {
    /// Wraps a registry.
    #[must_use]
    pub fn new(inner: InMemoryStyleRegistry) -> Self {
        Self {
            inner,
            scans: Mutex::new(0),
            lookups: Mutex::new(0),
        }
    }

    /// Number of `handles()` calls.
    #[must_use]
    pub fn scan_count(&self) -> usize {
        *self.scans.lock()
    }

    /// Number of `get()` calls.
    #[must_use]
    pub fn lookup_count(&self) -> usize {
        *self.lookups.lock()
    }

    /// Resets the counters.
    pub fn reset(&self) {
        *self.scans.lock() = 0;
        *self.lookups.lock() = 0;
    }
}

impl StyleRegistry for CountingStyleRegistry {
    fn handles(&self) -> Vec<String> {
        *self.scans.lock() += 1;
        self.inner.handles()
    }

    fn get(&self, handle: &str) -> Option<RegisteredStyle> {
        *self.lookups.lock() += 1;
        self.inner.get(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_calls() {
        let registry = CountingStyleRegistry::new(
            InMemoryStyleRegistry::new().with("a", RegisteredStyle::new("/a.css")),
        );
        let _ = registry.handles();
        let _ = registry.get("a");
        let _ = registry.get("b");

        assert_eq!(registry.scan_count(), 1);
        assert_eq!(registry.lookup_count(), 2);

        registry.reset();
        assert_eq!(registry.scan_count(), 0);
    }
}
