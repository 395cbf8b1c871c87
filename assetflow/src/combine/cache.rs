//! The combined-stylesheet cache.

use super::{RegisteredStyle, StyleRegistry};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Stylesheets loaded through a custom loader and never combined.
const EXCLUDED_HANDLES: &[&str] = &["sr7css"];

/// One third-party stylesheet selected for combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedStyle {
    /// Registered handle.
    pub handle: String,
    /// Source URL or path.
    pub src: String,
}

/// Third-party stylesheets to fold into the compiled CSS, keyed by handle in
/// scan order.
///
/// The registry is scanned at most once per cache. An empty result is
/// cached like any other.
#[derive(Debug, Default)]
pub struct CombinedStylesheetCache {
    bundled_fragments: Vec<String>,
    computed: RwLock<Option<Vec<CombinedStyle>>>,
}

impl CombinedStylesheetCache {
    /// Creates a cache selecting stylesheets whose source contains one of
    /// the given plugin path fragments.
    #[must_use]
    pub fn new(bundled_fragments: Vec<String>) -> Self {
        Self {
            bundled_fragments,
            computed: RwLock::new(None),
        }
    }

    /// Returns the cached mapping, scanning the registry on first use.
    pub fn get_or_scan(&self, registry: &dyn StyleRegistry) -> Vec<CombinedStyle> {
        if let Some(cached) = self.computed.read().as_ref() {
            debug!(count = cached.len(), "Combined stylesheet cache hit");
            return cached.clone();
        }

        let mut computed = self.computed.write();
        if let Some(cached) = computed.as_ref() {
            return cached.clone();
        }
        let scanned = self.scan(registry);
        debug!(count = scanned.len(), "Scanned registry for combinable stylesheets");
        *computed = Some(scanned.clone());
        scanned
    }

    /// Whether the registry has been scanned.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.computed.read().is_some()
    }

    /// Whether the source belongs to a bundled plugin and is a CSS file.
    #[must_use]
    pub fn is_bundled_plugin_style(&self, src: &str) -> bool {
        self.bundled_fragments.iter().any(|f| src.contains(f.as_str()))
            && Path::new(src).extension().is_some_and(|ext| ext == "css")
    }

    fn qualifies(&self, style: &RegisteredStyle) -> bool {
        !style.done
            && style.media == "all"
            && !style.src.is_empty()
            && self.is_bundled_plugin_style(&style.src)
    }

    fn scan(&self, registry: &dyn StyleRegistry) -> Vec<CombinedStyle> {
        let mut selected: Vec<CombinedStyle> = Vec::new();
        let mut push = |handle: &str, src: &str| {
            if !selected.iter().any(|s| s.handle == handle) {
                selected.push(CombinedStyle {
                    handle: handle.to_string(),
                    src: src.to_string(),
                });
            }
        };

        for handle in registry.handles() {
            if EXCLUDED_HANDLES.contains(&handle.as_str()) {
                continue;
            }
            let Some(style) = registry.get(&handle) else {
                continue;
            };
            if !self.qualifies(&style) {
                continue;
            }
            push(&handle, &style.src);

            for dep in &style.deps {
                if let Some(dep_style) = registry.get(dep).filter(|s| self.qualifies(s)) {
                    push(dep, &dep_style.src);
                }
            }
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::{InMemoryStyleRegistry, MockStyleRegistry};
    use crate::config::ResolverConfig;
    use pretty_assertions::assert_eq;

    fn cache() -> CombinedStylesheetCache {
        CombinedStylesheetCache::new(ResolverConfig::default().bundled_plugin_fragments)
    }

    fn handles(styles: &[CombinedStyle]) -> Vec<&str> {
        styles.iter().map(|s| s.handle.as_str()).collect()
    }

    #[test]
    fn test_bundled_plugin_detection() {
        let cache = cache();
        assert!(cache.is_bundled_plugin_style("/wp-content/plugins/bbpress/css/bbpress.css"));
        assert!(!cache.is_bundled_plugin_style("/wp-content/plugins/bbpress/js/editor.js"));
        assert!(!cache.is_bundled_plugin_style("/wp-content/plugins/other/style.css"));
        assert!(!cache.is_bundled_plugin_style("/wp-content/plugins/revslider/css"));
    }

    #[test]
    fn test_scan_filters_and_pulls_dependencies() {
        let registry = InMemoryStyleRegistry::new()
            .with("sr7css", RegisteredStyle::new("/plugins/revslider/sr7.css"))
            .with(
                "tribe-events",
                RegisteredStyle::new("/plugins/the-events-calendar/views.css")
                    .with_deps(["tribe-common", "theme-base"]),
            )
            .with("printed", RegisteredStyle::new("/plugins/bbpress/a.css").printed())
            .with("print-only", RegisteredStyle::new("/plugins/bbpress/b.css").with_media("print"))
            .with("alias", RegisteredStyle::new(""))
            .with("theme-base", RegisteredStyle::new("/themes/Avada/style.css"))
            .with("tribe-common", RegisteredStyle::new("/plugins/event-tickets/common.css"))
            .with("cf7", RegisteredStyle::new("/plugins/contact-form-7/styles.css"));

        let styles = cache().get_or_scan(&registry);
        assert_eq!(handles(&styles), vec!["tribe-events", "tribe-common", "cf7"]);
    }

    #[test]
    fn test_second_call_does_not_rescan() {
        let mut registry = MockStyleRegistry::new();
        registry
            .expect_handles()
            .times(1)
            .returning(|| vec!["cf7".to_string()]);
        registry
            .expect_get()
            .times(1)
            .returning(|_| Some(RegisteredStyle::new("/plugins/contact-form-7/styles.css")));

        let cache = cache();
        let first = cache.get_or_scan(&registry);
        let second = cache.get_or_scan(&registry);

        assert_eq!(first, second);
        assert_eq!(handles(&first), vec!["cf7"]);
    }

    #[test]
    fn test_empty_result_is_cached() {
        let mut registry = MockStyleRegistry::new();
        registry.expect_handles().times(1).returning(Vec::new);

        let cache = cache();
        assert!(!cache.is_computed());
        assert!(cache.get_or_scan(&registry).is_empty());
        assert!(cache.is_computed());
        assert!(cache.get_or_scan(&registry).is_empty());
    }
}
