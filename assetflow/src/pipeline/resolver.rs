//! The asset resolver.

use crate::combine::{CombinedStyle, CombinedStylesheetCache, StyleRegistry};
use crate::config::ResolverConfig;
use crate::context::ContextSnapshot;
use crate::core::{LocalizationPayload, Resolution};
use crate::errors::AssetflowError;
use crate::observability::SpanTimer;
use crate::table::DecisionTable;
use crate::theme::theme_table;
use crate::utils::{dedupe_by_handle, order_by_dependencies, verify_dependency_order};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Evaluates a decision table against context snapshots.
///
/// One resolver serves one request: it owns that request's
/// combined-stylesheet cache. The table itself is shared.
#[derive(Debug)]
pub struct AssetResolver {
    config: Arc<ResolverConfig>,
    table: Arc<DecisionTable>,
    cache: CombinedStylesheetCache,
}

impl AssetResolver {
    /// Creates a resolver over the theme table.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme table is inconsistent with the
    /// configured host handles.
    pub fn new(config: ResolverConfig) -> Result<Self, AssetflowError> {
        let table = theme_table(&config)?;
        Ok(Self::with_table(Arc::new(config), Arc::new(table)))
    }

    /// Creates a resolver over a prebuilt table.
    #[must_use]
    pub fn with_table(config: Arc<ResolverConfig>, table: Arc<DecisionTable>) -> Self {
        let cache = CombinedStylesheetCache::new(config.bundled_plugin_fragments.clone());
        Self {
            config,
            table,
            cache,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the decision table.
    #[must_use]
    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    /// Resolves the ordered assets and localization payloads for a request.
    ///
    /// Missing options never fail resolution. Only an inconsistent table
    /// does, as a cycle or an unresolved dependency.
    pub fn resolve(&self, ctx: &ContextSnapshot) -> Result<Resolution, AssetflowError> {
        let timer = SpanTimer::start("resolve");
        let request_id = ctx.identity.request_id;

        let mut selected = Vec::new();
        for entry in self.table.entries() {
            if let Some(assets) = entry.select(ctx) {
                debug!(entry = %entry.name, count = assets.len(), "Entry selected");
                selected.extend_from_slice(assets);
            }
        }

        let (unique, dropped) = dedupe_by_handle(selected);
        for handle in &dropped {
            debug!(%handle, "Dropped duplicate handle");
        }

        let assets = order_by_dependencies(unique)?;
        verify_dependency_order(&assets, |handle| self.table.is_host_handle(handle))?;

        let mut resolution = Resolution::empty(request_id);
        {
            let present: HashSet<&str> = assets.iter().map(|a| a.handle.as_str()).collect();
            for binding in self.table.bindings() {
                if present.contains(binding.handle.as_str()) {
                    let data = (binding.build)(ctx, &self.config);
                    resolution.localizations.push(LocalizationPayload::new(
                        &binding.handle,
                        &binding.object_name,
                        data,
                    ));
                } else {
                    debug!(
                        handle = %binding.handle,
                        object_name = %binding.object_name,
                        "Localization target not resolved, skipping"
                    );
                    resolution.skipped_localizations.push(binding.object_name.clone());
                }
            }
        }
        resolution.assets = assets;
        resolution.resolved_at = Utc::now();

        info!(
            request_id = %request_id,
            assets = resolution.assets.len(),
            localizations = resolution.localizations.len(),
            skipped = resolution.skipped_localizations.len(),
            duration_ms = timer.finish(),
            "Resolved assets"
        );

        Ok(resolution)
    }

    /// Third-party stylesheets to combine, scanning the registry only on the
    /// first call.
    pub fn combined_stylesheets(&self, registry: &dyn StyleRegistry) -> Vec<CombinedStyle> {
        self.cache.get_or_scan(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Feature, LayoutRegion};
    use crate::core::{AssetDescriptor, AssetSource};
    use crate::errors::codes;
    use crate::table::{DecisionTableBuilder, LocalizationBinding, Predicate, TableEntry};
    use serde_json::{json, Map, Value};

    fn script(handle: &str, deps: &[&str]) -> AssetDescriptor {
        AssetDescriptor::script(handle, AssetSource::url(format!("/{handle}.js")))
            .with_dependencies(deps.iter().copied())
    }

    fn payload(_: &ContextSnapshot, _: &ResolverConfig) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("ok".to_string(), json!(true));
        map
    }

    fn resolver(table: DecisionTable) -> AssetResolver {
        AssetResolver::with_table(Arc::new(ResolverConfig::default()), Arc::new(table))
    }

    #[test]
    fn test_resolver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AssetResolver>();
    }

    #[test]
    fn test_dependencies_move_ahead_of_dependents() {
        let table = DecisionTableBuilder::new("t")
            .entry(TableEntry::new("late", Predicate::Always, vec![script("b", &["a"])]))
            .unwrap()
            .entry(TableEntry::new("early", Predicate::Always, vec![script("a", &[])]))
            .unwrap()
            .build()
            .unwrap();

        let resolution = resolver(table).resolve(&ContextSnapshot::new()).unwrap();
        assert_eq!(resolution.handles(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let table = DecisionTableBuilder::new("t")
            .entry(TableEntry::new("one", Predicate::Always, vec![script("a", &[])]))
            .unwrap()
            .entry(TableEntry::new("two", Predicate::Always, vec![script("a", &["jquery"])]))
            .unwrap()
            .with_host_handles(["jquery"])
            .build()
            .unwrap();

        let resolution = resolver(table).resolve(&ContextSnapshot::new()).unwrap();
        assert_eq!(resolution.handles(), vec!["a"]);
        assert!(resolution.assets[0].dependencies.is_empty());
    }

    #[test]
    fn test_conditional_dependency_fails_at_build_not_resolve() {
        let forum = || Predicate::feature(Feature::Bbpress);
        let err = DecisionTableBuilder::new("t")
            .entry(TableEntry::new("optional", forum(), vec![script("a", &[])]))
            .unwrap()
            .entry(TableEntry::new("always", Predicate::Always, vec![script("b", &["a"])]))
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::CONDITIONAL_DEP));

        let table = DecisionTableBuilder::new("t")
            .entry(TableEntry::new("optional", forum(), vec![script("a", &[])]))
            .unwrap()
            .entry(TableEntry::new("dependent", forum(), vec![script("b", &["a"])]))
            .unwrap()
            .build()
            .unwrap();
        let resolver = resolver(table);

        assert!(resolver.resolve(&ContextSnapshot::new()).unwrap().is_empty());
        let ctx = ContextSnapshot::new().with_feature(Feature::Bbpress);
        assert_eq!(resolver.resolve(&ctx).unwrap().handles(), vec!["a", "b"]);
    }

    #[test]
    fn test_dangling_binding_is_skipped() {
        let table = DecisionTableBuilder::new("t")
            .entry(TableEntry::new(
                "header",
                !Predicate::overridden(LayoutRegion::Header),
                vec![script("header", &[])],
            ))
            .unwrap()
            .binding(LocalizationBinding::new("header", "headerVars", payload))
            .unwrap()
            .build()
            .unwrap();
        let resolver = resolver(table);

        let resolution = resolver.resolve(&ContextSnapshot::new()).unwrap();
        assert_eq!(resolution.localization_for("header").unwrap().get("ok"), Some(&json!(true)));

        let ctx = ContextSnapshot::new().with_override(LayoutRegion::Header);
        let resolution = resolver.resolve(&ctx).unwrap();
        assert!(resolution.localizations.is_empty());
        assert_eq!(resolution.skipped_localizations, vec!["headerVars"]);
    }

    #[test]
    fn test_request_id_is_carried() {
        let resolver = AssetResolver::new(ResolverConfig::default()).unwrap();
        let ctx = ContextSnapshot::new();
        let resolution = resolver.resolve(&ctx).unwrap();
        assert_eq!(resolution.request_id, ctx.identity.request_id);
    }
}
