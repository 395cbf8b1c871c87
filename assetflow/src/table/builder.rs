//! Decision table builder with validation.

use super::{LocalizationBinding, Predicate, TableEntry};
use crate::core::AssetDescriptor;
use crate::errors::{codes, CycleDetectedError, ErrorInfo, TableSuggestions, TableValidationError};
use crate::utils::find_cycle;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A validated, ordered decision table.
#[derive(Debug, Clone)]
pub struct DecisionTable {
    name: String,
    entries: Vec<TableEntry>,
    bindings: Vec<LocalizationBinding>,
    host_handles: BTreeSet<String>,
}

impl DecisionTable {
    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the entries in evaluation order.
    #[must_use]
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Returns the localization bindings in evaluation order.
    #[must_use]
    pub fn bindings(&self) -> &[LocalizationBinding] {
        &self.bindings
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&TableEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the host provides the handle.
    #[must_use]
    pub fn is_host_handle(&self, handle: &str) -> bool {
        self.host_handles.contains(handle)
    }

    /// Every handle any entry can produce.
    #[must_use]
    pub fn produced_handles(&self) -> BTreeSet<&str> {
        self.entries.iter().flat_map(TableEntry::produced_handles).collect()
    }
}

/// Builder for validated decision tables.
#[derive(Debug, Clone, Default)]
pub struct DecisionTableBuilder {
    name: String,
    entries: Vec<TableEntry>,
    bindings: Vec<LocalizationBinding>,
    host_handles: BTreeSet<String>,
}

impl DecisionTableBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares handles the host registers itself.
    #[must_use]
    pub fn with_host_handles(mut self, handles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.host_handles.extend(handles.into_iter().map(Into::into));
        self
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry with the same name exists.
    pub fn entry(mut self, entry: TableEntry) -> Result<Self, TableValidationError> {
        self.add_entry(entry)?;
        Ok(self)
    }

    /// Appends an entry in place.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry with the same name exists.
    pub fn add_entry(&mut self, entry: TableEntry) -> Result<(), TableValidationError> {
        if self.entries.iter().any(|e| e.name == entry.name) {
            return Err(duplicate_entry(&entry.name));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Appends a localization binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the object name is already bound.
    pub fn binding(mut self, binding: LocalizationBinding) -> Result<Self, TableValidationError> {
        self.add_binding(binding)?;
        Ok(self)
    }

    /// Appends a localization binding in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the object name is already bound.
    pub fn add_binding(&mut self, binding: LocalizationBinding) -> Result<(), TableValidationError> {
        if self.bindings.iter().any(|b| b.object_name == binding.object_name) {
            return Err(TableValidationError::new(format!(
                "Localization object '{}' is bound twice",
                binding.object_name
            ))
            .with_subjects(vec![binding.object_name.clone()])
            .with_error_info(error_info(
                codes::DUPLICATE_OBJECT,
                format!("Object name '{}' already in use", binding.object_name),
            )));
        }
        self.bindings.push(binding);
        Ok(())
    }

    /// Appends another builder's entries, bindings and host handles.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry name or object name collides.
    pub fn compose(mut self, other: Self) -> Result<Self, TableValidationError> {
        self.name = format!("{}+{}", self.name, other.name);
        self.host_handles.extend(other.host_handles);
        for entry in other.entries {
            self.add_entry(entry)?;
        }
        for binding in other.bindings {
            self.add_binding(binding)?;
        }
        Ok(self)
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Validates and builds the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty, references a dependency
    /// nothing provides or that is not produced whenever its dependent is,
    /// contains a dependency cycle or binds localization data to a handle
    /// no entry produces.
    pub fn build(self) -> Result<DecisionTable, TableValidationError> {
        if self.entries.is_empty() {
            return Err(TableValidationError::new(format!("Table '{}' has no entries", self.name))
                .with_error_info(error_info(codes::EMPTY, "Cannot build an empty table")));
        }

        let produced: HashSet<&str> = self.entries.iter().flat_map(TableEntry::produced_handles).collect();

        for entry in &self.entries {
            for asset in entry.assets.all() {
                for dep in &asset.dependencies {
                    if !produced.contains(dep.as_str()) && !self.host_handles.contains(dep) {
                        return Err(TableValidationError::new(format!(
                            "Asset '{}' in entry '{}' depends on unknown handle '{}'",
                            asset.handle, entry.name, dep
                        ))
                        .with_subjects(vec![entry.name.clone(), dep.clone()])
                        .with_error_info(
                            error_info(codes::MISSING_DEP, format!("Dependency '{dep}' not found"))
                                .with_context_entry("entry", &entry.name)
                                .with_context_entry("handle", &asset.handle),
                        ));
                    }
                }
            }
        }

        self.detect_cycles()?;
        self.check_guaranteed_dependencies()?;

        for binding in &self.bindings {
            if !produced.contains(binding.handle.as_str()) {
                return Err(TableValidationError::new(format!(
                    "Localization object '{}' targets unknown handle '{}'",
                    binding.object_name, binding.handle
                ))
                .with_subjects(vec![binding.object_name.clone(), binding.handle.clone()])
                .with_error_info(error_info(
                    codes::ORPHAN_BINDING,
                    format!("No entry produces '{}'", binding.handle),
                )));
            }
        }

        tracing::debug!(
            table = %self.name,
            entries = self.entries.len(),
            bindings = self.bindings.len(),
            "Built decision table"
        );

        Ok(DecisionTable {
            name: self.name,
            entries: self.entries,
            bindings: self.bindings,
            host_handles: self.host_handles,
        })
    }

    /// Rejects dependencies that some context could leave unproduced while
    /// the dependent is emitted, so resolution never trips over them.
    fn check_guaranteed_dependencies(&self) -> Result<(), TableValidationError> {
        let guarded: Vec<(&TableEntry, Predicate, &AssetDescriptor)> = self
            .entries
            .iter()
            .flat_map(|e| e.guarded_assets().into_iter().map(move |(g, a)| (e, g, a)))
            .collect();

        for (entry, guard, asset) in &guarded {
            for dep in &asset.dependencies {
                if self.host_handles.contains(dep) {
                    continue;
                }
                let guaranteed = guarded
                    .iter()
                    .any(|(_, producer, p)| p.handle == *dep && guard.implies(producer));
                if !guaranteed {
                    return Err(TableValidationError::new(format!(
                        "Asset '{}' in entry '{}' may be emitted without its dependency '{}'",
                        asset.handle, entry.name, dep
                    ))
                    .with_subjects(vec![entry.name.clone(), dep.clone()])
                    .with_error_info(
                        error_info(
                            codes::CONDITIONAL_DEP,
                            format!(
                                "Dependency '{dep}' is not produced whenever '{}' is",
                                asset.handle
                            ),
                        )
                        .with_context_entry("entry", &entry.name)
                        .with_context_entry("handle", &asset.handle),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Detects cycles across every producible handle, variant sides merged.
    fn detect_cycles(&self) -> Result<(), CycleDetectedError> {
        let mut graph: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for asset in self.entries.iter().flat_map(|e| e.assets.all()) {
            let deps = graph.entry(asset.handle.clone()).or_default();
            for dep in &asset.dependencies {
                if !deps.contains(dep) {
                    deps.push(dep.clone());
                }
            }
        }

        match find_cycle(&graph) {
            Some(cycle) => Err(CycleDetectedError::new(cycle)),
            None => Ok(()),
        }
    }
}

fn error_info(code: &str, summary: impl Into<String>) -> ErrorInfo {
    let info = ErrorInfo::new(code, summary);
    match TableSuggestions::get(code) {
        Some(hint) => info.with_fix_hint(hint),
        None => info,
    }
}

fn duplicate_entry(name: &str) -> TableValidationError {
    TableValidationError::new(format!("Entry '{name}' is defined twice"))
        .with_subjects(vec![name.to_string()])
        .with_error_info(error_info(
            codes::DUPLICATE_ENTRY,
            format!("Entry name '{name}' already in use"),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::context::{ContextSnapshot, Feature, LayoutRegion};
    use crate::core::AssetSource;
    use crate::table::{Predicate, VariantGroup};

    fn script(handle: &str, deps: &[&str]) -> AssetDescriptor {
        AssetDescriptor::script(handle, AssetSource::url(format!("/{handle}.js")))
            .with_dependencies(deps.iter().copied())
    }

    fn fixed(name: &str, assets: Vec<AssetDescriptor>) -> TableEntry {
        TableEntry::new(name, Predicate::Always, assets)
    }

    fn empty_payload(
        _: &ContextSnapshot,
        _: &ResolverConfig,
    ) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::new()
    }

    #[test]
    fn test_builder_creation() {
        let builder = DecisionTableBuilder::new("theme");
        assert_eq!(builder.name(), "theme");
        assert_eq!(builder.entry_count(), 0);
    }

    #[test]
    fn test_build_success() {
        let table = DecisionTableBuilder::new("theme")
            .with_host_handles(["jquery"])
            .entry(fixed("select", vec![script("avada-select", &["jquery"])]))
            .unwrap()
            .entry(fixed("drop-down", vec![script("avada-drop-down", &["jquery", "avada-select"])]))
            .unwrap()
            .binding(LocalizationBinding::new("avada-drop-down", "avadaSelectVars", empty_payload))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(table.name(), "theme");
        assert_eq!(table.entry_count(), 2);
        assert!(table.is_host_handle("jquery"));
        assert!(table.entry("select").is_some());
        assert_eq!(table.bindings().len(), 1);
    }

    #[test]
    fn test_forward_references_are_allowed() {
        let table = DecisionTableBuilder::new("theme")
            .entry(fixed("scrollspy", vec![script("avada-scrollspy", &["avada-header"])]))
            .unwrap()
            .entry(fixed("header", vec![script("avada-header", &[])]))
            .unwrap()
            .build();
        assert!(table.is_ok());
    }

    #[test]
    fn test_missing_dependency() {
        let err = DecisionTableBuilder::new("theme")
            .entry(fixed("menu", vec![script("avada-menu", &["avada-header"])]))
            .unwrap()
            .build()
            .unwrap_err();

        assert_eq!(err.code(), Some(codes::MISSING_DEP));
        assert_eq!(err.subjects, vec!["menu".to_string(), "avada-header".to_string()]);
        let info = err.error_info.unwrap();
        assert!(info.fix_hint.is_some());
        assert_eq!(info.context.get("handle").map(String::as_str), Some("avada-menu"));
    }

    #[test]
    fn test_conditional_dependency_is_rejected() {
        let err = DecisionTableBuilder::new("theme")
            .entry(TableEntry::new(
                "forum",
                Predicate::feature(Feature::Bbpress),
                vec![script("avada-bbpress", &[])],
            ))
            .unwrap()
            .entry(fixed("always", vec![script("avada-quantity", &["avada-bbpress"])]))
            .unwrap()
            .build()
            .unwrap_err();

        assert_eq!(err.code(), Some(codes::CONDITIONAL_DEP));
        assert_eq!(err.subjects, vec!["always".to_string(), "avada-bbpress".to_string()]);
        assert!(err.error_info.unwrap().fix_hint.is_some());
    }

    #[test]
    fn test_dependency_under_same_guard_is_accepted() {
        let forum = || Predicate::feature(Feature::Bbpress);
        let table = DecisionTableBuilder::new("theme")
            .entry(TableEntry::new("forum", forum(), vec![script("avada-bbpress", &[])]))
            .unwrap()
            .entry(TableEntry::new(
                "forum-rtl",
                forum().and(Predicate::Rtl),
                vec![script("avada-bbpress-rtl", &["avada-bbpress"])],
            ))
            .unwrap()
            .build();
        assert!(table.is_ok());
    }

    #[test]
    fn test_variant_side_dependencies() {
        let header = |selector: Predicate| {
            VariantGroup::new(
                "header",
                selector,
                vec![script("avada-header", &[])],
                vec![script("avada-custom-header", &[])],
            )
        };
        let scrollspy = VariantGroup::new(
            "scrollspy",
            Predicate::overridden(LayoutRegion::Header),
            vec![script("avada-scrollspy", &["avada-header"])],
            vec![script("avada-scrollspy", &["avada-custom-header"])],
        );

        let ok = DecisionTableBuilder::new("theme")
            .entry(TableEntry::variant(
                "header",
                Predicate::DisplaysHeader,
                header(Predicate::overridden(LayoutRegion::Header)),
            ))
            .unwrap()
            .entry(TableEntry::variant("scrollspy", Predicate::DisplaysHeader, scrollspy.clone()))
            .unwrap()
            .build();
        assert!(ok.is_ok());

        let err = DecisionTableBuilder::new("theme")
            .entry(TableEntry::variant("header", Predicate::DisplaysHeader, header(Predicate::Rtl)))
            .unwrap()
            .entry(TableEntry::variant("scrollspy", Predicate::DisplaysHeader, scrollspy))
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::CONDITIONAL_DEP));
    }

    #[test]
    fn test_duplicate_entry() {
        let err = DecisionTableBuilder::new("theme")
            .entry(fixed("select", vec![script("avada-select", &[])]))
            .unwrap()
            .entry(fixed("select", vec![script("avada-select", &[])]))
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::DUPLICATE_ENTRY));
    }

    #[test]
    fn test_cycle_detection() {
        let err = DecisionTableBuilder::new("theme")
            .entry(fixed("a", vec![script("a", &["b"])]))
            .unwrap()
            .entry(fixed("b", vec![script("b", &["a"])]))
            .unwrap()
            .build()
            .unwrap_err();

        assert_eq!(err.code(), Some(codes::CYCLE));
        assert_eq!(err.subjects, vec!["a".to_string(), "b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_cycle_across_variant_sides() {
        let group = VariantGroup::new(
            "pair",
            Predicate::Rtl,
            vec![script("x", &["y"])],
            vec![script("y", &["x"])],
        );
        let err = DecisionTableBuilder::new("theme")
            .entry(TableEntry::variant("pair", Predicate::Always, group))
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::CYCLE));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let err = DecisionTableBuilder::new("theme")
            .entry(fixed("loop", vec![script("loop", &["loop"])]))
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::CYCLE));
    }

    #[test]
    fn test_empty_build() {
        let err = DecisionTableBuilder::new("theme").build().unwrap_err();
        assert_eq!(err.code(), Some(codes::EMPTY));
    }

    #[test]
    fn test_orphan_binding() {
        let err = DecisionTableBuilder::new("theme")
            .entry(fixed("select", vec![script("avada-select", &[])]))
            .unwrap()
            .binding(LocalizationBinding::new("avada-slect", "avadaSelectVars", empty_payload))
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::ORPHAN_BINDING));
    }

    #[test]
    fn test_duplicate_object_name() {
        let err = DecisionTableBuilder::new("theme")
            .binding(LocalizationBinding::new("a", "avadaVars", empty_payload))
            .unwrap()
            .binding(LocalizationBinding::new("b", "avadaVars", empty_payload))
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::DUPLICATE_OBJECT));
    }

    #[test]
    fn test_compose() {
        let scripts = DecisionTableBuilder::new("scripts")
            .with_host_handles(["jquery"])
            .entry(fixed("select", vec![script("avada-select", &["jquery"])]))
            .unwrap();
        let styles = DecisionTableBuilder::new("styles")
            .entry(fixed("blog", vec![script("avada-blog", &[])]))
            .unwrap();

        let composed = scripts.compose(styles).unwrap();
        assert_eq!(composed.name(), "scripts+styles");
        assert_eq!(composed.entry_count(), 2);
        assert!(composed.build().is_ok());
    }

    #[test]
    fn test_compose_conflict() {
        let a = DecisionTableBuilder::new("a")
            .entry(fixed("shared", vec![script("x", &[])]))
            .unwrap();
        let b = DecisionTableBuilder::new("b")
            .entry(fixed("shared", vec![script("y", &[])]))
            .unwrap();

        let err = a.compose(b).unwrap_err();
        assert_eq!(err.code(), Some(codes::DUPLICATE_ENTRY));
    }
}
