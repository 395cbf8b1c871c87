//! Decision table entries and localization bindings.

use super::Predicate;
use crate::config::ResolverConfig;
use crate::context::ContextSnapshot;
use crate::core::AssetDescriptor;
use std::fmt;

/// Two mutually exclusive sets of descriptors for the same logical group.
///
/// Exactly one side is emitted whenever the owning entry matches: the
/// `alternate` side when `selector` holds, the `standard` side otherwise.
#[derive(Debug, Clone)]
pub struct VariantGroup {
    /// Group name, shown in logs.
    pub name: String,
    /// Picks the alternate side when true.
    pub selector: Predicate,
    /// Emitted when the selector is false.
    pub standard: Vec<AssetDescriptor>,
    /// Emitted when the selector is true.
    pub alternate: Vec<AssetDescriptor>,
}

impl VariantGroup {
    /// Creates a variant group.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        selector: Predicate,
        standard: Vec<AssetDescriptor>,
        alternate: Vec<AssetDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            selector,
            standard,
            alternate,
        }
    }

    /// Returns the side selected for the snapshot.
    #[must_use]
    pub fn select(&self, ctx: &ContextSnapshot) -> &[AssetDescriptor] {
        if self.selector.evaluate(ctx) {
            &self.alternate
        } else {
            &self.standard
        }
    }
}

/// What an entry contributes when its predicate holds.
#[derive(Debug, Clone)]
pub enum EntryAssets {
    /// Always the same descriptors.
    Fixed(Vec<AssetDescriptor>),
    /// One side of a variant group.
    Variant(VariantGroup),
}

impl EntryAssets {
    /// Every descriptor the entry could ever emit, both variant sides
    /// included.
    pub fn all(&self) -> impl Iterator<Item = &AssetDescriptor> {
        let (first, second): (&[AssetDescriptor], &[AssetDescriptor]) = match self {
            Self::Fixed(assets) => (assets.as_slice(), [].as_slice()),
            Self::Variant(group) => (group.standard.as_slice(), group.alternate.as_slice()),
        };
        first.iter().chain(second.iter())
    }
}

/// One row of the decision table.
#[derive(Debug, Clone)]
pub struct TableEntry {
    /// Unique entry name.
    pub name: String,
    /// When the entry applies.
    pub predicate: Predicate,
    /// What the entry contributes.
    pub assets: EntryAssets,
}

impl TableEntry {
    /// Creates an entry with fixed descriptors.
    #[must_use]
    pub fn new(name: impl Into<String>, predicate: Predicate, assets: Vec<AssetDescriptor>) -> Self {
        Self {
            name: name.into(),
            predicate,
            assets: EntryAssets::Fixed(assets),
        }
    }

    /// Creates an entry holding a variant group.
    #[must_use]
    pub fn variant(name: impl Into<String>, predicate: Predicate, group: VariantGroup) -> Self {
        Self {
            name: name.into(),
            predicate,
            assets: EntryAssets::Variant(group),
        }
    }

    /// Returns the descriptors this entry emits for the snapshot, or `None`
    /// when the predicate does not hold.
    #[must_use]
    pub fn select(&self, ctx: &ContextSnapshot) -> Option<&[AssetDescriptor]> {
        if !self.predicate.evaluate(ctx) {
            return None;
        }
        Some(match &self.assets {
            EntryAssets::Fixed(assets) => assets,
            EntryAssets::Variant(group) => group.select(ctx),
        })
    }

    /// Every descriptor with the condition under which it is emitted: the
    /// entry predicate, narrowed by the selector for variant sides.
    pub fn guarded_assets(&self) -> Vec<(Predicate, &AssetDescriptor)> {
        match &self.assets {
            EntryAssets::Fixed(assets) => {
                assets.iter().map(|a| (self.predicate.clone(), a)).collect()
            }
            EntryAssets::Variant(group) => {
                let standard = self.predicate.clone().and(!group.selector.clone());
                let alternate = self.predicate.clone().and(group.selector.clone());
                group
                    .standard
                    .iter()
                    .map(|a| (standard.clone(), a))
                    .chain(group.alternate.iter().map(|a| (alternate.clone(), a)))
                    .collect()
            }
        }
    }

    /// Every handle this entry could produce.
    pub fn produced_handles(&self) -> impl Iterator<Item = &str> {
        self.assets.all().map(|a| a.handle.as_str())
    }
}

/// Builds a localization payload from the snapshot and configuration.
pub type PayloadBuilder =
    fn(&ContextSnapshot, &ResolverConfig) -> serde_json::Map<String, serde_json::Value>;

/// Attaches a global data object to a script handle.
#[derive(Clone)]
pub struct LocalizationBinding {
    /// Target script handle.
    pub handle: String,
    /// Global variable name.
    pub object_name: String,
    /// Payload builder.
    pub build: PayloadBuilder,
}

impl LocalizationBinding {
    /// Creates a binding.
    #[must_use]
    pub fn new(handle: impl Into<String>, object_name: impl Into<String>, build: PayloadBuilder) -> Self {
        Self {
            handle: handle.into(),
            object_name: object_name.into(),
            build,
        }
    }
}

impl fmt::Debug for LocalizationBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizationBinding")
            .field("handle", &self.handle)
            .field("object_name", &self.object_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LayoutRegion;
    use crate::core::AssetSource;

    fn script(handle: &str) -> AssetDescriptor {
        AssetDescriptor::script(handle, AssetSource::url(format!("/{handle}.js")))
    }

    fn header_group() -> VariantGroup {
        VariantGroup::new(
            "header",
            Predicate::overridden(LayoutRegion::Header),
            vec![script("avada-header"), script("avada-menu")],
            vec![script("avada-custom-header")],
        )
    }

    #[test]
    fn test_fixed_entry_select() {
        let entry = TableEntry::new("select", Predicate::Always, vec![script("avada-select")]);
        let selected = entry.select(&ContextSnapshot::new()).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].handle, "avada-select");

        let never = TableEntry::new("never", !Predicate::Always, vec![script("x")]);
        assert!(never.select(&ContextSnapshot::new()).is_none());
    }

    #[test]
    fn test_variant_picks_one_side() {
        let entry = TableEntry::variant("header", Predicate::DisplaysHeader, header_group());

        let standard = entry.select(&ContextSnapshot::new()).unwrap();
        let handles: Vec<_> = standard.iter().map(|a| a.handle.as_str()).collect();
        assert_eq!(handles, vec!["avada-header", "avada-menu"]);

        let overridden = ContextSnapshot::new().with_override(LayoutRegion::Header);
        let alternate = entry.select(&overridden).unwrap();
        assert_eq!(alternate.len(), 1);
        assert_eq!(alternate[0].handle, "avada-custom-header");
    }

    #[test]
    fn test_produced_handles_cover_both_sides() {
        let entry = TableEntry::variant("header", Predicate::Always, header_group());
        let handles: Vec<_> = entry.produced_handles().collect();
        assert_eq!(handles, vec!["avada-header", "avada-menu", "avada-custom-header"]);
    }

    #[test]
    fn test_binding_debug_omits_builder() {
        fn empty(_: &ContextSnapshot, _: &ResolverConfig) -> serde_json::Map<String, serde_json::Value> {
            serde_json::Map::new()
        }
        let binding = LocalizationBinding::new("avada-fade", "avadaFadeVars", empty);
        let debug = format!("{binding:?}");
        assert!(debug.contains("avadaFadeVars"));
        assert!((binding.build)(&ContextSnapshot::new(), &ResolverConfig::new()).is_empty());
    }
}
