//! Context snapshot fixtures.

use crate::config::ResolverConfig;
use crate::context::{
    BuilderMode, CompilerMode, ContextSnapshot, Feature, LayoutRegion, OptionStore, PageContext,
};
use crate::pipeline::AssetResolver;

/// Builder for snapshots describing common page setups.
#[derive(Debug, Clone, Default)]
pub struct ContextFixture {
    snapshot: ContextSnapshot,
}

impl ContextFixture {
    /// A responsive archive page with no integrations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: ContextSnapshot::new().with_option("responsive", true),
        }
    }

    /// A singular page of the given post type.
    #[must_use]
    pub fn singular(post_type: &str) -> Self {
        let mut fixture = Self::new();
        fixture.snapshot = fixture.snapshot.with_page(PageContext::singular(post_type));
        fixture
    }

    /// Activates integrations.
    #[must_use]
    pub fn with_features(mut self, features: &[Feature]) -> Self {
        for feature in features {
            self.snapshot = self.snapshot.with_feature(*feature);
        }
        self
    }

    /// Sets an option.
    #[must_use]
    pub fn with_option(
        mut self,
        key: &str,
        value: impl Into<crate::context::OptionValue>,
    ) -> Self {
        self.snapshot = self.snapshot.with_option(key, value);
        self
    }

    /// Turns the responsive layout off.
    #[must_use]
    pub fn not_responsive(self) -> Self {
        self.with_option("responsive", false)
    }

    /// Replaces the header with a template builder layout.
    #[must_use]
    pub fn header_override(mut self) -> Self {
        self.snapshot = self.snapshot.with_override(LayoutRegion::Header);
        self
    }

    /// Renders inside the live builder.
    #[must_use]
    pub fn in_builder(mut self) -> Self {
        self.snapshot = self.snapshot.with_builder(BuilderMode {
            preview_frame: false,
            builder_frame: true,
        });
        self
    }

    /// Renders right-to-left.
    #[must_use]
    pub fn rtl(mut self) -> Self {
        self.snapshot = self.snapshot.with_rtl(true);
        self
    }

    /// Sets the compiler mode.
    #[must_use]
    pub fn compiler(mut self, mode: CompilerMode) -> Self {
        self.snapshot = self.snapshot.with_compiler_mode(mode);
        self
    }

    /// Replaces all options.
    #[must_use]
    pub fn with_options(mut self, options: OptionStore) -> Self {
        self.snapshot = self.snapshot.with_options(options);
        self
    }

    /// Returns the snapshot.
    #[must_use]
    pub fn build(self) -> ContextSnapshot {
        self.snapshot
    }
}

/// Shorthand for resolvers over the theme table with default configuration.
#[derive(Debug)]
pub struct TestResolver;

impl TestResolver {
    /// A resolver over the theme table.
    ///
    /// # Panics
    ///
    /// Panics if the theme table fails validation.
    #[must_use]
    pub fn theme() -> AssetResolver {
        Self::with_config(ResolverConfig::default())
    }

    /// A resolver over the theme table with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the theme table fails validation.
    #[must_use]
    pub fn with_config(config: ResolverConfig) -> AssetResolver {
        match AssetResolver::new(config) {
            Ok(resolver) => resolver,
            Err(e) => panic!("theme table failed validation: {e}"),
        }
    }
}
