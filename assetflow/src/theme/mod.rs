//! The theme's decision table.
//!
//! Four parts are composed into one table, in this order: scripts (theme and
//! host), stylesheets (compiled and direct), media-query stylesheets, and the
//! localization bindings.

mod localize;
mod media;
mod scripts;
mod styles;

use crate::config::ResolverConfig;
use crate::core::{AssetDescriptor, AssetSource, SourceBase};
use crate::errors::TableValidationError;
use crate::table::{DecisionTable, DecisionTableBuilder};

/// Builds and validates the theme table.
///
/// # Errors
///
/// Returns an error if the table fails validation, which means the table
/// itself is inconsistent with the configured host handles.
pub fn theme_table(config: &ResolverConfig) -> Result<DecisionTable, TableValidationError> {
    let assets = ThemeAssets::new(config);

    DecisionTableBuilder::new("theme")
        .with_host_handles(config.host_handles.iter().cloned())
        .compose(scripts::builder(&assets)?)?
        .compose(styles::builder(&assets)?)?
        .compose(media::builder(&assets)?)?
        .compose(localize::builder()?)?
        .build()
}

/// Descriptor factory bound to the configured theme and library locations.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ThemeAssets<'a> {
    config: &'a ResolverConfig,
}

impl<'a> ThemeAssets<'a> {
    pub(crate) const fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    fn versioned(&self, asset: AssetDescriptor) -> AssetDescriptor {
        asset.with_version(self.config.theme_version.as_str())
    }

    /// A theme script under the script folder, e.g. `/general/avada-fade.js`.
    pub(crate) fn script(&self, handle: &str, file: &str, deps: &[&str]) -> AssetDescriptor {
        self.script_from(SourceBase::Theme, handle, file, deps)
    }

    /// A script served from the bundled library instead of the theme.
    pub(crate) fn library_script(&self, handle: &str, file: &str, deps: &[&str]) -> AssetDescriptor {
        self.script_from(SourceBase::Library, handle, file, deps)
    }

    fn script_from(
        &self,
        base: SourceBase,
        handle: &str,
        file: &str,
        deps: &[&str],
    ) -> AssetDescriptor {
        let source = self.config.script_source(base, file);
        self.versioned(AssetDescriptor::script(handle, source).with_dependencies(deps.iter().copied()))
    }

    /// A stylesheet folded into the compiled CSS. `name` is relative to
    /// `/assets/css` without the `.min.css` suffix, e.g. `dynamic/blog`.
    pub(crate) fn compiled(&self, name: &str) -> AssetDescriptor {
        let handle = format!("avada-css-{}", name.replace('/', "-"));
        AssetDescriptor::compiled_style(handle, self.css_source(name))
    }

    /// A directly enqueued stylesheet.
    pub(crate) fn style(&self, handle: &str, name: &str) -> AssetDescriptor {
        self.versioned(AssetDescriptor::style(handle, self.css_source(name)))
    }

    /// A media-query stylesheet `avada-<name>` bound to a media key.
    pub(crate) fn media(&self, name: &str, key: &str) -> AssetDescriptor {
        let source = self.css_source(&format!("media/{name}"));
        self.versioned(AssetDescriptor::media_style(format!("avada-{name}"), source, key))
    }

    fn css_source(&self, name: &str) -> AssetSource {
        self.config
            .locate(SourceBase::Theme, &format!("/assets/css/{name}.min.css"))
    }
}
