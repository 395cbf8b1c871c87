//! Prepends RTL and third-party CSS to the compiled stylesheet.

use super::{rewrite_plugin_urls, CombinedStyle};
use crate::config::ResolverConfig;
use crate::context::{CompilerMode, ContextSnapshot, LayoutRegion};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loads stylesheet contents by URL or path.
#[cfg_attr(test, mockall::automock)]
pub trait StylesheetLoader: Send + Sync {
    /// Reads the stylesheet at `src`.
    fn load(&self, src: &str) -> io::Result<String>;
}

/// Reads stylesheets from disk, mapping URLs under known bases onto
/// directories.
#[derive(Debug, Clone, Default)]
pub struct FsStylesheetLoader {
    bases: Vec<(String, PathBuf)>,
}

impl FsStylesheetLoader {
    /// Creates a loader that only reads plain paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader mapping the configured theme and library URLs.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new()
            .with_base(&config.template_dir_url, &config.template_dir_path)
            .with_base(&config.library_url, &config.library_path)
    }

    /// Maps URLs starting with `url` onto `dir`. Longer prefixes win.
    #[must_use]
    pub fn with_base(mut self, url: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        self.bases.push((url.into(), dir.as_ref().to_path_buf()));
        self.bases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        self
    }

    /// Filesystem path for a URL or path.
    #[must_use]
    pub fn resolve_path(&self, src: &str) -> PathBuf {
        let src = src.split(['?', '#']).next().unwrap_or(src);
        self.bases
            .iter()
            .find_map(|(url, dir)| {
                src.strip_prefix(url.as_str())
                    .map(|rest| dir.join(rest.trim_start_matches('/')))
            })
            .unwrap_or_else(|| PathBuf::from(src))
    }
}

impl StylesheetLoader for FsStylesheetLoader {
    fn load(&self, src: &str) -> io::Result<String> {
        std::fs::read_to_string(self.resolve_path(src))
    }
}

/// Whether third-party stylesheets are folded into the compiled CSS.
#[must_use]
pub fn combination_active(ctx: &ContextSnapshot) -> bool {
    ctx.compiler_mode == CompilerMode::File
        && ctx.options.is_truthy("css_combine_third_party_assets")
}

fn load_or_empty(loader: &dyn StylesheetLoader, src: &str) -> String {
    loader.load(src).unwrap_or_else(|e| {
        warn!(src, error = %e, "Stylesheet could not be loaded, skipping");
        String::new()
    })
}

/// Returns `original` with the extra CSS prepended.
///
/// RTL CSS is added when CSS caching is not off and the page is RTL. The
/// combined third-party stylesheets are added, after URL rewriting, in file
/// compiler mode with combination enabled.
#[must_use]
pub fn combine_stylesheets(
    original: &str,
    ctx: &ContextSnapshot,
    config: &ResolverConfig,
    combined: &[CombinedStyle],
    loader: &dyn StylesheetLoader,
) -> String {
    let mut styles = String::new();

    if ctx.is_rtl && !ctx.options.equals("css_cache_method", "off") {
        let theme_css = |name: &str| format!("{}/assets/css/{name}.min.css", config.template_dir_path);
        styles.push_str(&load_or_empty(loader, &theme_css("dynamic/rtl")));
        if !ctx.is_overridden(LayoutRegion::Header) {
            styles.push_str(&load_or_empty(loader, &theme_css("rtl-header-legacy")));
        }
    }

    if combination_active(ctx) {
        for style in combined {
            let contents = load_or_empty(loader, &style.src);
            styles.push_str(&rewrite_plugin_urls(&style.src, &contents, &config.plugin_urls));
        }
        debug!(count = combined.len(), "Combined third-party stylesheets");
    }

    styles.push_str(original);
    styles
}
