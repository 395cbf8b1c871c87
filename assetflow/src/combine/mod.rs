//! Third-party stylesheet combination.
//!
//! This module provides:
//! - Registry introspection for registered stylesheets
//! - The combined-stylesheet cache, scanned once per resolver
//! - Plugin URL rewrites and the combining step itself

mod cache;
mod combiner;
mod registry;
mod rewrite;

pub use cache::{CombinedStyle, CombinedStylesheetCache};
pub use combiner::{combination_active, combine_stylesheets, FsStylesheetLoader, StylesheetLoader};
pub use registry::{InMemoryStyleRegistry, RegisteredStyle, StyleRegistry};
pub use rewrite::{rewrite_plugin_urls, RewriteRule, REWRITE_RULES};

#[cfg(test)]
pub use combiner::MockStylesheetLoader;
#[cfg(test)]
pub use registry::MockStyleRegistry;
