//! # Assetflow
//!
//! Conditional asset resolution for a WordPress theme, driven by a
//! declarative decision table.
//!
//! Assetflow decides which scripts, stylesheets and media-query stylesheets
//! a page needs, in what order, and with which localization payloads:
//!
//! - **Decision table**: ordered entries pairing a predicate with assets or
//!   a two-sided variant group, validated when built
//! - **Context snapshots**: immutable per-request facts about features,
//!   options, page and layout overrides
//! - **Deterministic resolution**: first-wins deduplication and a stable
//!   dependency ordering
//! - **Stylesheet combination**: third-party plugin CSS folded into the
//!   compiled stylesheet, scanned once per request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use assetflow::prelude::*;
//!
//! let resolver = AssetResolver::new(ResolverConfig::default())?;
//! let ctx = ContextSnapshot::new()
//!     .with_feature(Feature::Bbpress)
//!     .with_option("responsive", true);
//!
//! let resolution = resolver.resolve(&ctx)?;
//! for asset in &resolution.assets {
//!     println!("{} {:?}", asset.handle, asset.url());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod combine;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod filters;
pub mod observability;
pub mod pipeline;
pub mod sink;
pub mod table;
pub mod testing;
pub mod theme;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::combine::{
        CombinedStyle, FsStylesheetLoader, InMemoryStyleRegistry, RegisteredStyle,
        StyleRegistry, StylesheetLoader,
    };
    pub use crate::config::{PluginUrls, ResolverConfig};
    pub use crate::context::{
        BuilderMode, CompilerMode, ContextSnapshot, Feature, FeatureSet, LayoutRegion,
        OptionStore, OptionValue, PageContext, PageTemplate, RequestIdentity,
    };
    pub use crate::core::{
        AssetDescriptor, AssetKind, AssetSource, LoadPosition, LocalizationPayload, Resolution,
    };
    pub use crate::errors::{
        AssetflowError, CycleDetectedError, TableValidationError, UnresolvedDependencyError,
    };
    pub use crate::filters::DequeuePlan;
    pub use crate::pipeline::{AssetPipeline, AssetResolver};
    pub use crate::sink::{LocalizationSink, LoggingSink, NoOpSink, RegistrationSink};
    pub use crate::table::{
        DecisionTable, DecisionTableBuilder, LocalizationBinding, Predicate, TableEntry,
        VariantGroup,
    };
    pub use crate::theme::theme_table;
}
