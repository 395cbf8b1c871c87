//! Request context read by the resolver.
//!
//! This module provides:
//! - The immutable per-request context snapshot
//! - Typed option access with documented fallbacks
//! - Integration and page classification types

mod features;
mod identity;
mod options;
mod page;
mod snapshot;

pub use features::{Feature, FeatureSet, UnknownFeature};
pub use identity::RequestIdentity;
pub use options::{OptionStore, OptionValue};
pub use page::{LayoutRegion, PageContext, PageKind, PageTemplate};
pub use snapshot::{
    BuilderMode, CompilerMode, ContextSnapshot, CookieArgs, Preferences, PrivacySettings,
};
