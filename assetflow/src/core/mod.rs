//! Core types for assetflow.
//!
//! This module provides the fundamental types used throughout the crate:
//! - `AssetDescriptor` - One script or stylesheet to enqueue
//! - `LocalizationPayload` - Data printed next to a script
//! - `Resolution` - The ordered result of one resolution pass

mod asset;
mod localization;
mod resolution;

pub use asset::{AssetDescriptor, AssetKind, AssetSource, LoadPosition, SourceBase};
pub use localization::LocalizationPayload;
pub use resolution::Resolution;
