//! The result of one resolution pass.

use super::{AssetDescriptor, AssetKind, LocalizationPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordered assets and localization payloads for one request.
///
/// Owned by the caller; nothing is cached between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Request the resolution was computed for.
    pub request_id: Uuid,
    /// When the resolution finished.
    pub resolved_at: DateTime<Utc>,
    /// Assets in dependency order.
    pub assets: Vec<AssetDescriptor>,
    /// Localization payloads, each bound to a handle in `assets`.
    pub localizations: Vec<LocalizationPayload>,
    /// Object names whose target handle was not resolved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_localizations: Vec<String>,
}

impl Resolution {
    /// Creates an empty resolution.
    #[must_use]
    pub fn empty(request_id: Uuid) -> Self {
        Self {
            request_id,
            resolved_at: Utc::now(),
            assets: Vec::new(),
            localizations: Vec::new(),
            skipped_localizations: Vec::new(),
        }
    }

    /// Whether an asset with the handle was resolved.
    #[must_use]
    pub fn contains(&self, handle: &str) -> bool {
        self.asset(handle).is_some()
    }

    /// Looks up an asset by handle.
    #[must_use]
    pub fn asset(&self, handle: &str) -> Option<&AssetDescriptor> {
        self.assets.iter().find(|a| a.handle == handle)
    }

    /// Position of the handle in the output.
    #[must_use]
    pub fn position(&self, handle: &str) -> Option<usize> {
        self.assets.iter().position(|a| a.handle == handle)
    }

    /// All handles in output order.
    #[must_use]
    pub fn handles(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.handle.as_str()).collect()
    }

    /// Assets of one kind, in output order.
    pub fn of_kind(&self, kind: AssetKind) -> impl Iterator<Item = &AssetDescriptor> {
        self.assets.iter().filter(move |a| a.kind == kind)
    }

    /// Scripts in output order.
    pub fn scripts(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.of_kind(AssetKind::Script)
    }

    /// Stylesheets folded into the compiled CSS.
    pub fn compiled_styles(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.of_kind(AssetKind::CompiledStyle)
    }

    /// Directly enqueued stylesheets.
    pub fn styles(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.of_kind(AssetKind::Style)
    }

    /// Media-query stylesheets.
    pub fn media_styles(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.of_kind(AssetKind::MediaStyle)
    }

    /// Payload bound to the handle, if any.
    #[must_use]
    pub fn localization_for(&self, handle: &str) -> Option<&LocalizationPayload> {
        self.localizations.iter().find(|l| l.handle == handle)
    }

    /// Payload with the object name, if any.
    #[must_use]
    pub fn localization_named(&self, object_name: &str) -> Option<&LocalizationPayload> {
        self.localizations.iter().find(|l| l.object_name == object_name)
    }

    /// Whether nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.localizations.is_empty()
    }
}
