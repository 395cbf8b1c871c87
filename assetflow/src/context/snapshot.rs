//! Immutable per-request context snapshots.

use super::{
    Feature, FeatureSet, LayoutRegion, OptionStore, OptionValue, PageContext, RequestIdentity,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How the dynamic CSS is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerMode {
    /// Compiled to a file; the base stylesheet is folded in.
    #[default]
    File,
    /// Printed inline in the document head.
    Inline,
    /// Compilation disabled.
    Off,
}

/// Builder/preview frame flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuilderMode {
    /// Rendering inside the live preview frame.
    #[serde(default)]
    pub preview_frame: bool,
    /// Rendering inside the builder frame.
    #[serde(default)]
    pub builder_frame: bool,
}

impl BuilderMode {
    /// Whether either builder frame is active.
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.preview_frame || self.builder_frame
    }
}

/// Cookie settings for privacy embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieArgs {
    /// Cookie name.
    pub name: String,
    /// Lifetime in days.
    pub days: String,
    /// Cookie path.
    pub path: String,
}

/// Privacy options of the theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrivacySettings {
    /// Privacy-gated embeds enabled.
    #[serde(default)]
    pub embeds: bool,
    /// Privacy bar enabled.
    #[serde(default)]
    pub bar: bool,
    /// Whether the privacy bar shows a save button.
    #[serde(default)]
    pub bar_button_save: bool,
    /// Cookie arguments, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<CookieArgs>,
    /// Embed types requiring consent.
    #[serde(default)]
    pub embed_types: Vec<String>,
    /// Consents granted by default.
    #[serde(default)]
    pub default_consents: Vec<String>,
}

/// Builder-side user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// The builder user turned the sticky header off for previews.
    #[serde(default)]
    pub sticky_header_off: bool,
}

/// An immutable snapshot of everything the resolver reads.
///
/// Built once per request and passed by reference to every stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextSnapshot {
    /// Request identity for log correlation.
    #[serde(default)]
    pub identity: RequestIdentity,

    /// Active integrations.
    #[serde(default)]
    pub features: FeatureSet,

    /// Page classification.
    #[serde(default)]
    pub page: PageContext,

    /// Theme options.
    #[serde(default)]
    pub options: OptionStore,

    /// Layout regions replaced by the template builder.
    #[serde(default)]
    pub overrides: BTreeSet<LayoutRegion>,

    /// Builder/preview flags.
    #[serde(default)]
    pub builder: BuilderMode,

    /// Dynamic CSS compiler mode.
    #[serde(default)]
    pub compiler_mode: CompilerMode,

    /// Right-to-left language.
    #[serde(default)]
    pub is_rtl: bool,

    /// Admin bar is shown.
    #[serde(default)]
    pub admin_bar_showing: bool,

    /// Threaded comments are enabled site-wide.
    #[serde(default)]
    pub thread_comments: bool,

    /// Current query is an events calendar query.
    #[serde(default)]
    pub event_query: bool,

    /// Languages offered by the multilingual plugin.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Active language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_language: Option<String>,

    /// Privacy settings.
    #[serde(default)]
    pub privacy: PrivacySettings,

    /// Builder preferences.
    #[serde(default)]
    pub preferences: Preferences,

    /// A host filter turned the icon font stylesheet off.
    #[serde(default)]
    pub icomoon_disabled: bool,

    /// Admin ajax endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ajax_url: Option<String>,

    /// Pre-translated UI strings.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub strings: BTreeMap<String, String>,
}

const DEFAULT_AJAX_URL: &str = "/wp-admin/admin-ajax.php";

impl ContextSnapshot {
    /// Creates a new snapshot with defaults: archive page, no integrations,
    /// no options, file compiler mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the request identity.
    #[must_use]
    pub fn with_identity(mut self, identity: RequestIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Activates a feature.
    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features = self.features.with(feature);
        self
    }

    /// Replaces the feature set.
    #[must_use]
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    /// Sets the page context.
    #[must_use]
    pub fn with_page(mut self, page: PageContext) -> Self {
        self.page = page;
        self
    }

    /// Replaces the option store.
    #[must_use]
    pub fn with_options(mut self, options: OptionStore) -> Self {
        self.options = options;
        self
    }

    /// Sets a single option.
    #[must_use]
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<super::OptionValue>,
    ) -> Self {
        self.options = self.options.with(key, value);
        self
    }

    /// Marks a layout region as overridden. Overrides come from the
    /// template builder, so it is activated too.
    #[must_use]
    pub fn with_override(mut self, region: LayoutRegion) -> Self {
        self.overrides.insert(region);
        self.features = self.features.with(Feature::TemplateBuilder);
        self
    }

    /// Sets builder flags.
    #[must_use]
    pub fn with_builder(mut self, builder: BuilderMode) -> Self {
        self.builder = builder;
        self
    }

    /// Sets the compiler mode.
    #[must_use]
    pub fn with_compiler_mode(mut self, mode: CompilerMode) -> Self {
        self.compiler_mode = mode;
        self
    }

    /// Marks the page as right-to-left.
    #[must_use]
    pub fn with_rtl(mut self, rtl: bool) -> Self {
        self.is_rtl = rtl;
        self
    }

    /// Sets whether the admin bar is shown.
    #[must_use]
    pub fn with_admin_bar(mut self, showing: bool) -> Self {
        self.admin_bar_showing = showing;
        self
    }

    /// Sets whether threaded comments are enabled.
    #[must_use]
    pub fn with_thread_comments(mut self, enabled: bool) -> Self {
        self.thread_comments = enabled;
        self
    }

    /// Sets whether the current query is an events query.
    #[must_use]
    pub fn with_event_query(mut self, event_query: bool) -> Self {
        self.event_query = event_query;
        self
    }

    /// Sets the available languages and the active one.
    #[must_use]
    pub fn with_languages(
        mut self,
        languages: Vec<String>,
        active: Option<String>,
    ) -> Self {
        self.languages = languages;
        self.active_language = active;
        self
    }

    /// Sets privacy settings.
    #[must_use]
    pub fn with_privacy(mut self, privacy: PrivacySettings) -> Self {
        self.privacy = privacy;
        self
    }

    /// Sets builder preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Sets whether the icon font stylesheet is loaded without the builder.
    #[must_use]
    pub fn with_icomoon(mut self, load: bool) -> Self {
        self.icomoon_disabled = !load;
        self
    }

    /// Sets the ajax endpoint.
    #[must_use]
    pub fn with_ajax_url(mut self, url: impl Into<String>) -> Self {
        self.ajax_url = Some(url.into());
        self
    }

    /// Sets a translated string.
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    /// Whether the feature is active.
    #[must_use]
    pub fn has(&self, feature: Feature) -> bool {
        self.features.contains(feature)
    }

    /// Whether the region is overridden by the template builder.
    ///
    /// Overrides only exist while the template builder is active.
    #[must_use]
    pub fn is_overridden(&self, region: LayoutRegion) -> bool {
        self.has(Feature::TemplateBuilder) && self.overrides.contains(&region)
    }

    /// Whether the icon font stylesheet may be loaded. True unless a host
    /// filter disabled it.
    #[must_use]
    pub const fn loads_icomoon(&self) -> bool {
        !self.icomoon_disabled
    }

    /// Whether a builder frame is active.
    #[must_use]
    pub const fn is_builder(&self) -> bool {
        self.builder.is_active()
    }

    /// Admin ajax endpoint.
    #[must_use]
    pub fn ajax_url(&self) -> &str {
        self.ajax_url.as_deref().unwrap_or(DEFAULT_AJAX_URL)
    }

    /// Translated string or the given default.
    #[must_use]
    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.strings.get(key).map_or(default, String::as_str)
    }

    /// Whether the social sharing box is shown for the current singular
    /// page. An empty or unset option counts as enabled.
    #[must_use]
    pub fn shows_social_sharing(&self) -> bool {
        if !self.page.is_singular() || self.is_overridden(LayoutRegion::Content) {
            return false;
        }
        let Some(post_type) = self.page.post_type.as_deref() else {
            return false;
        };
        let setting = match post_type {
            "post" => "social_sharing_box".to_string(),
            "tribe_events" => "events_social_sharing_box".to_string(),
            other => format!("{other}_social_sharing_box"),
        };
        match self.options.get(&setting) {
            None => true,
            Some(OptionValue::Str(s)) if s.is_empty() => true,
            Some(value) => value.is_truthy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PageContext;

    #[test]
    fn test_defaults() {
        let ctx = ContextSnapshot::new();
        assert!(!ctx.is_builder());
        assert_eq!(ctx.compiler_mode, CompilerMode::File);
        assert_eq!(ctx.ajax_url(), DEFAULT_AJAX_URL);
        assert!(ctx.features.is_empty());
    }

    #[test]
    fn test_builder_flags() {
        let ctx = ContextSnapshot::new().with_builder(BuilderMode {
            preview_frame: false,
            builder_frame: true,
        });
        assert!(ctx.is_builder());
    }

    #[test]
    fn test_social_sharing_setting_name() {
        let ctx = ContextSnapshot::new()
            .with_page(PageContext::singular("avada_portfolio"))
            .with_option("avada_portfolio_social_sharing_box", "0");
        assert!(!ctx.shows_social_sharing());

        let ctx = ContextSnapshot::new()
            .with_page(PageContext::singular("post"))
            .with_option("social_sharing_box", "");
        assert!(ctx.shows_social_sharing());

        let ctx = ctx.with_override(LayoutRegion::Content);
        assert!(!ctx.shows_social_sharing());

        let ctx = ContextSnapshot::new()
            .with_page(PageContext::singular("tribe_events"))
            .with_option("events_social_sharing_box", false);
        assert!(!ctx.shows_social_sharing());

        let ctx = ContextSnapshot::new()
            .with_page(PageContext::singular("post"))
            .with_option("social_sharing_box", 0_i64);
        assert!(!ctx.shows_social_sharing());
    }

    #[test]
    fn test_from_json() {
        let ctx = ContextSnapshot::from_json_str(
            r#"{
                "features": ["bbpress", "unknown_plugin"],
                "page": {"kind": "singular", "post_type": "page"},
                "options": {"responsive": false},
                "overrides": ["header"],
                "compiler_mode": "inline"
            }"#,
        )
        .unwrap();

        assert!(ctx.has(Feature::Bbpress));
        assert!(ctx.page.is_singular());
        assert!(!ctx.options.is_truthy("responsive"));
        assert!(!ctx.is_overridden(LayoutRegion::Header));
        assert_eq!(ctx.compiler_mode, CompilerMode::Inline);

        let ctx = ContextSnapshot::from_json_str(
            r#"{"features": ["template_builder"], "overrides": ["header"]}"#,
        )
        .unwrap();
        assert!(ctx.is_overridden(LayoutRegion::Header));
        assert!(!ctx.is_overridden(LayoutRegion::Footer));
    }

    #[test]
    fn test_icomoon_flag() {
        assert!(ContextSnapshot::new().loads_icomoon());
        assert!(!ContextSnapshot::new().with_icomoon(false).loads_icomoon());

        let ctx = ContextSnapshot::from_json_str(r#"{"icomoon_disabled": true}"#).unwrap();
        assert!(!ctx.loads_icomoon());
    }

    #[test]
    fn test_override_activates_template_builder() {
        let ctx = ContextSnapshot::new().with_override(LayoutRegion::Footer);
        assert!(ctx.has(Feature::TemplateBuilder));
        assert!(ctx.is_overridden(LayoutRegion::Footer));
    }
}
