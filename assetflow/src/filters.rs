//! Filters the host applies around printing.
//!
//! Each filter is a pure function of its inputs and the snapshot; the host
//! decides where to call it.

use crate::combine::{combination_active, CombinedStyle, StyleRegistry};
use crate::context::ContextSnapshot;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Handle of the main theme script that loads asynchronously.
pub const ASYNC_HANDLE: &str = "avada";

/// jQuery handles moved to the footer group when jQuery is deferred.
pub const JQUERY_HANDLES: &[&str] = &["jquery", "jquery-core", "jquery-migrate"];

/// URL fragment of the emoji CDN.
pub const EMOJI_CDN_FRAGMENT: &str = "https://s.w.org/images/core/emoji/";

static CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(></[a-zA-Z][^0-9](.*)>)$").unwrap_or_else(|e| panic!("invalid pattern: {e}"))
});

/// Registry changes to apply once the styles are combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DequeuePlan {
    /// Combined stylesheets to dequeue and deregister.
    pub deregister_styles: Vec<String>,
    /// Scripts to move to the footer group.
    pub footer_scripts: Vec<String>,
}

impl DequeuePlan {
    /// Builds the plan for a request.
    ///
    /// Combined handles are only deregistered in file compiler mode with
    /// combination enabled, and only when the host still has them.
    #[must_use]
    pub fn build(
        ctx: &ContextSnapshot,
        combined: &[CombinedStyle],
        registry: &dyn StyleRegistry,
    ) -> Self {
        let deregister_styles = if combination_active(ctx) {
            combined
                .iter()
                .filter(|style| registry.get(&style.handle).is_some())
                .map(|style| style.handle.clone())
                .collect()
        } else {
            Vec::new()
        };

        let footer_scripts = if ctx.options.is_truthy("defer_jquery") {
            JQUERY_HANDLES.iter().map(|h| (*h).to_string()).collect()
        } else {
            Vec::new()
        };

        Self {
            deregister_styles,
            footer_scripts,
        }
    }

    /// Whether the plan changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deregister_styles.is_empty() && self.footer_scripts.is_empty()
    }
}

/// Adds `async` to the main theme script tag.
#[must_use]
pub fn add_async<'a>(tag: &'a str, handle: &str) -> Cow<'a, str> {
    if handle == ASYNC_HANDLE {
        CLOSING_TAG.replace(tag, " async $1 ")
    } else {
        Cow::Borrowed(tag)
    }
}

/// Whether a directly printed style tag must be dropped.
///
/// Events calendar styles are already part of the combined CSS on events
/// queries.
#[must_use]
pub fn suppress_printed_style(handle: &str, ctx: &ContextSnapshot) -> bool {
    combination_active(ctx)
        && ctx.event_query
        && (handle.contains("tec-") || handle.contains("tribe-"))
}

/// Removes `jquery-migrate` from jQuery's dependencies when disabled.
#[must_use]
pub fn strip_jquery_migrate(deps: &[String], ctx: &ContextSnapshot) -> Vec<String> {
    if ctx.options.equals("jquery_migrate_disabled", "disabled") {
        deps.iter().filter(|d| *d != "jquery-migrate").cloned().collect()
    } else {
        deps.to_vec()
    }
}

/// Whether emoji scripts and styles are disabled.
#[must_use]
pub fn emojis_disabled(ctx: &ContextSnapshot) -> bool {
    ctx.options.equals("emojis_disabled", "disabled")
}

/// Drops the emoji editor plugin.
#[must_use]
pub fn filter_tinymce_plugins(plugins: &[String]) -> Vec<String> {
    plugins.iter().filter(|p| *p != "wpemoji").cloned().collect()
}

/// A resource hint as the host passes it: a bare URL or an attribute map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceHint {
    /// A bare URL.
    Url(String),
    /// Attributes such as `href`, `crossorigin` or `as`, passed through
    /// unchanged.
    Attributes(Map<String, Value>),
}

impl ResourceHint {
    /// Hint target. Attribute maps without a string `href` have none.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Attributes(attributes) => attributes.get("href").and_then(Value::as_str),
        }
    }
}

/// Removes emoji CDN hosts from DNS prefetch hints.
#[must_use]
pub fn filter_resource_hints(hints: Vec<ResourceHint>, relation_type: &str) -> Vec<ResourceHint> {
    if relation_type != "dns-prefetch" {
        return hints;
    }
    hints
        .into_iter()
        .filter(|hint| !hint.href().is_some_and(|href| href.contains(EMOJI_CDN_FRAGMENT)))
        .collect()
}
