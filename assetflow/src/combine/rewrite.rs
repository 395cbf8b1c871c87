//! Relative URL rewrites for plugin stylesheets folded into the compiled CSS.
//!
//! Once a plugin stylesheet is inlined its relative `url(...)` references no
//! longer resolve, so each rule re-anchors them on the plugin's base URL.

use crate::config::PluginUrls;
use std::borrow::Cow;

/// One plugin's rewrite rule.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    /// Rule name, for logs.
    pub name: &'static str,
    /// Source fragments that must all be present for the rule to apply.
    pub src_contains: &'static [&'static str],
    /// The plugin's configured base URL.
    pub base: fn(&PluginUrls) -> Option<&str>,
    /// `(needle, prefix, suffix)`: `needle` becomes `prefix + base + suffix`.
    pub replacements: &'static [(&'static str, &'static str, &'static str)],
}

impl RewriteRule {
    /// Whether the rule applies to the source.
    #[must_use]
    pub fn matches(&self, src: &str) -> bool {
        self.src_contains.iter().all(|fragment| src.contains(fragment))
    }
}

/// The rewrite table, applied in order.
pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        name: "events-calendar",
        src_contains: &["events-calendar"],
        base: events_calendar_url,
        replacements: &[("url(../images/", "url(", "src/resources/images/")],
    },
    RewriteRule {
        name: "contact-form-7",
        src_contains: &["contact-form-7"],
        base: contact_form_7_url,
        replacements: &[("../../assets/ajax-loader.gif", "", "assets/ajax-loader.gif")],
    },
    RewriteRule {
        name: "revslider",
        src_contains: &["revslider"],
        base: revslider_url,
        replacements: &[
            ("url('..", "url('", "public/assets"),
            ("url(..", "url(", "public/assets"),
            ("url(openhand.cur)", "url(", "public/assets/css/openhand.cur)"),
            ("url(closedhand.cur)", "url(", "public/assets/css/closedhand.cur)"),
        ],
    },
    RewriteRule {
        name: "convertplug",
        src_contains: &["convertplug"],
        base: convertplug_url,
        replacements: &[("url(../../../", "url(", "modules/")],
    },
    RewriteRule {
        name: "woocommerce-photoswipe",
        src_contains: &["woocommerce", "default-skin"],
        base: woocommerce_url,
        replacements: &[("url(", "url(", "assets/css/photoswipe/default-skin/")],
    },
];

fn events_calendar_url(urls: &PluginUrls) -> Option<&str> {
    urls.events_calendar.as_deref()
}

fn contact_form_7_url(urls: &PluginUrls) -> Option<&str> {
    urls.contact_form_7.as_deref()
}

fn revslider_url(urls: &PluginUrls) -> Option<&str> {
    urls.revslider.as_deref()
}

fn convertplug_url(urls: &PluginUrls) -> Option<&str> {
    urls.convertplug.as_deref()
}

fn woocommerce_url(urls: &PluginUrls) -> Option<&str> {
    urls.woocommerce.as_deref()
}

fn with_trailing_slash(base: &str) -> Cow<'_, str> {
    if base.ends_with('/') {
        Cow::Borrowed(base)
    } else {
        Cow::Owned(format!("{base}/"))
    }
}

/// Rewrites relative references in a plugin stylesheet loaded from `src`.
///
/// Rules whose plugin URL is not configured are skipped.
#[must_use]
pub fn rewrite_plugin_urls(src: &str, contents: &str, urls: &PluginUrls) -> String {
    let mut contents = contents.to_string();

    for rule in REWRITE_RULES.iter().filter(|r| r.matches(src)) {
        let Some(base) = (rule.base)(urls) else {
            tracing::debug!(rule = rule.name, src, "Plugin URL not configured, rewrite skipped");
            continue;
        };
        let base = with_trailing_slash(base);
        for (needle, prefix, suffix) in rule.replacements {
            contents = contents.replace(needle, &format!("{prefix}{base}{suffix}"));
        }
    }

    contents
}
