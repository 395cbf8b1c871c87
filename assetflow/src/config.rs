//! Resolver configuration.

use crate::core::{AssetSource, SourceBase};
use crate::errors::AssetflowError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static configuration shared by every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Theme version used as the asset cache-buster.
    #[serde(default = "default_theme_version")]
    pub theme_version: String,
    /// Public URL of the theme directory.
    #[serde(default = "default_template_dir_url")]
    pub template_dir_url: String,
    /// Filesystem path of the theme directory.
    #[serde(default = "default_template_dir_path")]
    pub template_dir_path: String,
    /// Public URL of the bundled library.
    #[serde(default = "default_library_url")]
    pub library_url: String,
    /// Filesystem path of the bundled library.
    #[serde(default = "default_library_path")]
    pub library_path: String,
    /// Serve unminified scripts from `/assets/js`.
    #[serde(default)]
    pub dev_mode: bool,
    /// Handles the host registers itself. Dependencies on these never need
    /// to appear in the resolver's output.
    #[serde(default = "default_host_handles")]
    pub host_handles: Vec<String>,
    /// Side-header breakpoint used when the option is missing or zero.
    #[serde(default = "default_side_header_breakpoint")]
    pub default_side_header_breakpoint: i64,
    /// Base URLs of plugins whose stylesheets get URL rewrites when combined.
    #[serde(default)]
    pub plugin_urls: PluginUrls,
    /// Path fragments identifying plugins whose stylesheets may be combined.
    #[serde(default = "default_bundled_plugin_fragments")]
    pub bundled_plugin_fragments: Vec<String>,
}

fn default_theme_version() -> String {
    "7.11.0".to_string()
}

fn default_template_dir_url() -> String {
    "/wp-content/themes/Avada".to_string()
}

fn default_template_dir_path() -> String {
    "/var/www/html/wp-content/themes/Avada".to_string()
}

fn default_library_url() -> String {
    "/wp-content/themes/Avada/includes/lib".to_string()
}

fn default_library_path() -> String {
    "/var/www/html/wp-content/themes/Avada/includes/lib".to_string()
}

fn default_host_handles() -> Vec<String> {
    [
        "jquery",
        "jquery-core",
        "jquery-migrate",
        "modernizr",
        "jquery-easing",
        "cssua",
        "jquery-fade",
        "jquery-sticky-kit",
        "images-loaded",
        "isotope",
        "fusion",
        "fusion-lightbox",
        "fusion-flexslider",
        "jquery-infinite-scroll",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

const fn default_side_header_breakpoint() -> i64 {
    800
}

fn default_bundled_plugin_fragments() -> Vec<String> {
    [
        "/the-events-calendar/",
        "/events-calendar-pro/",
        "/the-events-calendar-filterbar/",
        "/event-tickets/",
        "/event-tickets-plus/",
        "/bbpress/",
        "/revslider/",
        "/contact-form-7/",
        "/convertplug/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            theme_version: default_theme_version(),
            template_dir_url: default_template_dir_url(),
            template_dir_path: default_template_dir_path(),
            library_url: default_library_url(),
            library_path: default_library_path(),
            dev_mode: false,
            host_handles: default_host_handles(),
            default_side_header_breakpoint: default_side_header_breakpoint(),
            plugin_urls: PluginUrls::default(),
            bundled_plugin_fragments: default_bundled_plugin_fragments(),
        }
    }
}

impl ResolverConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, AssetflowError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetflowError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AssetflowError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }

    /// Sets the theme version.
    #[must_use]
    pub fn with_theme_version(mut self, version: impl Into<String>) -> Self {
        self.theme_version = version.into();
        self
    }

    /// Sets the theme location.
    #[must_use]
    pub fn with_template_dir(mut self, url: impl Into<String>, path: impl Into<String>) -> Self {
        self.template_dir_url = url.into();
        self.template_dir_path = path.into();
        self
    }

    /// Sets the library location.
    #[must_use]
    pub fn with_library_dir(mut self, url: impl Into<String>, path: impl Into<String>) -> Self {
        self.library_url = url.into();
        self.library_path = path.into();
        self
    }

    /// Toggles development mode.
    #[must_use]
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Sets plugin base URLs.
    #[must_use]
    pub fn with_plugin_urls(mut self, plugin_urls: PluginUrls) -> Self {
        self.plugin_urls = plugin_urls;
        self
    }

    /// Adds a host-provided handle.
    #[must_use]
    pub fn with_host_handle(mut self, handle: impl Into<String>) -> Self {
        self.host_handles.push(handle.into());
        self
    }

    /// Whether the host registers the handle itself.
    #[must_use]
    pub fn is_host_handle(&self, handle: &str) -> bool {
        self.host_handles.iter().any(|h| h == handle)
    }

    /// Script folder relative to a base: minified unless in dev mode.
    #[must_use]
    pub const fn js_folder(&self) -> &'static str {
        if self.dev_mode {
            "/assets/js"
        } else {
            "/assets/min/js"
        }
    }

    /// Resolves a path relative to a base into a source locator.
    #[must_use]
    pub fn locate(&self, base: SourceBase, relative: &str) -> AssetSource {
        let (url, path) = match base {
            SourceBase::Theme => (&self.template_dir_url, &self.template_dir_path),
            SourceBase::Library => (&self.library_url, &self.library_path),
        };
        AssetSource::new(format!("{url}{relative}"), format!("{path}{relative}"))
    }

    /// Resolves a script file under the script folder.
    #[must_use]
    pub fn script_source(&self, base: SourceBase, file: &str) -> AssetSource {
        self.locate(base, &format!("{}{file}", self.js_folder()))
    }
}

/// Base URLs of plugins whose stylesheet assets are rewritten when combined.
///
/// A rule only applies when its plugin's URL is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginUrls {
    /// The Events Calendar plugin URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_calendar: Option<String>,
    /// Contact Form 7 plugin URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_form_7: Option<String>,
    /// Slider Revolution plugin URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revslider: Option<String>,
    /// ConvertPlug plugin URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub convertplug: Option<String>,
    /// WooCommerce plugin URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub woocommerce: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.default_side_header_breakpoint, 800);
        assert!(config.is_host_handle("jquery"));
        assert!(!config.is_host_handle("avada-header"));
        assert_eq!(config.js_folder(), "/assets/min/js");
    }

    #[test]
    fn test_locate_swaps_base() {
        let config = ResolverConfig::new()
            .with_template_dir("https://x.test/theme", "/srv/theme")
            .with_library_dir("https://x.test/lib", "/srv/lib");

        let theme = config.script_source(SourceBase::Theme, "/general/fusion-blog.js");
        let library = config.script_source(SourceBase::Library, "/general/fusion-blog.js");

        assert_eq!(theme.url, "https://x.test/theme/assets/min/js/general/fusion-blog.js");
        assert_eq!(library.url, "https://x.test/lib/assets/min/js/general/fusion-blog.js");
        assert_eq!(library.path.as_deref(), Some("/srv/lib/assets/min/js/general/fusion-blog.js"));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = ResolverConfig::from_json_str(
            r#"{"dev_mode": true, "plugin_urls": {"revslider": "https://x.test/rs/"}}"#,
        )
        .unwrap();

        assert!(config.dev_mode);
        assert_eq!(config.js_folder(), "/assets/js");
        assert_eq!(config.plugin_urls.revslider.as_deref(), Some("https://x.test/rs/"));
        assert_eq!(config.theme_version, "7.11.0");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"theme_version": "8.0"}}"#).unwrap();

        let config = ResolverConfig::from_file(file.path()).unwrap();
        assert_eq!(config.theme_version, "8.0");

        let missing = ResolverConfig::from_file("/nonexistent/assetflow.json");
        assert!(matches!(missing, Err(AssetflowError::Config(_))));
    }
}
