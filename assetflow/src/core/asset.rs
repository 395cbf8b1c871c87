//! Asset descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of asset a descriptor enqueues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// A JavaScript file.
    Script,
    /// A stylesheet folded into the compiled dynamic CSS.
    CompiledStyle,
    /// A stylesheet enqueued on its own.
    Style,
    /// A stylesheet bound to a media-query key.
    MediaStyle,
}

impl AssetKind {
    /// Returns the kind as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::CompiledStyle => "compiled_style",
            Self::Style => "style",
            Self::MediaStyle => "media_style",
        }
    }

    /// Whether the asset is any kind of stylesheet.
    #[must_use]
    pub const fn is_style(&self) -> bool {
        !matches!(self, Self::Script)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the host prints the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPosition {
    /// In the document head.
    Head,
    /// Before the closing body tag.
    Footer,
}

/// Base location a relative asset path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceBase {
    /// The theme directory.
    Theme,
    /// The bundled library directory, used when the page-builder plugin that
    /// normally ships the file is not active.
    Library,
}

/// A resolved source locator: public URL plus filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetSource {
    /// Public URL.
    pub url: String,
    /// Filesystem path, when the asset lives on this server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AssetSource {
    /// Creates a source from a URL only.
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: None,
        }
    }

    /// Creates a source from a URL and a path.
    #[must_use]
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: Some(path.into()),
        }
    }
}

/// One script or stylesheet to enqueue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Unique handle.
    pub handle: String,
    /// Asset kind.
    pub kind: AssetKind,
    /// Source; `None` enqueues a handle the host already registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<AssetSource>,
    /// Handles that must be printed first.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Cache-busting version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Load position.
    pub position: LoadPosition,
    /// Media-query key for media styles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl AssetDescriptor {
    /// Creates a footer script.
    #[must_use]
    pub fn script(handle: impl Into<String>, source: AssetSource) -> Self {
        Self {
            handle: handle.into(),
            kind: AssetKind::Script,
            source: Some(source),
            dependencies: Vec::new(),
            version: None,
            position: LoadPosition::Footer,
            media: None,
        }
    }

    /// Creates a stylesheet folded into the compiled CSS.
    #[must_use]
    pub fn compiled_style(handle: impl Into<String>, source: AssetSource) -> Self {
        Self {
            kind: AssetKind::CompiledStyle,
            position: LoadPosition::Head,
            ..Self::script(handle, source)
        }
    }

    /// Creates a directly enqueued stylesheet.
    #[must_use]
    pub fn style(handle: impl Into<String>, source: AssetSource) -> Self {
        Self {
            kind: AssetKind::Style,
            position: LoadPosition::Head,
            ..Self::script(handle, source)
        }
    }

    /// Creates a media-query stylesheet.
    #[must_use]
    pub fn media_style(
        handle: impl Into<String>,
        source: AssetSource,
        media: impl Into<String>,
    ) -> Self {
        Self {
            kind: AssetKind::MediaStyle,
            position: LoadPosition::Head,
            media: Some(media.into()),
            ..Self::script(handle, source)
        }
    }

    /// Enqueues a script the host already registered.
    #[must_use]
    pub fn registered_script(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            kind: AssetKind::Script,
            source: None,
            dependencies: Vec::new(),
            version: None,
            position: LoadPosition::Footer,
            media: None,
        }
    }

    /// Sets the dependencies.
    #[must_use]
    pub fn with_dependencies(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the load position.
    #[must_use]
    pub fn with_position(mut self, position: LoadPosition) -> Self {
        self.position = position;
        self
    }

    /// Whether the asset depends on the handle.
    #[must_use]
    pub fn depends_on(&self, handle: &str) -> bool {
        self.dependencies.iter().any(|d| d == handle)
    }

    /// Source URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.url.as_str())
    }
}
