//! Read-only view of the host's stylesheet registry.

use serde::{Deserialize, Serialize};

/// A stylesheet as registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisteredStyle {
    /// Source URL or path. May be empty for alias handles.
    #[serde(default)]
    pub src: String,
    /// Declared dependency handles.
    #[serde(default)]
    pub deps: Vec<String>,
    /// Media attribute, e.g. `all` or `print`.
    #[serde(default = "default_media")]
    pub media: String,
    /// Whether the host already printed it.
    #[serde(default)]
    pub done: bool,
}

fn default_media() -> String {
    "all".to_string()
}

impl RegisteredStyle {
    /// Creates a not-yet-printed stylesheet for all media.
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            deps: Vec::new(),
            media: default_media(),
            done: false,
        }
    }

    /// Sets the dependencies.
    #[must_use]
    pub fn with_deps(mut self, deps: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the media attribute.
    #[must_use]
    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = media.into();
        self
    }

    /// Marks the stylesheet as printed.
    #[must_use]
    pub fn printed(mut self) -> Self {
        self.done = true;
        self
    }
}

/// Registry introspection used by the combination scan.
#[cfg_attr(test, mockall::automock)]
pub trait StyleRegistry: Send + Sync {
    /// Registered handles in registration order.
    fn handles(&self) -> Vec<String>;

    /// Looks up a registered stylesheet.
    fn get(&self, handle: &str) -> Option<RegisteredStyle>;
}

/// Registry backed by an ordered list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryStyleRegistry {
    styles: Vec<(String, RegisteredStyle)>,
}

impl InMemoryStyleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stylesheet, replacing an existing one in place.
    pub fn register(&mut self, handle: impl Into<String>, style: RegisteredStyle) {
        let handle = handle.into();
        match self.styles.iter_mut().find(|(h, _)| *h == handle) {
            Some((_, existing)) => *existing = style,
            None => self.styles.push((handle, style)),
        }
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, handle: impl Into<String>, style: RegisteredStyle) -> Self {
        self.register(handle, style);
        self
    }

    /// Marks a handle as printed. Returns false if it is not registered.
    pub fn mark_done(&mut self, handle: &str) -> bool {
        self.styles
            .iter_mut()
            .find(|(h, _)| h == handle)
            .map(|(_, style)| style.done = true)
            .is_some()
    }

    /// Number of registered stylesheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl StyleRegistry for InMemoryStyleRegistry {
    fn handles(&self) -> Vec<String> {
        self.styles.iter().map(|(h, _)| h.clone()).collect()
    }

    fn get(&self, handle: &str) -> Option<RegisteredStyle> {
        self.styles
            .iter()
            .find(|(h, _)| h == handle)
            .map(|(_, style)| style.clone())
    }
}
