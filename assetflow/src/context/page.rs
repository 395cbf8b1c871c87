//! Page classification for the current request.

use serde::{Deserialize, Serialize};

/// Broad classification of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// A single post, page or custom post type entry.
    Singular,
    /// Any listing: blog index, category, search results.
    #[default]
    Archive,
}

/// Page template selected for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageTemplate {
    /// `blank.php`: no header, footer or page title bar.
    Blank,
    /// `side-navigation.php`.
    SideNavigation,
    /// Any other template file.
    Other(String),
}

/// Layout regions the template builder can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutRegion {
    /// The site header.
    Header,
    /// The site footer.
    Footer,
    /// The page title bar.
    PageTitleBar,
    /// The main content area.
    Content,
}

/// What the host knows about the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Singular or archive.
    #[serde(default)]
    pub kind: PageKind,
    /// Selected page template, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PageTemplate>,
    /// Post type for singular pages (`post`, `page`, `tribe_events`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    /// ID of the current post, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
    /// Whether comments are open on the current post.
    #[serde(default)]
    pub comments_open: bool,
    /// Whether this is a post preview.
    #[serde(default)]
    pub is_preview: bool,
    /// Page option hiding the header on this page.
    #[serde(default)]
    pub hide_header: bool,
    /// Whether the page title bar is active for the current post.
    #[serde(default = "default_true")]
    pub page_title_bar_active: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            kind: PageKind::default(),
            template: None,
            post_type: None,
            post_id: None,
            comments_open: false,
            is_preview: false,
            hide_header: false,
            page_title_bar_active: true,
        }
    }
}

impl PageContext {
    /// An archive page.
    #[must_use]
    pub fn archive() -> Self {
        Self::default()
    }

    /// A singular page of the given post type.
    #[must_use]
    pub fn singular(post_type: impl Into<String>) -> Self {
        Self {
            kind: PageKind::Singular,
            post_type: Some(post_type.into()),
            ..Self::default()
        }
    }

    /// Sets the template.
    #[must_use]
    pub fn with_template(mut self, template: PageTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Sets the post ID.
    #[must_use]
    pub fn with_post_id(mut self, post_id: u64) -> Self {
        self.post_id = Some(post_id);
        self
    }

    /// Marks comments as open.
    #[must_use]
    pub fn with_comments_open(mut self) -> Self {
        self.comments_open = true;
        self
    }

    /// Marks the page as a preview.
    #[must_use]
    pub fn as_preview(mut self) -> Self {
        self.is_preview = true;
        self
    }

    /// Hides the header through the page option.
    #[must_use]
    pub fn without_header(mut self) -> Self {
        self.hide_header = true;
        self
    }

    /// Sets whether the page title bar is active.
    #[must_use]
    pub fn with_page_title_bar(mut self, active: bool) -> Self {
        self.page_title_bar_active = active;
        self
    }

    /// Whether this is a singular page.
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.kind == PageKind::Singular
    }

    /// Whether the given template is selected.
    #[must_use]
    pub fn uses_template(&self, template: &PageTemplate) -> bool {
        self.template.as_ref() == Some(template)
    }

    /// Whether the legacy header is rendered: not the blank template and not
    /// hidden by the page option.
    #[must_use]
    pub fn displays_header(&self) -> bool {
        !self.uses_template(&PageTemplate::Blank) && !self.hide_header
    }
}
