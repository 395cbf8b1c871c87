//! Active third-party integrations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A third-party integration whose presence changes the asset set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// bbPress forums.
    Bbpress,
    /// Gravity Forms.
    GravityForms,
    /// Contact Form 7.
    ContactForm7,
    /// The Events Calendar.
    EventsCalendar,
    /// Slider Revolution.
    RevSlider,
    /// LayerSlider.
    LayerSlider,
    /// WPML multilingual plugin.
    Wpml,
    /// The page-builder plugin.
    FusionBuilder,
    /// Layout-section template builder. Layout overrides only apply while
    /// it is active.
    TemplateBuilder,
    /// Privacy embed handling. Gates the cookie and consent data of the
    /// privacy payload.
    PrivacyEmbeds,
    /// Nova gallery shortcode.
    NovaGallery,
    /// CC gallery shortcode.
    CcGallery,
}

impl Feature {
    /// All known features.
    pub const ALL: [Self; 12] = [
        Self::Bbpress,
        Self::GravityForms,
        Self::ContactForm7,
        Self::EventsCalendar,
        Self::RevSlider,
        Self::LayerSlider,
        Self::Wpml,
        Self::FusionBuilder,
        Self::TemplateBuilder,
        Self::PrivacyEmbeds,
        Self::NovaGallery,
        Self::CcGallery,
    ];

    /// The string key of the feature.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bbpress => "bbpress",
            Self::GravityForms => "gravity_forms",
            Self::ContactForm7 => "contact_form_7",
            Self::EventsCalendar => "events_calendar",
            Self::RevSlider => "rev_slider",
            Self::LayerSlider => "layer_slider",
            Self::Wpml => "wpml",
            Self::FusionBuilder => "fusion_builder",
            Self::TemplateBuilder => "template_builder",
            Self::PrivacyEmbeds => "privacy_embeds",
            Self::NovaGallery => "nova_gallery",
            Self::CcGallery => "cc_gallery",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown feature key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFeature(pub String);

impl fmt::Display for UnknownFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown feature '{}'", self.0)
    }
}

impl std::error::Error for UnknownFeature {}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// The set of active integrations.
///
/// Serialized as a list of keys. Unknown keys are dropped when parsing so
/// that an integration this crate does not know about never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSet {
    active: BTreeSet<Feature>,
}

impl FeatureSet {
    /// Creates an empty feature set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from string keys, skipping unknown ones.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for key in keys {
            match key.as_ref().parse::<Feature>() {
                Ok(feature) => {
                    set.active.insert(feature);
                }
                Err(err) => debug!(%err, "Ignoring feature key"),
            }
        }
        set
    }

    /// Adds a feature.
    #[must_use]
    pub fn with(mut self, feature: Feature) -> Self {
        self.active.insert(feature);
        self
    }

    /// Whether the feature is active.
    #[must_use]
    pub fn contains(&self, feature: Feature) -> bool {
        self.active.contains(&feature)
    }

    /// Iterates active features in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.active.iter().copied()
    }

    /// Number of active features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no feature is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<String>> for FeatureSet {
    fn from(keys: Vec<String>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<FeatureSet> for Vec<String> {
    fn from(set: FeatureSet) -> Self {
        set.iter().map(|f| f.as_str().to_string()).collect()
    }
}
