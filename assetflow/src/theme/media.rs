//! Media-query stylesheets.

use super::ThemeAssets;
use crate::context::{ContextSnapshot, Feature, LayoutRegion};
use crate::core::AssetDescriptor;
use crate::errors::TableValidationError;
use crate::table::{DecisionTableBuilder, Predicate, TableEntry, VariantGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Always,
    LegacyHeader,
}

/// The responsive set in cascade order: file name, media key, gate.
const RESPONSIVE: &[(&str, &str, Gate)] = &[
    ("max-1c", "fusion-max-1c", Gate::Always),
    ("max-2c", "fusion-max-2c", Gate::Always),
    ("min-2c-max-3c", "fusion-min-2c-max-3c", Gate::Always),
    ("min-3c-max-4c", "fusion-min-3c-max-4c", Gate::Always),
    ("min-4c-max-5c", "fusion-min-4c-max-5c", Gate::Always),
    ("min-5c-max-6c", "fusion-min-5c-max-6c", Gate::Always),
    ("min-shbp", "fusion-min-shbp", Gate::Always),
    ("min-shbp-header-legacy", "fusion-min-shbp", Gate::LegacyHeader),
    ("max-shbp", "fusion-max-shbp", Gate::Always),
    ("max-shbp-header-legacy", "fusion-max-shbp", Gate::LegacyHeader),
    ("max-sh-shbp", "fusion-max-sh-shbp", Gate::Always),
    ("max-sh-shbp-header-legacy", "fusion-max-sh-shbp", Gate::LegacyHeader),
    ("min-768-max-1024-p", "fusion-min-768-max-1024-p", Gate::Always),
    ("min-768-max-1024-p-header-legacy", "fusion-min-768-max-1024-p", Gate::LegacyHeader),
    ("min-768-max-1024-l", "fusion-min-768-max-1024-l", Gate::Always),
    ("min-768-max-1024-l-header-legacy", "fusion-min-768-max-1024-l", Gate::LegacyHeader),
    ("max-sh-cbp", "fusion-max-sh-cbp", Gate::Always),
    ("max-sh-sbp", "fusion-max-sh-sbp", Gate::Always),
    ("max-sh-640", "fusion-max-sh-640", Gate::Always),
    ("max-shbp-18", "fusion-max-shbp-18", Gate::Always),
    ("max-shbp-32", "fusion-max-shbp-32", Gate::Always),
    ("min-sh-cbp", "fusion-min-sh-cbp", Gate::Always),
    ("max-640", "fusion-max-640", Gate::Always),
    ("max-main", "fusion-max-main", Gate::Always),
    ("max-cbp", "fusion-max-cbp", Gate::Always),
];

const NOT_RESPONSIVE: &[(&str, &str)] = &[
    ("max-shbp-not-responsive", "fusion-max-shbp"),
    ("max-shbp-18-not-responsive", "fusion-max-shbp-18"),
];

const BBPRESS: &[(&str, &str)] = &[
    ("max-640-bbpress", "fusion-max-640"),
    ("max-sh-640-bbpress", "fusion-max-sh-640"),
    ("max-sh-cbp-bbpress", "fusion-max-sh-cbp"),
    ("min-sh-cbp-bbpress", "fusion-min-sh-cbp"),
];

const GRAVITY_FORMS: &[(&str, &str)] = &[
    ("max-640-gravity", "fusion-max-640"),
    ("max-sh-cbp-gravity", "fusion-max-sh-cbp"),
];

const SLIDERS: &[(&str, &str)] = &[
    ("max-640-sliders", "fusion-max-640"),
    ("max-sh-cbp-sliders", "fusion-max-sh-cbp"),
];

const EVENTS_CALENDAR: &[(&str, &str)] = &[
    ("max-768-ec", "fusion-max-768"),
    ("max-sh-cbp-ec", "fusion-max-sh-cbp"),
];

const SOCIAL_SHARING: &[(&str, &str)] = &[
    ("min-768-max-1024-p-social-sharing", "fusion-min-768-max-1024-p"),
    ("max-sh-640-social-sharing", "fusion-max-sh-640"),
    ("max-640-social-sharing", "fusion-max-640"),
    ("max-sh-cbp-social-sharing", "fusion-max-sh-cbp"),
];

fn shows_social_sharing(ctx: &ContextSnapshot) -> bool {
    ctx.shows_social_sharing()
}

fn responsive() -> Predicate {
    Predicate::option("responsive")
}

fn media_set(assets: &ThemeAssets<'_>, set: &[(&str, &str)]) -> Vec<AssetDescriptor> {
    set.iter().map(|(name, key)| assets.media(name, key)).collect()
}

pub(super) fn builder(assets: &ThemeAssets<'_>) -> Result<DecisionTableBuilder, TableValidationError> {
    let media = |set: &[(&str, &str)]| media_set(assets, set);

    // Consecutive files sharing a gate form one entry. The first run is the
    // standard side of the group the not-responsive fallbacks replace.
    let mut runs: Vec<(Gate, Vec<(&str, &str)>)> = Vec::new();
    for (name, key, gate) in RESPONSIVE {
        match runs.last_mut() {
            Some((last, files)) if *last == *gate => files.push((*name, *key)),
            _ => runs.push((*gate, vec![(*name, *key)])),
        }
    }

    let mut builder = DecisionTableBuilder::new("media");
    let mut runs = runs.into_iter();
    if let Some((_, first)) = runs.next() {
        builder.add_entry(TableEntry::variant(
            "media-responsive",
            Predicate::Always,
            VariantGroup::new("responsive", !responsive(), media(&first), media(NOT_RESPONSIVE)),
        ))?;
    }
    for (gate, files) in runs {
        let predicate = match gate {
            Gate::Always => responsive(),
            Gate::LegacyHeader => responsive().and(!Predicate::overridden(LayoutRegion::Header)),
        };
        builder.add_entry(TableEntry::new(
            format!("media-{}", files[0].0),
            predicate,
            media(&files),
        ))?;
    }

    builder
        .entry(TableEntry::new(
            "media-bbpress",
            responsive().and(Predicate::feature(Feature::Bbpress)),
            media(BBPRESS),
        ))?
        .entry(TableEntry::new(
            "media-gravity-forms",
            responsive().and(Predicate::feature(Feature::GravityForms)),
            media(GRAVITY_FORMS),
        ))?
        .entry(TableEntry::new(
            "media-contact-form-7",
            responsive().and(Predicate::feature(Feature::ContactForm7)),
            media(&[("max-sh-cbp-cf7", "fusion-max-sh-cbp")]),
        ))?
        .entry(TableEntry::new(
            "media-sliders",
            responsive().and(Predicate::AnyFeature(vec![Feature::LayerSlider, Feature::RevSlider])),
            media(SLIDERS),
        ))?
        .entry(TableEntry::new(
            "media-elastic-slider",
            responsive().and(Predicate::option("status_eslider").or_builder()),
            media(&[("max-sh-cbp-eslider", "fusion-max-sh-cbp")]),
        ))?
        .entry(TableEntry::new(
            "media-admin-bar",
            responsive().and(Predicate::AdminBar),
            media(&[("max-782-adminbar", "fusion-max-782")]),
        ))?
        .entry(TableEntry::new(
            "media-events-calendar",
            responsive().and(Predicate::feature(Feature::EventsCalendar)),
            media(EVENTS_CALENDAR),
        ))?
        .entry(TableEntry::new(
            "media-social-sharing",
            responsive().and(Predicate::custom("social_sharing", shows_social_sharing)),
            media(SOCIAL_SHARING),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;

    #[test]
    fn test_runs_alternate_between_gates() {
        let config = ResolverConfig::default();
        let assets = ThemeAssets::new(&config);
        let builder = builder(&assets).unwrap();

        // 1 variant + 10 alternating runs + 8 integration entries
        assert_eq!(builder.entry_count(), 19);
    }

    #[test]
    fn test_every_responsive_file_has_fusion_key() {
        for (name, key, _) in RESPONSIVE {
            assert!(key.starts_with("fusion-"), "{name}");
        }
    }
}
