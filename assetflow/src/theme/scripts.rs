//! Theme and host scripts.

use super::ThemeAssets;
use crate::context::{ContextSnapshot, Feature, LayoutRegion, PageTemplate};
use crate::core::AssetDescriptor;
use crate::errors::TableValidationError;
use crate::table::{DecisionTableBuilder, Predicate, TableEntry, VariantGroup};

const JQUERY: &[&str] = &["jquery"];
const HEADER_DEPS: &[&str] = &["modernizr", "jquery", "jquery-easing"];

fn is_preview(ctx: &ContextSnapshot) -> bool {
    ctx.page.is_preview
}

fn side_header(ctx: &ContextSnapshot) -> bool {
    ctx.options.str_or("header_position", "top") != "top"
}

fn privacy_active(ctx: &ContextSnapshot) -> bool {
    ctx.privacy.embeds || ctx.privacy.bar
}

fn general(assets: &ThemeAssets<'_>, handle: &str, deps: &[&str]) -> AssetDescriptor {
    assets.script(handle, &format!("/general/{handle}.js"), deps)
}

pub(super) fn builder(assets: &ThemeAssets<'_>) -> Result<DecisionTableBuilder, TableValidationError> {
    let scrollspy = |header: Option<&str>| {
        let deps: Vec<&str> = header.into_iter().chain(["bootstrap-scrollspy"]).collect();
        general(assets, "avada-scrollspy", &deps)
    };

    DecisionTableBuilder::new("scripts")
        .entry(TableEntry::new(
            "baseline",
            Predicate::Always,
            vec![
                assets.script(
                    "bootstrap-scrollspy",
                    "/library/bootstrap.scrollspy.js",
                    &["jquery", "fusion"],
                ),
                general(assets, "avada-general-footer", JQUERY),
                general(assets, "avada-quantity", JQUERY),
            ],
        ))?
        .entry(TableEntry::variant(
            "scrollspy",
            Predicate::DisplaysHeader,
            VariantGroup::new(
                "scrollspy",
                Predicate::overridden(LayoutRegion::Header),
                vec![scrollspy(Some("avada-header"))],
                vec![scrollspy(Some("avada-custom-header"))],
            ),
        ))?
        .entry(TableEntry::new(
            "scrollspy-headerless",
            !Predicate::DisplaysHeader,
            vec![scrollspy(None)],
        ))?
        .entry(TableEntry::new(
            "baseline-tail",
            Predicate::Always,
            vec![
                general(assets, "avada-crossfade-images", JQUERY),
                general(assets, "avada-select", JQUERY),
            ],
        ))?
        .entry(TableEntry::new(
            "wpml",
            Predicate::HasLanguages,
            vec![general(assets, "avada-wpml", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "side-nav",
            Predicate::Template(PageTemplate::SideNavigation),
            vec![general(assets, "avada-side-nav", JQUERY)],
        ))?
        .entry(TableEntry::variant(
            "header",
            Predicate::DisplaysHeader,
            VariantGroup::new(
                "header",
                Predicate::overridden(LayoutRegion::Header),
                vec![
                    general(assets, "avada-header", HEADER_DEPS),
                    general(assets, "avada-menu", &["modernizr", "jquery", "avada-header"]),
                ],
                vec![general(assets, "avada-custom-header", HEADER_DEPS)],
            ),
        ))?
        .entry(TableEntry::new(
            "views-counter",
            Predicate::option_eq("post_views", "ajax")
                .and(!Predicate::Builder)
                .and(Predicate::Singular)
                .and(!Predicate::custom("preview", is_preview)),
            vec![general(assets, "avada-views-counter", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "to-top",
            Predicate::option_ne("status_totop", "off").or_builder(),
            vec![general(assets, "avada-to-top", &["jquery", "cssua"])],
        ))?
        .entry(TableEntry::new(
            "sliding-bar",
            Predicate::option("slidingbar_widgets").or_builder(),
            vec![general(assets, "avada-sliding-bar", HEADER_DEPS)],
        ))?
        .entry(TableEntry::new(
            "drop-down",
            Predicate::option("avada_styles_dropdowns").or_builder(),
            vec![general(assets, "avada-drop-down", &["jquery", "avada-select"])],
        ))?
        .entry(TableEntry::new(
            "side-header-scroll",
            (!Predicate::overridden(LayoutRegion::Header))
                .and(Predicate::custom("side_header", side_header)),
            vec![general(
                assets,
                "avada-side-header-scroll",
                &["jquery", "modernizr", "jquery-sticky-kit"],
            )],
        ))?
        .entry(TableEntry::new(
            "rev-styles",
            Predicate::feature(Feature::RevSlider)
                .and(Predicate::option("avada_rev_styles").or_builder()),
            vec![general(assets, "avada-rev-styles", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "parallax-footer",
            Predicate::option_eq("footer_special_effects", "footer_parallax_effect").or_builder(),
            vec![general(assets, "avada-parallax-footer", &["jquery", "modernizr"])],
        ))?
        .entry(TableEntry::new(
            "fade",
            Predicate::option("page_title_fading").or_builder(),
            vec![general(assets, "avada-fade", &["jquery", "cssua", "jquery-fade"])],
        ))?
        .entry(TableEntry::new(
            "contact-form-7",
            Predicate::feature(Feature::ContactForm7),
            vec![general(assets, "avada-contact-form-7", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "gravity-forms",
            Predicate::feature(Feature::GravityForms).and(Predicate::option("avada_styles_dropdowns")),
            vec![general(assets, "avada-gravity-forms", &["jquery", "avada-select"])],
        ))?
        .entry(TableEntry::new(
            "elastic-slider",
            Predicate::option("status_eslider").or_builder(),
            vec![
                assets.script(
                    "jquery-elastic-slider",
                    "/library/jquery.elasticslider.js",
                    &["jquery", "images-loaded"],
                ),
                general(
                    assets,
                    "avada-elastic-slider",
                    &["jquery", "images-loaded", "jquery-elastic-slider"],
                ),
            ],
        ))?
        .entry(TableEntry::new(
            "bbpress",
            Predicate::feature(Feature::Bbpress),
            vec![general(assets, "avada-bbpress", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "events",
            Predicate::feature(Feature::EventsCalendar),
            vec![general(assets, "avada-events", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "privacy",
            Predicate::custom("privacy", privacy_active),
            vec![general(assets, "avada-privacy", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "live-search",
            Predicate::option("live_search")
                .or_builder()
                .or(Predicate::feature(Feature::FusionBuilder)),
            vec![general(assets, "avada-live-search", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "library-scripts",
            !Predicate::feature(Feature::FusionBuilder),
            vec![
                assets.library_script("awb-carousel", "/general/awb-carousel.js", &[]),
                assets.library_script(
                    "fusion-blog",
                    "/general/fusion-blog.js",
                    &[
                        "jquery",
                        "isotope",
                        "fusion-lightbox",
                        "fusion-flexslider",
                        "jquery-infinite-scroll",
                        "images-loaded",
                    ],
                ),
            ],
        ))?
        .entry(TableEntry::new(
            "comments",
            Predicate::CommentsThreaded,
            vec![general(assets, "avada-comments", JQUERY)],
        ))?
        .entry(TableEntry::new(
            "archive-blog",
            !Predicate::Singular,
            vec![AssetDescriptor::registered_script("fusion-blog")],
        ))?
        .entry(TableEntry::new(
            "registered",
            Predicate::Always,
            vec![
                AssetDescriptor::registered_script("fusion-alert"),
                AssetDescriptor::registered_script("avada-crossfade-images"),
            ],
        ))?
        .entry(TableEntry::new(
            "host-jquery",
            Predicate::Always,
            vec![AssetDescriptor::registered_script("jquery")],
        ))?
        .entry(TableEntry::new(
            "host-comment-reply",
            Predicate::CommentsThreaded,
            vec![AssetDescriptor::registered_script("comment-reply")
                .with_version(assets.config.theme_version.as_str())],
        ))?
        .entry(TableEntry::new(
            "host-nova-gallery",
            Predicate::feature(Feature::NovaGallery),
            vec![AssetDescriptor::registered_script("novagallery_modernizr")],
        ))?
        .entry(TableEntry::new(
            "host-cc-gallery",
            Predicate::feature(Feature::CcGallery),
            vec![AssetDescriptor::registered_script("ccgallery_modernizr")],
        ))
}
