//! Compiled dynamic stylesheets and directly enqueued stylesheets.

use super::ThemeAssets;
use crate::context::{CompilerMode, ContextSnapshot, Feature, LayoutRegion};
use crate::core::AssetDescriptor;
use crate::errors::TableValidationError;
use crate::table::{DecisionTableBuilder, Predicate, TableEntry, VariantGroup};

fn shows_page_title_bar(ctx: &ContextSnapshot) -> bool {
    !ctx.is_overridden(LayoutRegion::PageTitleBar)
        && (ctx.page.post_id.is_none() || ctx.page.page_title_bar_active)
}

fn shows_social_sharing(ctx: &ContextSnapshot) -> bool {
    ctx.shows_social_sharing()
}

fn loads_icomoon(ctx: &ContextSnapshot) -> bool {
    ctx.loads_icomoon()
}

fn widget_areas() -> Predicate {
    Predicate::option_ne("status_widget_areas", "0")
}

fn compiled_set(assets: &ThemeAssets<'_>, names: &[&str]) -> Vec<AssetDescriptor> {
    names.iter().map(|name| assets.compiled(name)).collect()
}

pub(super) fn builder(assets: &ThemeAssets<'_>) -> Result<DecisionTableBuilder, TableValidationError> {
    let compiled = |names: &[&str]| compiled_set(assets, names);

    DecisionTableBuilder::new("styles")
        .entry(TableEntry::new(
            "css-base",
            Predicate::Compiler(CompilerMode::File),
            compiled(&["style"]),
        ))?
        .entry(TableEntry::new(
            "css-core",
            Predicate::Always,
            compiled(&["dynamic/background", "dynamic/blog", "dynamic/colors"]),
        ))?
        .entry(TableEntry::new(
            "css-totop",
            Predicate::option_ne("status_totop", "off"),
            compiled(&["dynamic/totop"]),
        ))?
        .entry(TableEntry::new(
            "css-scrollbar",
            Predicate::option("custom_scrollbar").or_builder(),
            compiled(&["dynamic/scrollbar"]),
        ))?
        .entry(TableEntry::new(
            "css-layerslider",
            Predicate::feature(Feature::LayerSlider),
            compiled(&["dynamic/layerslider"]),
        ))?
        .entry(TableEntry::new(
            "css-fusion-slider",
            Predicate::option("status_fusion_slider"),
            compiled(&["dynamic/fusion-slider"]),
        ))?
        .entry(TableEntry::new(
            "css-blocks",
            Predicate::option_ne("load_block_styles", "off"),
            compiled(&["dynamic/blocks"]),
        ))?
        .entry(TableEntry::new(
            "css-header-legacy",
            !Predicate::overridden(LayoutRegion::Header),
            compiled(&["header-legacy", "dynamic/menu"]),
        ))?
        .entry(TableEntry::new(
            "css-contact",
            Predicate::Always,
            compiled(&["dynamic/contact"]),
        ))?
        .entry(TableEntry::new(
            "css-elastic-slider",
            Predicate::option("status_eslider"),
            compiled(&["dynamic/elastic-slider"]),
        ))?
        .entry(TableEntry::new(
            "css-layout",
            Predicate::Always,
            compiled(&["dynamic/extra", "dynamic/footer", "dynamic/layout"]),
        ))?
        .entry(TableEntry::new(
            "css-portfolio",
            Predicate::option_ne("status_fusion_portfolio", "0"),
            compiled(&["dynamic/portfolio"]),
        ))?
        .entry(TableEntry::new(
            "css-widgets",
            widget_areas().or_builder(),
            compiled(&["widgets", "dynamic/widgets"]),
        ))?
        .entry(TableEntry::new(
            "css-sliding-bar",
            widget_areas()
                .or_builder()
                .and(Predicate::option("slidingbar_widgets").or_builder()),
            compiled(&["slidingbar", "dynamic/sliding-bar"]),
        ))?
        .entry(TableEntry::new(
            "css-content",
            Predicate::Always,
            compiled(&["dynamic/search", "dynamic/slideshows", "dynamic/social-media"]),
        ))?
        .entry(TableEntry::new(
            "css-footer",
            !Predicate::overridden(LayoutRegion::Footer),
            compiled(&["fusion-footer", "footer-copyright"]),
        ))?
        .entry(TableEntry::new(
            "css-footer-widget-area",
            (!Predicate::overridden(LayoutRegion::Footer)).and(widget_areas()),
            compiled(&["fusion-footer-widget-area"]),
        ))?
        .entry(TableEntry::new(
            "css-page-title-bar",
            Predicate::custom("page_title_bar", shows_page_title_bar),
            compiled(&["page-title-bar"]),
        ))?
        .entry(TableEntry::new(
            "css-typography",
            Predicate::Always,
            compiled(&["dynamic/typography"]),
        ))?
        .entry(TableEntry::new(
            "css-revslider",
            Predicate::feature(Feature::RevSlider)
                .and(Predicate::option("avada_rev_styles").or_builder()),
            compiled(&["dynamic/revslider"]),
        ))?
        .entry(TableEntry::variant(
            "css-direction",
            Predicate::Always,
            VariantGroup::new(
                "direction",
                Predicate::Rtl,
                compiled(&["dynamic/ltr"]),
                compiled(&["dynamic/rtl"]),
            ),
        ))?
        .entry(TableEntry::variant(
            "css-builder",
            Predicate::Always,
            VariantGroup::new(
                "builder",
                Predicate::feature(Feature::FusionBuilder),
                compiled(&["no-builder/shortcodes", "no-builder/no-fb"]),
                compiled(&["dynamic/fb"]),
            ),
        ))?
        .entry(TableEntry::new(
            "css-no-builder-icomoon",
            (!Predicate::feature(Feature::FusionBuilder))
                .and(Predicate::custom("load_icomoon", loads_icomoon)),
            compiled(&["no-builder/icomoon"]),
        ))?
        .entry(TableEntry::new(
            "css-no-builder-lightbox",
            (!Predicate::feature(Feature::FusionBuilder)).and(Predicate::option("status_lightbox")),
            compiled(&["no-builder/ilightbox"]),
        ))?
        .entry(TableEntry::new(
            "css-no-builder-animations",
            (!Predicate::feature(Feature::FusionBuilder))
                .and(Predicate::option_ne("status_css_animations", "off").or_builder()),
            compiled(&["no-builder/animations"]),
        ))?
        .entry(TableEntry::new(
            "css-bbpress",
            Predicate::feature(Feature::Bbpress),
            compiled(&["bbpress", "dynamic/bbpress"]),
        ))?
        .entry(TableEntry::new(
            "css-gravity-forms",
            Predicate::feature(Feature::GravityForms),
            compiled(&["gravityforms"]),
        ))?
        .entry(TableEntry::new(
            "css-contact-form-7",
            Predicate::feature(Feature::ContactForm7),
            compiled(&["contactform7"]),
        ))?
        .entry(TableEntry::new(
            "css-events-calendar",
            Predicate::feature(Feature::EventsCalendar),
            compiled(&[
                "events-calendar",
                "dynamic/ec",
                "events-calendar-templates-v2",
                "dynamic/ec-v2",
            ]),
        ))?
        .entry(TableEntry::new(
            "css-wpml",
            Predicate::feature(Feature::Wpml),
            compiled(&["dynamic/wpml"]),
        ))?
        .entry(TableEntry::new(
            "css-social-sharing",
            Predicate::custom("social_sharing", shows_social_sharing),
            compiled(&["dynamic/social-sharing"]),
        ))?
        .entry(TableEntry::new(
            "stylesheet",
            !Predicate::Compiler(CompilerMode::File),
            vec![assets.style("avada-stylesheet", "style")],
        ))?
        .entry(TableEntry::new(
            "rtl-header-legacy",
            Predicate::Rtl
                .and(!Predicate::Compiler(CompilerMode::File))
                .and(!Predicate::overridden(LayoutRegion::Header)),
            vec![assets.style("avada-rtl-header-legacy", "rtl-header-legacy")],
        ))
}
