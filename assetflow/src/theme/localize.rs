//! Localization payloads for theme scripts.
//!
//! Bindings are unconditional: a payload is only emitted when its script was
//! resolved, so header payloads disappear together with the legacy header.

use crate::config::ResolverConfig;
use crate::context::{ContextSnapshot, Feature};
use crate::errors::TableValidationError;
use crate::table::{DecisionTableBuilder, LocalizationBinding};
use serde_json::{json, Map, Value};

type Payload = Map<String, Value>;

fn object(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn side_header_breakpoint(ctx: &ContextSnapshot, config: &ResolverConfig) -> i64 {
    ctx.options
        .nonzero_int_or("side_header_break_point", config.default_side_header_breakpoint)
}

fn header_position(ctx: &ContextSnapshot) -> String {
    ctx.options.str_or("header_position", "top")
}

fn header_sticky(ctx: &ContextSnapshot) -> Value {
    if ctx.builder.preview_frame && ctx.preferences.sticky_header_off {
        json!("")
    } else {
        ctx.options.json("header_sticky")
    }
}

fn comment_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    let o = &ctx.options;
    object(json!({
        "title_style_type": o.json("title_style_type"),
        "title_margin_top": o.sub_str_or("title_margin", "top", ""),
        "title_margin_bottom": o.sub_str_or("title_margin", "bottom", ""),
    }))
}

fn to_top_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    let o = &ctx.options;
    object(json!({
        "status_totop": o.json("status_totop"),
        "totop_position": o.json("totop_position"),
        "totop_scroll_down_only": o.json("totop_scroll_down_only"),
    }))
}

fn views_counter_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    object(json!({ "ajaxUrl": ctx.ajax_url() }))
}

fn language_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    object(json!({ "language_flag": ctx.active_language.as_deref().unwrap_or_default() }))
}

fn side_nav_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    object(json!({ "sidenav_behavior": ctx.options.json("sidenav_behavior") }))
}

fn rev_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    let enabled = i64::from(ctx.options.is_truthy("avada_rev_styles"));
    object(json!({ "avada_rev_styles": enabled }))
}

fn select_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    object(json!({ "avada_drop_down": ctx.options.json("avada_styles_dropdowns") }))
}

fn parallax_footer_vars(ctx: &ContextSnapshot, config: &ResolverConfig) -> Payload {
    object(json!({
        "side_header_break_point": side_header_breakpoint(ctx, config),
        "header_position": header_position(ctx),
    }))
}

fn bbpress_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    let o = &ctx.options;
    object(json!({
        "alert_box_text_align": o.json("alert_box_text_align"),
        "alert_box_text_transform": o.json("alert_box_text_transform"),
        "alert_box_dismissable": o.json("alert_box_dismissable"),
        "alert_box_shadow": o.json("alert_box_shadow"),
        "alert_border_size": o.json("alert_border_size"),
    }))
}

fn elastic_slider_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    let o = &ctx.options;
    object(json!({
        "tfes_autoplay": o.json("tfes_autoplay"),
        "tfes_animation": o.json("tfes_animation"),
        "tfes_interval": o.int_or("tfes_interval", 0),
        "tfes_speed": o.int_or("tfes_speed", 0),
        "tfes_width": o.int_or("tfes_width", 0),
    }))
}

fn fade_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    object(json!({
        "page_title_fading": ctx.options.json("page_title_fading"),
        "header_position": header_position(ctx),
    }))
}

fn privacy_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    let privacy = &ctx.privacy;
    let embeds = privacy.embeds && ctx.has(Feature::PrivacyEmbeds);
    let cookie = privacy.cookie.as_ref().filter(|_| embeds);
    let (types, defaults) = if embeds {
        (privacy.embed_types.clone(), privacy.default_consents.clone())
    } else {
        (Vec::new(), Vec::new())
    };

    object(json!({
        "name": cookie.map_or("privacy_embeds", |c| c.name.as_str()),
        "days": cookie.map_or("30", |c| c.days.as_str()),
        "path": cookie.map_or("/", |c| c.path.as_str()),
        "types": types,
        "defaults": defaults,
        "button": privacy.bar_button_save,
    }))
}

fn live_search_vars(ctx: &ContextSnapshot, _: &ResolverConfig) -> Payload {
    let o = &ctx.options;
    object(json!({
        "live_search": o.is_truthy("live_search") || ctx.has(Feature::FusionBuilder),
        "ajaxurl": ctx.ajax_url(),
        "no_search_results": ctx.string_or(
            "no_search_results",
            "No search results match your query. Please try again",
        ),
        "min_char_count": o.json("live_search_min_char_count"),
        "per_page": o.json("live_search_results_per_page"),
        "show_feat_img": o.json("live_search_display_featured_image"),
        "display_post_type": o.json("live_search_display_post_type"),
    }))
}

fn header_vars(ctx: &ContextSnapshot, config: &ResolverConfig) -> Payload {
    let o = &ctx.options;
    let nav_highlight_border = if o.equals("menu_highlight_style", "bar") {
        json!(o.int_or("nav_highlight_border", 0))
    } else {
        json!("0")
    };
    let has_logo = !o.sub_str_or("logo", "url", "").is_empty()
        || !o.sub_str_or("logo_retina", "url", "").is_empty();
    let logo_margin = |side: &str| {
        if has_logo {
            o.sub_str_or("logo_margin", side, "0px")
        } else {
            "0px".to_string()
        }
    };

    object(json!({
        "header_position": header_position(ctx),
        "header_sticky": header_sticky(ctx),
        "header_sticky_type2_layout": o.json("header_sticky_type2_layout"),
        "header_sticky_shadow": o.json("header_sticky_shadow"),
        "side_header_break_point": side_header_breakpoint(ctx, config),
        "header_sticky_mobile": o.json("header_sticky_mobile"),
        "header_sticky_tablet": o.json("header_sticky_tablet"),
        "mobile_menu_design": o.json("mobile_menu_design"),
        "sticky_header_shrinkage": o.json("header_sticky_shrinkage"),
        "nav_height": o.int_or("nav_height", 0),
        "nav_highlight_border": nav_highlight_border,
        "nav_highlight_style": o.json("menu_highlight_style"),
        "logo_margin_top": logo_margin("top"),
        "logo_margin_bottom": logo_margin("bottom"),
        "layout_mode": o.str_or("layout", "").to_lowercase(),
        "header_padding_top": o.sub_str_or("header_padding", "top", ""),
        "header_padding_bottom": o.sub_str_or("header_padding", "bottom", ""),
        "scroll_offset": o.json("scroll_offset"),
    }))
}

fn menu_vars(ctx: &ContextSnapshot, config: &ResolverConfig) -> Payload {
    let o = &ctx.options;
    object(json!({
        "site_layout": o.json("layout"),
        "header_position": header_position(ctx),
        "logo_alignment": o.json("logo_alignment"),
        "header_sticky": header_sticky(ctx),
        "header_sticky_mobile": o.json("header_sticky_mobile"),
        "header_sticky_tablet": o.json("header_sticky_tablet"),
        "side_header_break_point": side_header_breakpoint(ctx, config),
        "megamenu_base_width": o.json("megamenu_width"),
        "mobile_menu_design": o.json("mobile_menu_design"),
        "dropdown_goto": ctx.string_or("dropdown_goto", "Go to..."),
        "mobile_nav_cart": ctx.string_or("mobile_nav_cart", "Shopping Cart"),
        "mobile_submenu_open": ctx.string_or("mobile_submenu_open", "Open submenu of %s"),
        "mobile_submenu_close": ctx.string_or("mobile_submenu_close", "Close submenu of %s"),
        "submenu_slideout": o.json("mobile_nav_submenu_slideout"),
    }))
}

fn side_header_vars(ctx: &ContextSnapshot, config: &ResolverConfig) -> Payload {
    object(json!({
        "side_header_break_point": side_header_breakpoint(ctx, config),
        "footer_special_effects": ctx.options.json("footer_special_effects"),
    }))
}

pub(super) fn builder() -> Result<DecisionTableBuilder, TableValidationError> {
    let bindings = [
        LocalizationBinding::new("avada-comments", "avadaCommentVars", comment_vars),
        LocalizationBinding::new("avada-to-top", "avadaToTopVars", to_top_vars),
        LocalizationBinding::new("avada-views-counter", "avadaViewsCounterVars", views_counter_vars),
        LocalizationBinding::new("avada-wpml", "avadaLanguageVars", language_vars),
        LocalizationBinding::new("avada-side-nav", "avadaSideNavVars", side_nav_vars),
        LocalizationBinding::new("avada-rev-styles", "avadaRevVars", rev_vars),
        LocalizationBinding::new("avada-drop-down", "avadaSelectVars", select_vars),
        LocalizationBinding::new(
            "avada-parallax-footer",
            "avadaParallaxFooterVars",
            parallax_footer_vars,
        ),
        LocalizationBinding::new("avada-bbpress", "avadaBbpressVars", bbpress_vars),
        LocalizationBinding::new(
            "avada-elastic-slider",
            "avadaElasticSliderVars",
            elastic_slider_vars,
        ),
        LocalizationBinding::new("avada-fade", "avadaFadeVars", fade_vars),
        LocalizationBinding::new("avada-privacy", "avadaPrivacyVars", privacy_vars),
        LocalizationBinding::new("avada-live-search", "avadaLiveSearchVars", live_search_vars),
        LocalizationBinding::new("avada-header", "avadaHeaderVars", header_vars),
        LocalizationBinding::new("avada-menu", "avadaMenuVars", menu_vars),
        LocalizationBinding::new("avada-side-header-scroll", "avadaSideHeaderVars", side_header_vars),
    ];

    let mut builder = DecisionTableBuilder::new("localizations");
    for binding in bindings {
        builder.add_binding(binding)?;
    }
    Ok(builder)
}
