//! End-to-end tests over the theme table.

#[cfg(test)]
mod tests {
    use crate::combine::{FsStylesheetLoader, InMemoryStyleRegistry, RegisteredStyle};
    use crate::context::{
        BuilderMode, CompilerMode, ContextSnapshot, Feature, LayoutRegion, PageContext,
        PageTemplate, PrivacySettings,
    };
    use crate::core::Resolution;
    use crate::pipeline::{AssetPipeline, AssetResolver};
    use crate::sink::{CollectingSink, SinkCall};
    use crate::testing::{
        assert_dependencies_satisfied, assert_exactly_one_side, assert_unique_handles,
        ContextFixture, CountingStyleRegistry, TestResolver,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::sync::Arc;

    const BASELINE: &[&str] = &[
        "bootstrap-scrollspy",
        "avada-general-footer",
        "avada-quantity",
        "avada-scrollspy",
        "avada-crossfade-images",
        "avada-select",
        "fusion-alert",
        "jquery",
    ];
    const STANDARD_HEADER: &[&str] = &["avada-header", "avada-menu"];
    const CUSTOM_HEADER: &[&str] = &["avada-custom-header"];
    const NOT_RESPONSIVE: &[&str] = &[
        "avada-max-shbp-not-responsive",
        "avada-max-shbp-18-not-responsive",
    ];
    const RESPONSIVE_HEAD: &[&str] = &["avada-max-1c", "avada-max-2c", "avada-min-5c-max-6c"];

    fn resolve(ctx: &ContextSnapshot) -> Resolution {
        let resolver = TestResolver::theme();
        let resolution = resolver.resolve(ctx).unwrap();
        assert_unique_handles(&resolution);
        assert_dependencies_satisfied(&resolution, resolver.table());
        resolution
    }

    fn assert_contains_all(resolution: &Resolution, handles: &[&str]) {
        for handle in handles {
            assert!(resolution.contains(handle), "missing {handle}: {:?}", resolution.handles());
        }
    }

    fn assert_contains_none(resolution: &Resolution, handles: &[&str]) {
        for handle in handles {
            assert!(!resolution.contains(handle), "unexpected {handle}");
        }
    }

    fn pipeline(registry: Arc<CountingStyleRegistry>) -> AssetPipeline {
        AssetPipeline::new(
            TestResolver::theme(),
            registry,
            Arc::new(FsStylesheetLoader::new()),
        )
    }

    #[test]
    fn test_baseline_with_standard_header() {
        let ctx = ContextFixture::new().build();
        let resolution = resolve(&ctx);

        assert_contains_all(&resolution, BASELINE);
        assert_contains_all(&resolution, STANDARD_HEADER);
        assert_contains_all(&resolution, RESPONSIVE_HEAD);
        assert_contains_none(&resolution, CUSTOM_HEADER);
        assert_contains_none(&resolution, NOT_RESPONSIVE);
        assert_contains_none(&resolution, &["avada-bbpress", "avada-max-640-bbpress"]);

        let scrollspy = resolution.asset("avada-scrollspy").unwrap();
        assert_eq!(scrollspy.dependencies, vec!["avada-header", "bootstrap-scrollspy"]);
        assert!(resolution.position("avada-header") < resolution.position("avada-scrollspy"));

        let registry = Arc::new(CountingStyleRegistry::new(InMemoryStyleRegistry::new()));
        let pipeline = pipeline(Arc::clone(&registry));
        assert!(pipeline.resolver().combined_stylesheets(registry.as_ref()).is_empty());
    }

    #[test]
    fn test_forum_without_responsive_layout() {
        let ctx = ContextFixture::new()
            .with_features(&[Feature::Bbpress])
            .not_responsive()
            .build();
        let resolution = resolve(&ctx);

        assert_contains_all(&resolution, BASELINE);
        assert_contains_all(&resolution, &["avada-bbpress", "avada-css-bbpress"]);
        assert_contains_all(&resolution, NOT_RESPONSIVE);
        assert_contains_none(&resolution, RESPONSIVE_HEAD);
        assert_contains_none(&resolution, &["avada-max-640-bbpress", "avada-max-640"]);
        assert_eq!(resolution.media_styles().count(), 2);

        let media = resolution.asset("avada-max-shbp-not-responsive").unwrap();
        assert_eq!(media.media.as_deref(), Some("fusion-max-shbp"));
        assert!(resolution.localization_named("avadaBbpressVars").is_some());
    }

    #[test]
    fn test_header_override_drops_pair_and_payloads() {
        let ctx = ContextFixture::new().header_override().build();
        let resolution = resolve(&ctx);

        assert_contains_none(&resolution, STANDARD_HEADER);
        assert_contains_all(&resolution, CUSTOM_HEADER);
        assert!(resolution.localization_for("avada-header").is_none());
        assert!(resolution.localization_for("avada-menu").is_none());
        assert!(resolution
            .skipped_localizations
            .iter()
            .any(|name| name == "avadaHeaderVars"));
        assert!(resolution
            .skipped_localizations
            .iter()
            .any(|name| name == "avadaMenuVars"));

        let scrollspy = resolution.asset("avada-scrollspy").unwrap();
        assert_eq!(scrollspy.dependencies, vec!["avada-custom-header", "bootstrap-scrollspy"]);
        assert_contains_none(
            &resolution,
            &["avada-css-header-legacy", "avada-min-shbp-header-legacy"],
        );
    }

    #[test]
    fn test_blank_template_has_no_header_group() {
        let ctx = ContextFixture::new()
            .build()
            .with_page(PageContext::singular("page").with_template(PageTemplate::Blank));
        let resolution = resolve(&ctx);

        assert_contains_none(&resolution, STANDARD_HEADER);
        assert_contains_none(&resolution, CUSTOM_HEADER);
        let scrollspy = resolution.asset("avada-scrollspy").unwrap();
        assert_eq!(scrollspy.dependencies, vec!["bootstrap-scrollspy"]);
    }

    #[test]
    fn test_direction_groups_are_exclusive() {
        let ltr = resolve(&ContextFixture::new().build());
        let rtl = resolve(&ContextFixture::new().rtl().build());

        assert!(ltr.contains("avada-css-dynamic-ltr"));
        assert!(!ltr.contains("avada-css-dynamic-rtl"));
        assert!(rtl.contains("avada-css-dynamic-rtl"));
        assert!(!rtl.contains("avada-css-dynamic-ltr"));
    }

    #[test]
    fn test_builder_groups_are_exclusive() {
        let no_builder = resolve(&ContextFixture::new().build());
        let builder = resolve(&ContextFixture::new().with_features(&[Feature::FusionBuilder]).build());

        let no_builder_set = &[
            "avada-css-no-builder-shortcodes",
            "avada-css-no-builder-icomoon",
            "avada-css-no-builder-no-fb",
        ];
        assert_exactly_one_side(&no_builder, no_builder_set, &["avada-css-dynamic-fb"]);
        assert!(no_builder.contains("avada-css-no-builder-no-fb"));
        assert!(builder.contains("avada-css-dynamic-fb"));
        assert_contains_none(&builder, no_builder_set);

        assert!(no_builder.contains("awb-carousel"));
        assert!(!builder.contains("awb-carousel"));
        assert!(builder.contains("avada-live-search"));
    }

    #[test]
    fn test_icomoon_follows_host_filter() {
        const ICOMOON: &str = "avada-css-no-builder-icomoon";

        let loaded = resolve(&ContextFixture::new().build());
        assert!(loaded.contains(ICOMOON));

        let filtered = resolve(&ContextFixture::new().build().with_icomoon(false));
        assert!(!filtered.contains(ICOMOON));
        assert!(filtered.contains("avada-css-no-builder-shortcodes"));
        assert!(filtered.contains("avada-css-no-builder-no-fb"));

        let builder = resolve(&ContextFixture::new().with_features(&[Feature::FusionBuilder]).build());
        assert!(!builder.contains(ICOMOON));
    }

    #[test]
    fn test_library_blog_script_keeps_source_on_archives() {
        let resolution = resolve(&ContextFixture::new().build());
        let blog = resolution.asset("fusion-blog").unwrap();
        assert!(blog.url().is_some_and(|url| url.contains("/includes/lib/")));
    }

    #[test]
    fn test_stylesheet_modes() {
        let file = resolve(&ContextFixture::new().build());
        assert!(file.contains("avada-css-style"));
        assert!(!file.contains("avada-stylesheet"));

        let inline = resolve(&ContextFixture::new().compiler(CompilerMode::Inline).rtl().build());
        assert!(!inline.contains("avada-css-style"));
        assert!(inline.contains("avada-stylesheet"));
        assert!(inline.contains("avada-rtl-header-legacy"));
    }

    #[test]
    fn test_missing_options_use_defaults() {
        let ctx = ContextSnapshot::new()
            .with_option("header_position", "left")
            .with_option("side_header_break_point", "garbage");
        let resolution = resolve(&ctx);

        let vars = resolution.localization_named("avadaSideHeaderVars").unwrap();
        assert_eq!(vars.get("side_header_break_point"), Some(&serde_json::json!(800)));
        assert_eq!(
            resolution.localization_named("avadaHeaderVars").unwrap().get("header_position"),
            Some(&serde_json::json!("left"))
        );
    }

    #[test]
    fn test_enqueue_registers_before_localizing() {
        let sink = Arc::new(CollectingSink::new());
        let registry = Arc::new(CountingStyleRegistry::new(InMemoryStyleRegistry::new()));
        let pipeline = pipeline(registry)
            .with_registration_sink(sink.clone())
            .with_localization_sink(sink.clone());

        let resolution = pipeline.enqueue(&ContextFixture::new().build()).unwrap();
        let calls = sink.calls();
        let first_localize = calls
            .iter()
            .position(|c| matches!(c, SinkCall::Localize(_)))
            .unwrap();

        assert_eq!(first_localize, resolution.assets.len());
        assert!(calls[first_localize..]
            .iter()
            .all(|c| matches!(c, SinkCall::Localize(_))));
        assert_eq!(
            sink.registered_handles(),
            resolution.handles().iter().map(|h| (*h).to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_combination_scans_registry_once() {
        let registry = Arc::new(CountingStyleRegistry::new(
            InMemoryStyleRegistry::new()
                .with("bbp-default", RegisteredStyle::new("/wp-content/plugins/bbpress/bbpress.css"))
                .with("theme", RegisteredStyle::new("/wp-content/themes/child/style.css")),
        ));
        let pipeline = pipeline(Arc::clone(&registry));
        let ctx = ContextFixture::new()
            .with_option("css_combine_third_party_assets", true)
            .with_option("defer_jquery", true)
            .build();

        let first = pipeline.resolver().combined_stylesheets(registry.as_ref());
        let second = pipeline.resolver().combined_stylesheets(registry.as_ref());
        let plan = pipeline.dequeue_plan(&ctx);
        let _ = pipeline.combine_stylesheets("", &ContextFixture::new().build());

        assert_eq!(first, second);
        assert_eq!(registry.scan_count(), 1);
        assert_eq!(plan.deregister_styles, vec!["bbp-default"]);
        assert_eq!(plan.footer_scripts, vec!["jquery", "jquery-core", "jquery-migrate"]);
    }

    #[test]
    fn test_combined_styles_are_prepended() {
        let dir = tempfile::tempdir().unwrap();
        let css_dir = dir.path().join("plugins/contact-form-7");
        std::fs::create_dir_all(&css_dir).unwrap();
        std::fs::write(css_dir.join("styles.css"), ".wpcf7{}").unwrap();

        let registry = InMemoryStyleRegistry::new().with(
            "contact-form-7",
            RegisteredStyle::new("https://x.test/wp-content/plugins/contact-form-7/styles.css"),
        );
        let loader = FsStylesheetLoader::new().with_base("https://x.test/wp-content", dir.path());
        let pipeline = AssetPipeline::new(
            AssetResolver::new(Default::default()).unwrap(),
            Arc::new(registry),
            Arc::new(loader),
        );
        let ctx = ContextFixture::new()
            .with_option("css_combine_third_party_assets", true)
            .build();

        assert_eq!(pipeline.combine_stylesheets("body{}", &ctx), ".wpcf7{}body{}");
    }

    fn arb_snapshot() -> impl Strategy<Value = ContextSnapshot> {
        let flags = (
            prop::collection::vec(any::<bool>(), Feature::ALL.len()),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            0..3u8,
            0..3u8,
        );
        let page = (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
        );
        let options = (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            prop::sample::select(vec!["top", "left", "right"]),
        );

        (flags, page, options).prop_map(
            |(
                (features, header_override, rtl, builder, privacy, compiler, template),
                (singular, hide_header, threaded, comments_open, languages, icomoon),
                (responsive, live_search, eslider, dropdowns, header_position),
            )| {
                let mut page = if singular {
                    PageContext::singular("post")
                } else {
                    PageContext::archive()
                };
                page.hide_header = hide_header;
                page.comments_open = comments_open;
                page.template = match template {
                    0 => None,
                    1 => Some(PageTemplate::Blank),
                    _ => Some(PageTemplate::SideNavigation),
                };

                let mut ctx = ContextSnapshot::new()
                    .with_page(page)
                    .with_rtl(rtl)
                    .with_thread_comments(threaded)
                    .with_builder(BuilderMode {
                        preview_frame: false,
                        builder_frame: builder,
                    })
                    .with_compiler_mode(match compiler {
                        0 => CompilerMode::File,
                        1 => CompilerMode::Inline,
                        _ => CompilerMode::Off,
                    })
                    .with_privacy(PrivacySettings {
                        embeds: privacy,
                        ..PrivacySettings::default()
                    })
                    .with_option("responsive", responsive)
                    .with_option("live_search", live_search)
                    .with_option("status_eslider", eslider)
                    .with_option("avada_styles_dropdowns", dropdowns)
                    .with_option("header_position", header_position)
                    .with_icomoon(icomoon);

                for (feature, on) in Feature::ALL.iter().zip(features) {
                    if on {
                        ctx = ctx.with_feature(*feature);
                    }
                }
                if header_override {
                    ctx = ctx.with_override(LayoutRegion::Header);
                }
                if languages {
                    ctx = ctx.with_languages(vec!["en".into(), "de".into()], Some("de".into()));
                }
                ctx
            },
        )
    }

    proptest! {
        #[test]
        fn prop_resolution_invariants(ctx in arb_snapshot()) {
            let resolver = TestResolver::theme();
            let resolution = resolver.resolve(&ctx).unwrap();

            assert_unique_handles(&resolution);
            assert_dependencies_satisfied(&resolution, resolver.table());

            for payload in &resolution.localizations {
                prop_assert!(resolution.contains(&payload.handle));
            }
            prop_assert_eq!(
                resolution.localizations.len() + resolution.skipped_localizations.len(),
                resolver.table().bindings().len()
            );
        }

        #[test]
        fn prop_variant_groups_are_exclusive(ctx in arb_snapshot()) {
            let resolution = TestResolver::theme().resolve(&ctx).unwrap();

            if ctx.page.displays_header() {
                assert_exactly_one_side(&resolution, STANDARD_HEADER, CUSTOM_HEADER);
            } else {
                assert_contains_none(&resolution, STANDARD_HEADER);
                assert_contains_none(&resolution, CUSTOM_HEADER);
            }
            assert_exactly_one_side(&resolution, RESPONSIVE_HEAD, NOT_RESPONSIVE);
            assert_exactly_one_side(&resolution, &["avada-css-dynamic-ltr"], &["avada-css-dynamic-rtl"]);
            prop_assert!(resolution.contains("avada-scrollspy"));
        }
    }
}
