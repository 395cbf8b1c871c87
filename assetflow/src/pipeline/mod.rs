//! Resolution and the stages the host calls into.
//!
//! This module provides:
//! - The asset resolver
//! - The pipeline orchestrating enqueue, combination and dequeue stages

mod integration_tests;
mod resolver;

pub use resolver::AssetResolver;

use crate::combine::{combine_stylesheets, StyleRegistry, StylesheetLoader};
use crate::context::ContextSnapshot;
use crate::core::Resolution;
use crate::errors::AssetflowError;
use crate::filters::DequeuePlan;
use crate::sink::{LocalizationSink, NoOpSink, RegistrationSink};
use std::sync::Arc;
use tracing::debug;

/// Explicit stages over one request's resolver.
///
/// `enqueue` runs to completion before any sink sees output: every asset is
/// registered, then every payload is localized.
pub struct AssetPipeline {
    resolver: AssetResolver,
    registry: Arc<dyn StyleRegistry>,
    loader: Arc<dyn StylesheetLoader>,
    registration: Arc<dyn RegistrationSink>,
    localization: Arc<dyn LocalizationSink>,
}

impl std::fmt::Debug for AssetPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetPipeline")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

impl AssetPipeline {
    /// Creates a pipeline with no-op sinks.
    #[must_use]
    pub fn new(
        resolver: AssetResolver,
        registry: Arc<dyn StyleRegistry>,
        loader: Arc<dyn StylesheetLoader>,
    ) -> Self {
        Self {
            resolver,
            registry,
            loader,
            registration: Arc::new(NoOpSink),
            localization: Arc::new(NoOpSink),
        }
    }

    /// Sets the registration sink.
    #[must_use]
    pub fn with_registration_sink(mut self, sink: Arc<dyn RegistrationSink>) -> Self {
        self.registration = sink;
        self
    }

    /// Sets the localization sink.
    #[must_use]
    pub fn with_localization_sink(mut self, sink: Arc<dyn LocalizationSink>) -> Self {
        self.localization = sink;
        self
    }

    /// Returns the resolver.
    #[must_use]
    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Resolves the request and feeds the sinks.
    pub fn enqueue(&self, ctx: &ContextSnapshot) -> Result<Resolution, AssetflowError> {
        let resolution = self.resolver.resolve(ctx)?;

        for asset in &resolution.assets {
            self.registration.register(asset);
        }
        for payload in &resolution.localizations {
            self.localization.localize(payload);
        }
        debug!(
            request_id = %resolution.request_id,
            assets = resolution.assets.len(),
            localizations = resolution.localizations.len(),
            "Enqueued"
        );

        Ok(resolution)
    }

    /// Prepends RTL and combined third-party CSS to the compiled styles.
    #[must_use]
    pub fn combine_stylesheets(&self, original: &str, ctx: &ContextSnapshot) -> String {
        let combined = self.resolver.combined_stylesheets(self.registry.as_ref());
        combine_stylesheets(
            original,
            ctx,
            self.resolver.config(),
            &combined,
            self.loader.as_ref(),
        )
    }

    /// Registry changes to apply after combination.
    #[must_use]
    pub fn dequeue_plan(&self, ctx: &ContextSnapshot) -> DequeuePlan {
        let combined = self.resolver.combined_stylesheets(self.registry.as_ref());
        DequeuePlan::build(ctx, &combined, self.registry.as_ref())
    }
}
