mod config;

use std::{sync::Arc, time::Instant};

use comrak::{Arena, format_html, nodes::AstNode, parse_document};
use metrics::{counter, histogram};
use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;
use tracing::debug;

use crate::application::render::types::{RenderError, RenderPipelineConfig, RenderService};

use self::config::{build_options, build_sanitizer};

pub(crate) const METRIC_RENDER_TOTAL: &str = "safemark_render_total";
pub(crate) const METRIC_RENDER_MS: &str = "safemark_render_ms";

/// Comrak conversion followed by Ammonia sanitisation.
pub struct ComrakRenderService {
    options: comrak::Options<'static>,
    sanitizer: ammonia::Builder<'static>,
}

impl ComrakRenderService {
    /// Build a renderer for the given markdown dialect. The sanitizer policy
    /// is not configurable.
    pub fn with_config(config: RenderPipelineConfig) -> Self {
        Self {
            options: build_options(&config),
            sanitizer: build_sanitizer(),
        }
    }

    /// Apply the sanitizer alone to an HTML fragment.
    pub fn sanitize_html(&self, html: &str) -> String {
        sanitize_stage(html, &self.sanitizer)
    }

    /// Render markdown into HTML while skipping the sanitisation stage. This is
    /// intended for diagnostics when refining sanitizer rules.
    pub fn render_unsanitized(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);
        render_html_stage(root, &self.options)
    }
}

static RENDER_SERVICE: Lazy<Arc<ComrakRenderService>> =
    Lazy::new(|| Arc::new(ComrakRenderService::with_config(active_render_config())));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<ComrakRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl Default for ComrakRenderService {
    fn default() -> Self {
        Self::with_config(RenderPipelineConfig::default())
    }
}

impl RenderService for ComrakRenderService {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let started_at = Instant::now();
        let result = self.render_sanitized(markdown);

        let outcome = if result.is_ok() { "ok" } else { "error" };
        counter!(METRIC_RENDER_TOTAL, "outcome" => outcome).increment(1);
        histogram!(METRIC_RENDER_MS).record(started_at.elapsed().as_secs_f64() * 1000.0);

        debug!(
            target = "safemark::render",
            input_bytes = markdown.len(),
            outcome,
            "Rendered markdown"
        );

        result
    }
}

impl ComrakRenderService {
    fn render_sanitized(&self, markdown: &str) -> Result<String, RenderError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let rendered_html = render_html_stage(root, &self.options)?;

        Ok(sanitize_stage(&rendered_html, &self.sanitizer))
    }
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render service already configured")]
    AlreadyConfigured,
}

static RENDER_PIPELINE_CONFIG: OnceCell<RenderPipelineConfig> = OnceCell::new();

/// Set the pipeline configuration used by [`render_service`]. Must be called
/// before the shared instance is first accessed to take effect.
pub fn configure_render_service(config: RenderPipelineConfig) -> Result<(), RenderConfigError> {
    RENDER_PIPELINE_CONFIG
        .set(config)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

fn active_render_config() -> RenderPipelineConfig {
    RENDER_PIPELINE_CONFIG.get().copied().unwrap_or_default()
}

fn render_html_stage<'a>(
    root: &'a AstNode<'a>,
    options: &comrak::Options<'static>,
) -> Result<String, RenderError> {
    let mut html = String::new();
    format_html(root, options, &mut html).map_err(|err| RenderError::markdown(err.to_string()))?;
    Ok(html)
}

fn sanitize_stage(html: &str, sanitizer: &ammonia::Builder<'static>) -> String {
    sanitizer.clean(html).to_string()
}
