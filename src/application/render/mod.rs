//! Markdown rendering pipeline.
//!
//! The pipeline is pure: it accepts markdown input, converts it to HTML and
//! sanitizes the result, in that order. Sanitizing the markdown source instead
//! would let HTML produced by the conversion step through unchecked.

mod service;
mod tasks;
mod types;

pub(crate) use service::{METRIC_RENDER_MS, METRIC_RENDER_TOTAL};
pub use service::{
    ComrakRenderService, RenderConfigError, configure_render_service, render_service,
};
pub(crate) use tasks::METRIC_RENDER_ABORTED_TOTAL;
pub use tasks::{render_batch, render_markdown, render_markdown_with};
pub use types::{RenderError, RenderPipelineConfig, RenderService};

/// Apply the shared service's sanitizer to an HTML fragment.
pub fn sanitize_html(html: &str) -> String {
    render_service().sanitize_html(html)
}
