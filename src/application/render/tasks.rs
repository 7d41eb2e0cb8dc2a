use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use metrics::counter;
use tracing::warn;

use super::service::render_service;
use super::types::{RenderError, RenderService};

pub(crate) const METRIC_RENDER_ABORTED_TOTAL: &str = "safemark_render_aborted_total";

const MAX_BATCH_CONCURRENCY: usize = 32;

/// Render markdown into sanitized HTML on the shared render service.
///
/// Conversion runs on the blocking pool, so the caller has to await the
/// result. Independent calls may be issued concurrently.
pub async fn render_markdown(markdown: impl Into<String>) -> Result<String, RenderError> {
    render_markdown_with(render_service(), markdown).await
}

/// Render markdown on an explicit service instance.
pub async fn render_markdown_with<S>(
    service: Arc<S>,
    markdown: impl Into<String>,
) -> Result<String, RenderError>
where
    S: RenderService + ?Sized + 'static,
{
    let markdown = markdown.into();

    tokio::task::spawn_blocking(move || service.render(&markdown))
        .await
        .map_err(|err| {
            counter!(METRIC_RENDER_ABORTED_TOTAL).increment(1);
            warn!(
                target = "safemark::render",
                error = %err,
                "Render task did not complete"
            );
            RenderError::aborted(err.to_string())
        })?
}

/// Render several documents with at most `concurrency` in flight.
///
/// Outputs keep the order of `documents`. The first failure wins.
pub async fn render_batch<S>(
    service: Arc<S>,
    documents: Vec<String>,
    concurrency: usize,
) -> Result<Vec<String>, RenderError>
where
    S: RenderService + ?Sized + 'static,
{
    let concurrency = concurrency.clamp(1, MAX_BATCH_CONCURRENCY);

    stream::iter(documents)
        .map(|markdown| render_markdown_with(Arc::clone(&service), markdown))
        .buffered(concurrency)
        .try_collect()
        .await
}
