use thiserror::Error;

/// Markdown dialect switches applied when the converter is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPipelineConfig {
    /// Enable the GitHub flavoured extensions: tables, strikethrough,
    /// autolinks and task lists.
    pub gfm: bool,
    /// Render soft line breaks as `<br>`.
    pub hard_breaks: bool,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            hard_breaks: false,
        }
    }
}

/// Rendering failed. Neither stage offers a recovery path; the variants only
/// record where the failure was observed.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("markdown conversion failed: {message}")]
    Markdown { message: String },
    #[error("render task aborted: {message}")]
    Aborted { message: String },
}

impl RenderError {
    pub fn markdown(message: impl Into<String>) -> Self {
        Self::Markdown {
            message: message.into(),
        }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self::Aborted {
            message: message.into(),
        }
    }
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic: given the same input, they return identical outputs or errors.
pub trait RenderService: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}
