//! Markdown to sanitized HTML rendering.
//!
//! Markdown is converted with comrak and the resulting HTML is passed through
//! ammonia before it is handed back. Conversion always happens first so that
//! raw HTML embedded in the source is filtered along with everything else.

pub mod application;
pub mod config;
pub mod infra;
