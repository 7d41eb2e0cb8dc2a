use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the safemark binary.
#[derive(Debug, Parser)]
#[command(
    name = "safemark",
    version,
    about = "Render untrusted markdown into sanitized HTML"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "SAFEMARK_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render markdown files (or stdin) into sanitized HTML.
    Render(RenderArgs),
    /// Sanitize an HTML file (or stdin) without markdown conversion.
    Sanitize(SanitizeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Markdown files to render; stdin is read when none are given.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Print converter output without sanitisation (diagnostics only).
    #[arg(long = "no-sanitize", action = clap::ArgAction::SetTrue)]
    pub no_sanitize: bool,

    /// Emit a JSON array of `{ source, html }` objects.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,

    /// Maximum number of documents rendered concurrently.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(usize))]
    pub concurrency: usize,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            overrides: RenderOverrides::default(),
            files: Vec::new(),
            no_sanitize: false,
            json: false,
            concurrency: 4,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct SanitizeArgs {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// HTML file to sanitize; stdin is read when omitted.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Toggle GitHub flavoured markdown extensions.
    #[arg(
        long = "render-gfm",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub gfm: Option<bool>,

    /// Toggle rendering of soft line breaks as `<br>`.
    #[arg(
        long = "render-hard-breaks",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub hard_breaks: Option<bool>,
}
