use std::{path::PathBuf, process, sync::Arc};

use safemark::{
    application::{
        error::AppError,
        render::{
            ComrakRenderService, RenderError, RenderPipelineConfig, RenderService,
            configure_render_service, render_batch, render_service, sanitize_html,
        },
    },
    config::{self, RenderArgs, SanitizeArgs},
    infra::{error::InfraError, telemetry},
};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

const STDIN_SOURCE: &str = "-";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Render(RenderArgs::default()));

    telemetry::init(&settings.logging)?;
    configure_render_service(RenderPipelineConfig::from(&settings.render))
        .map_err(|err| InfraError::configuration(err.to_string()))?;

    match command {
        config::Command::Render(args) => run_render(args).await,
        config::Command::Sanitize(args) => run_sanitize(args).await,
    }
}

/// Conversion-only renderer behind the `--no-sanitize` diagnostic flag.
struct UnsanitizedRender(Arc<ComrakRenderService>);

impl RenderService for UnsanitizedRender {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        self.0.render_unsanitized(markdown)
    }
}

#[derive(Debug, Serialize)]
struct RenderedDocument {
    source: String,
    html: String,
}

async fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let sources = collect_sources(&args.files).await?;
    info!(
        target = "safemark::render",
        documents = sources.len(),
        concurrency = args.concurrency,
        sanitize = !args.no_sanitize,
        "Starting render"
    );

    let (labels, documents): (Vec<String>, Vec<String>) = sources.into_iter().unzip();

    let rendered = if args.no_sanitize {
        let service = Arc::new(UnsanitizedRender(render_service()));
        render_batch(service, documents, args.concurrency).await?
    } else {
        render_batch(render_service(), documents, args.concurrency).await?
    };

    let count = rendered.len();
    let output = if args.json {
        let documents = labels
            .into_iter()
            .zip(rendered)
            .map(|(source, html)| RenderedDocument { source, html })
            .collect::<Vec<_>>();
        let mut json = serde_json::to_string_pretty(&documents)
            .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?;
        json.push('\n');
        json
    } else {
        rendered.concat()
    };

    write_stdout(&output).await?;

    info!(
        target = "safemark::render",
        documents = count,
        "Render completed"
    );
    Ok(())
}

async fn run_sanitize(args: SanitizeArgs) -> Result<(), AppError> {
    let (source, html) = match args.file {
        Some(path) => {
            let html = tokio::fs::read_to_string(&path).await?;
            (path.display().to_string(), html)
        }
        None => (STDIN_SOURCE.to_string(), read_stdin().await?),
    };

    let sanitized = sanitize_html(&html);
    write_stdout(&sanitized).await?;

    info!(
        target = "safemark::sanitize",
        source = %source,
        input_bytes = html.len(),
        output_bytes = sanitized.len(),
        "Sanitize completed"
    );
    Ok(())
}

async fn collect_sources(files: &[PathBuf]) -> Result<Vec<(String, String)>, AppError> {
    if files.is_empty() {
        return Ok(vec![(STDIN_SOURCE.to_string(), read_stdin().await?)]);
    }

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let markdown = tokio::fs::read_to_string(path).await.map_err(|err| {
            AppError::validation(format!("cannot read `{}`: {err}", path.display()))
        })?;
        sources.push((path.display().to_string(), markdown));
    }
    Ok(sources)
}

async fn read_stdin() -> Result<String, AppError> {
    let mut buffer = String::new();
    tokio::io::stdin().read_to_string(&mut buffer).await?;
    Ok(buffer)
}

async fn write_stdout(output: &str) -> Result<(), AppError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
