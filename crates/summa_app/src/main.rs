mod app;
mod config;
mod effects;
mod logging;
mod view;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use summa_core::ModelDescriptor;

use crate::app::AppOptions;
use crate::config::{AppConfig, DEFAULT_CONFIG_FILENAME};
use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "summa",
    about = "Summarize the readable content of a web page with an LLM"
)]
struct Cli {
    /// Page to summarize.
    url: String,
    /// Model override as `PROVIDER:model-id` (e.g. `OPENAI:gpt-4o-mini`).
    #[arg(long)]
    model: Option<String>,
    /// Path to the RON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print rendered HTML instead of the raw summary markdown.
    #[arg(long)]
    html: bool,
    /// Also write logs to ./summa.log.
    #[arg(long)]
    log_file: bool,
    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, cli.verbose);

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));
    let config = AppConfig::load(&config_path);

    let model_override = match cli.model.as_deref() {
        Some(raw) => Some(parse_model_arg(raw)?),
        None => None,
    };

    app::run(
        AppOptions {
            url: cli.url,
            model_override,
            config_path,
            emit_html: cli.html,
        },
        config,
    )
}

/// Parses `PROVIDER:model-id`; the model id doubles as the display name until
/// reconciliation swaps in the configured entry.
fn parse_model_arg(raw: &str) -> Result<ModelDescriptor> {
    let Some((provider, model)) = raw.split_once(':') else {
        bail!("--model expects PROVIDER:model-id, got {raw:?}");
    };
    if provider.is_empty() || model.is_empty() {
        bail!("--model expects PROVIDER:model-id, got {raw:?}");
    }
    Ok(ModelDescriptor::new(provider, model, model))
}
