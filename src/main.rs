//! GStreamer plugins documentation cache generator
//!
//! CLI entry point that dispatches to the hotdoc-config command or the
//! default scan + merge flow.

use clap::Parser;
use console::style;
use gst_doc_cache::cli::{Cli, Commands};
use gst_doc_cache::config::ConfigManager;
use gst_doc_cache::error::DocCacheResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DocCacheResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("gst_doc_cache=warn"),
        1 => EnvFilter::new("gst_doc_cache=info"),
        _ => EnvFilter::new("gst_doc_cache=debug"),
    };

    // stdout carries the generated file list
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // hotdoc-config only needs its own arguments
    if let Some(Commands::HotdocConfig(args)) = cli.command {
        return gst_doc_cache::cli::commands::hotdoc_config(args).await;
    }

    let config_manager = match cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    if let Some(path) = config_manager.path() {
        debug!("Using config {}", path.display());
    }
    let config = config_manager.load().await?;

    gst_doc_cache::cli::commands::scan(cli.scan, &config).await
}
