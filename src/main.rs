//! CLI entry point for the wallfetch tool.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

use wallfetch::download::{BatchDownloader, DownloadOutcome, WallpaperClient};
use wallfetch::page::fetch_and_download;

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let listing_url = args.month_year.listing_url();
    info!(
        month = args.month_year.month_name(),
        year = args.month_year.year(),
        resolution = %args.resolution,
        "fetching wallpapers"
    );

    let client = WallpaperClient::new();
    let batch = BatchDownloader::new(usize::from(args.concurrency))?;

    // Progress bars share stderr with the log output; draw them only when
    // stderr is an interactive terminal and the run is not quiet.
    let show_progress = !args.quiet && io::stderr().is_terminal();

    let result = fetch_and_download(
        &client,
        &listing_url,
        &args.resolution,
        &batch,
        &args.output_dir,
        show_progress,
    )
    .await?;

    for outcome in result.outcomes() {
        if let DownloadOutcome::Failed { reason, name } = outcome {
            warn!(file = %name, reason = %reason, "download failed");
        }
    }

    info!(
        completed = result.completed(),
        failed = result.failed(),
        total = result.len(),
        "download complete"
    );

    Ok(())
}
