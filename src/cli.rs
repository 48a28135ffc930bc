//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use wallfetch::calendar::MonthYear;
use wallfetch::download::DEFAULT_CONCURRENCY;
use wallfetch::resolution::ResolutionToken;

/// Download a month of Smashing Magazine desktop wallpapers.
///
/// Fetches the wallpaper calendar post for the given month and downloads
/// every wallpaper offered at the given resolution.
#[derive(Parser, Debug)]
#[command(name = "wallfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Month and year to download, as MMYYYY (e.g. 102024 for October 2024)
    #[arg(value_name = "MMYYYY", value_parser = MonthYear::parse)]
    pub month_year: MonthYear,

    /// Screen resolution to download, as WIDTHxHEIGHT (e.g. 1920x1080)
    #[arg(value_name = "RESOLUTION", value_parser = ResolutionToken::parse)]
    pub resolution: ResolutionToken,

    /// Maximum concurrent downloads (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Directory to save wallpapers into
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress bars and non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
