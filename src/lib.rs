//! Batch downloader for Smashing Magazine's monthly desktop wallpaper
//! calendars.
//!
//! Given a month and a screen resolution, the crate derives the listing page
//! URL for that month's wallpaper post, extracts every download link offered
//! at that resolution, and downloads them concurrently with streaming writes
//! and per-file fault isolation.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use wallfetch::calendar::MonthYear;
//! use wallfetch::download::{BatchDownloader, WallpaperClient};
//! use wallfetch::page::fetch_and_download;
//! use wallfetch::resolution::ResolutionToken;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let month = MonthYear::parse("102024")?;
//! let resolution = ResolutionToken::parse("1920x1080")?;
//! let client = WallpaperClient::new();
//! let batch = BatchDownloader::new(10)?;
//!
//! let result = fetch_and_download(
//!     &client,
//!     &month.listing_url(),
//!     &resolution,
//!     &batch,
//!     Path::new("."),
//!     false,
//! )
//! .await?;
//!
//! println!("{} downloaded, {} failed", result.completed(), result.failed());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calendar;
pub mod download;
pub mod extract;
pub mod page;
pub mod progress;
pub mod resolution;

pub use calendar::{CalendarError, MonthYear};
pub use download::{
    BatchDownloader, BatchError, BatchResult, DEFAULT_CONCURRENCY, DownloadError, DownloadOutcome,
    FailureReason, WallpaperClient,
};
pub use extract::extract_wallpaper_links;
pub use page::{RunError, fetch_and_download};
pub use progress::ProgressReporter;
pub use resolution::{ResolutionError, ResolutionToken};
