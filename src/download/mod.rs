//! Wallpaper download engine: streaming single-file fetches and bounded
//! concurrent batch runs.
//!
//! [`WallpaperClient`] performs one streaming download at a time and never
//! returns an error from a file fetch; [`BatchDownloader`] fans the client
//! out across URLs under a semaphore ceiling and collects one
//! [`DownloadOutcome`] per URL.

mod batch;
mod client;
mod error;
mod filename;

pub use batch::{BatchDownloader, BatchError, BatchResult, DEFAULT_CONCURRENCY, DownloadOutcome};
pub use client::WallpaperClient;
pub use error::{DownloadError, FailureReason};
pub use filename::filename_from_url;
