//! End-to-end run orchestration: fetch the listing page, extract matching
//! wallpaper links, and hand them to the batch downloader.
//!
//! Page-level faults are fatal to the run and surface as [`RunError`]; once
//! link extraction succeeds, per-file faults are isolated inside the batch
//! and reported through its outcomes instead.

use std::path::Path;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};

use crate::download::{BatchDownloader, BatchResult, WallpaperClient};
use crate::extract::extract_wallpaper_links;
use crate::progress::ProgressReporter;
use crate::resolution::ResolutionToken;

/// Errors that abort a run before any download starts.
#[derive(Debug, Error)]
pub enum RunError {
    /// The listing page does not exist (HTTP 404), usually because no
    /// wallpaper post was published for the requested month.
    #[error("no wallpaper page found at {url}")]
    PageNotFound {
        /// The listing page URL.
        url: String,
    },

    /// The listing page responded with an unexpected status.
    #[error("unexpected status {status} fetching {url}")]
    PageStatus {
        /// The listing page URL.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// The listing page request timed out.
    #[error("timeout fetching wallpaper page {url}")]
    PageTimeout {
        /// The listing page URL.
        url: String,
    },

    /// Transport-level failure fetching the listing page.
    #[error("error fetching wallpaper page {url}: {source}")]
    PageFetch {
        /// The listing page URL.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The page was fetched and parsed but no link matched the resolution.
    #[error("no wallpapers found for resolution {resolution}")]
    NoMatches {
        /// The resolution that produced no matches.
        resolution: String,
    },
}

impl RunError {
    fn page_not_found(url: impl Into<String>) -> Self {
        Self::PageNotFound { url: url.into() }
    }

    fn page_status(url: impl Into<String>, status: StatusCode) -> Self {
        Self::PageStatus {
            url: url.into(),
            status: status.as_u16(),
        }
    }

    fn no_matches(resolution: &ResolutionToken) -> Self {
        Self::NoMatches {
            resolution: resolution.as_str().to_string(),
        }
    }
}

fn classify_page_error(url: &str, error: reqwest::Error) -> RunError {
    if error.is_timeout() {
        RunError::PageTimeout {
            url: url.to_string(),
        }
    } else {
        RunError::PageFetch {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Fetches the listing page, extracts the links matching `resolution`, and
/// downloads them all into `out_dir`.
///
/// Returns one outcome per matched link, in the order the links appeared on
/// the page. A missing page, a non-200 status, a page-fetch fault, and an
/// empty extraction each abort the run with a distinct [`RunError`] variant
/// before any download starts.
///
/// # Errors
///
/// See [`RunError`] for the page-level failure modes.
pub async fn fetch_and_download(
    client: &WallpaperClient,
    listing_url: &str,
    resolution: &ResolutionToken,
    batch: &BatchDownloader,
    out_dir: &Path,
    show_progress: bool,
) -> Result<BatchResult, RunError> {
    info!(url = %listing_url, "fetching wallpaper page");

    let response = client
        .inner()
        .get(listing_url)
        .send()
        .await
        .map_err(|e| classify_page_error(listing_url, e))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(RunError::page_not_found(listing_url));
    }
    if status != StatusCode::OK {
        return Err(RunError::page_status(listing_url, status));
    }

    let html = response
        .text()
        .await
        .map_err(|e| classify_page_error(listing_url, e))?;

    let links = extract_wallpaper_links(&html, resolution);
    if links.is_empty() {
        return Err(RunError::no_matches(resolution));
    }
    debug!(
        matches = links.len(),
        resolution = resolution.as_str(),
        "extracted wallpaper links"
    );

    let reporter = if show_progress {
        ProgressReporter::new(links.len() as u64)
    } else {
        ProgressReporter::hidden(links.len() as u64)
    };

    Ok(batch.run(client, &links, out_dir, &reporter).await)
}
