//! HTTP client wrapper for streaming wallpaper downloads.
//!
//! One [`WallpaperClient`] is created per run and cloned into each download
//! task; clones share the underlying connection pool. Per-file faults never
//! escape [`fetch_wallpaper`](WallpaperClient::fetch_wallpaper) — they are
//! converted into a `Failed` outcome carrying a reason code.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use indicatif::ProgressBar;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

use super::batch::DownloadOutcome;
use super::error::{DownloadError, classify_transfer_error};
use super::filename::display_name;
use crate::progress::ProgressReporter;

/// Default connect timeout in seconds.
pub(crate) const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default per-request total timeout in seconds. Applies independently to
/// the listing page fetch and to each file fetch.
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 120;

/// HTTP client for downloading wallpapers with streaming support.
///
/// Designed to be created once and cloned for concurrent downloads, taking
/// advantage of connection pooling. The pool is the only shared network
/// resource in a run; reqwest synchronizes access internally.
#[derive(Debug, Clone)]
pub struct WallpaperClient {
    client: Client,
}

impl Default for WallpaperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WallpaperClient {
    /// Creates a client with the default timeouts (30 s connect, 120 s per
    /// request) and gzip decompression enabled.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied timeout
    /// configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(connect_timeout_secs: u64, request_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout_secs))
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Downloads one wallpaper into `out_dir`, converting every fault into a
    /// `Failed` outcome — this method never returns an error.
    ///
    /// The destination filename is the URL's final path segment; an existing
    /// file of the same name is overwritten. A partially written file may
    /// remain on disk after a failure; no cleanup is performed, so callers
    /// must treat partial files as untrustworthy.
    ///
    /// Advances the shared reporter exactly once, on success or failure.
    pub async fn fetch_wallpaper(
        &self,
        url: &str,
        out_dir: &Path,
        reporter: &ProgressReporter,
    ) -> DownloadOutcome {
        let name = display_name(url);
        match self.fetch_inner(url, &name, out_dir, reporter).await {
            Ok(bytes) => {
                debug!(file = %name, bytes, "wallpaper downloaded");
                reporter.task_done();
                DownloadOutcome::Success { filename: name }
            }
            Err(error) => {
                warn!(
                    file = %name,
                    reason = %error.reason(),
                    error = %error,
                    "wallpaper download failed"
                );
                reporter.task_done();
                DownloadOutcome::Failed {
                    reason: error.reason(),
                    name,
                }
            }
        }
    }

    async fn fetch_inner(
        &self,
        url: &str,
        name: &str,
        out_dir: &Path,
        reporter: &ProgressReporter,
    ) -> Result<u64, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_transfer_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::unexpected(
                url,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        // Content-Length sizes the per-file bar; absent means indeterminate.
        let total_bytes = response.content_length();
        let path = out_dir.join(name);
        let file = File::create(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;

        let bar = reporter.file_bar(name, total_bytes);
        let result = stream_to_file(file, response, url, &path, &bar).await;
        reporter.clear_file_bar(&bar);
        result
    }
}

/// Streams the response body to the file, returning bytes written.
///
/// Writing chunk-by-chunk bounds memory use regardless of file size.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
    bar: &ProgressBar,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| classify_transfer_error(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

        bar.inc(chunk.len() as u64);
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

    Ok(bytes_written)
}
