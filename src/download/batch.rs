//! Concurrent batch execution over matched wallpaper URLs.
//!
//! The batch downloader schedules one task per URL with a hard ceiling on
//! simultaneous in-flight transfers, waits for every task to reach a
//! terminal state, and returns one typed outcome per submitted URL. A slow
//! or failing download never blocks or cancels its siblings.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::client::WallpaperClient;
use super::error::FailureReason;
use super::filename::display_name;
use crate::progress::ProgressReporter;

/// Minimum allowed in-flight limit.
const MIN_IN_FLIGHT: usize = 1;

/// Maximum allowed in-flight limit.
const MAX_IN_FLIGHT: usize = 100;

/// Default maximum number of simultaneous downloads.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Error type for batch downloader construction.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Invalid in-flight limit provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_IN_FLIGHT} and {MAX_IN_FLIGHT}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Terminal result of one download task.
///
/// Created when a task completes or faults; never retried or mutated
/// afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was downloaded and written in full.
    Success {
        /// Destination filename.
        filename: String,
    },
    /// The download faulted; the fault was isolated to this task.
    Failed {
        /// Reason code for the fault.
        reason: FailureReason,
        /// Destination filename, or the URL when none could be derived.
        name: String,
    },
}

impl DownloadOutcome {
    /// Returns true for a `Success` outcome.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The filename (or URL fallback) this outcome refers to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Success { filename } => filename,
            Self::Failed { name, .. } => name,
        }
    }
}

/// Outcomes of one batch run: exactly one per submitted URL, in submission
/// order. Tasks are never silently dropped — a failure still yields a
/// `Failed` entry.
#[derive(Debug, Default)]
pub struct BatchResult {
    outcomes: Vec<DownloadOutcome>,
}

impl BatchResult {
    /// Number of outcomes; always equals the submitted URL count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true when no URLs were submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of successful downloads.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.len() - self.completed()
    }

    /// The outcomes in submission order.
    #[must_use]
    pub fn outcomes(&self) -> &[DownloadOutcome] {
        &self.outcomes
    }

    /// Consumes the result, yielding the outcomes in submission order.
    #[must_use]
    pub fn into_outcomes(self) -> Vec<DownloadOutcome> {
        self.outcomes
    }
}

/// Batch downloader with a hard ceiling on simultaneous transfers.
///
/// # Concurrency Model
///
/// - Each download runs in its own Tokio task
/// - A semaphore permit is acquired before spawning each task
/// - Permits are released automatically when tasks finish (RAII)
/// - The run loop waits for every task before returning
#[derive(Debug)]
pub struct BatchDownloader {
    semaphore: Arc<Semaphore>,
    max_in_flight: usize,
}

impl BatchDownloader {
    /// Creates a batch downloader with the given in-flight limit.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidConcurrency`] when the value is outside
    /// 1–100.
    pub fn new(max_in_flight: usize) -> Result<Self, BatchError> {
        if !(MIN_IN_FLIGHT..=MAX_IN_FLIGHT).contains(&max_in_flight) {
            return Err(BatchError::InvalidConcurrency {
                value: max_in_flight,
            });
        }

        debug!(max_in_flight, "creating batch downloader");

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(max_in_flight)),
            max_in_flight,
        })
    }

    /// Returns the configured in-flight limit.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Downloads every URL into `out_dir` with at most `max_in_flight`
    /// transfers active at any instant.
    ///
    /// Waits for every task to reach a terminal state; one failing or slow
    /// download does not cancel its siblings. Outcomes are returned in
    /// submission order, one per URL — a panicked task is converted to a
    /// `Failed` outcome rather than dropped.
    pub async fn run(
        &self,
        client: &WallpaperClient,
        urls: &[String],
        out_dir: &Path,
        reporter: &ProgressReporter,
    ) -> BatchResult {
        info!(
            tasks = urls.len(),
            max_in_flight = self.max_in_flight,
            "starting wallpaper batch"
        );

        let mut handles = Vec::with_capacity(urls.len());

        for url in urls {
            // Blocks here once the ceiling is reached; the permit is moved
            // into the task and released when it finishes (RAII).
            let Ok(permit) = Arc::clone(&self.semaphore).acquire_owned().await else {
                // The semaphore is never closed; keep the one-outcome-per-URL
                // contract even if it somehow is.
                let reporter = reporter.clone();
                let name = display_name(url);
                handles.push(tokio::spawn(async move {
                    reporter.task_done();
                    DownloadOutcome::Failed {
                        reason: FailureReason::Unexpected,
                        name,
                    }
                }));
                continue;
            };

            let client = client.clone();
            let reporter = reporter.clone();
            let url = url.clone();
            let out_dir = out_dir.to_path_buf();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                client.fetch_wallpaper(&url, &out_dir, &reporter).await
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, url) in handles.into_iter().zip(urls) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(error) => {
                    warn!(url = %url, error = %error, "download task panicked");
                    reporter.task_done();
                    outcomes.push(DownloadOutcome::Failed {
                        reason: FailureReason::Unexpected,
                        name: display_name(url),
                    });
                }
            }
        }

        reporter.finish();

        let result = BatchResult { outcomes };
        info!(
            completed = result.completed(),
            failed = result.failed(),
            total = result.len(),
            "wallpaper batch complete"
        );
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_limits() {
        assert_eq!(BatchDownloader::new(1).unwrap().max_in_flight(), 1);
        assert_eq!(BatchDownloader::new(10).unwrap().max_in_flight(), 10);
        assert_eq!(BatchDownloader::new(100).unwrap().max_in_flight(), 100);
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(
            BatchDownloader::new(0),
            Err(BatchError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_new_rejects_over_max() {
        assert!(matches!(
            BatchDownloader::new(101),
            Err(BatchError::InvalidConcurrency { value: 101 })
        ));
    }

    #[test]
    fn test_default_concurrency_constant() {
        assert_eq!(DEFAULT_CONCURRENCY, 10);
    }

    #[test]
    fn test_batch_error_display() {
        let msg = BatchError::InvalidConcurrency { value: 0 }.to_string();
        assert!(msg.contains("invalid concurrency"));
        assert!(msg.contains('0'));
    }

    #[test]
    fn test_outcome_helpers() {
        let success = DownloadOutcome::Success {
            filename: "a.jpg".to_string(),
        };
        assert!(success.is_success());
        assert_eq!(success.name(), "a.jpg");

        let failed = DownloadOutcome::Failed {
            reason: FailureReason::Timeout,
            name: "b.jpg".to_string(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.name(), "b.jpg");
    }

    #[test]
    fn test_batch_result_counts() {
        let result = BatchResult {
            outcomes: vec![
                DownloadOutcome::Success {
                    filename: "a.jpg".to_string(),
                },
                DownloadOutcome::Failed {
                    reason: FailureReason::Io,
                    name: "b.jpg".to_string(),
                },
                DownloadOutcome::Success {
                    filename: "c.jpg".to_string(),
                },
            ],
        };

        assert_eq!(result.len(), 3);
        assert_eq!(result.completed(), 2);
        assert_eq!(result.failed(), 1);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_batch_result_empty() {
        let result = BatchResult::default();
        assert!(result.is_empty());
        assert_eq!(result.completed(), 0);
        assert_eq!(result.failed(), 0);
    }

    #[tokio::test]
    async fn test_run_with_no_urls_returns_empty_result() {
        let batch = BatchDownloader::new(10).unwrap();
        let client = WallpaperClient::new();
        let reporter = ProgressReporter::hidden(0);
        let temp_dir = tempfile::TempDir::new().unwrap();

        let result = batch.run(&client, &[], temp_dir.path(), &reporter).await;

        assert!(result.is_empty());
    }
}
