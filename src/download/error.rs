//! Error types and the per-file fault taxonomy for the download module.
//!
//! Every fault during an individual file transfer maps to one of four
//! reason codes; no fault is allowed to unwind past the fetcher.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Reason code attached to a failed download outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Local storage write failure (disk full, permission denied).
    Io,
    /// Connection establishment failure.
    Connect,
    /// Per-request timeout exceeded.
    Timeout,
    /// Any other fault during the transfer (bad status, stream error).
    Unexpected,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::Io => "io-error",
            Self::Connect => "connect-error",
            Self::Timeout => "timeout",
            Self::Unexpected => "unexpected-error",
        };
        f.write_str(code)
    }
}

/// Errors that can occur while downloading a single wallpaper.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// File system error while writing the image (create file, write, flush).
    #[error("error writing image file {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Connection-level error (DNS resolution, connection refused, TLS).
    #[error("connection error downloading {url}: {source}")]
    Connect {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before the transfer completed.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Any other fault during the transfer.
    #[error("unexpected error downloading {url}: {message}")]
    Unexpected {
        /// The URL being downloaded.
        url: String,
        /// Description of the fault.
        message: String,
    },
}

impl DownloadError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a connection error from a reqwest error.
    pub fn connect(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Connect {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an unexpected-fault error.
    pub fn unexpected(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unexpected {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Maps this error to its outcome reason code.
    #[must_use]
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::Io { .. } => FailureReason::Io,
            Self::Connect { .. } => FailureReason::Connect,
            Self::Timeout { .. } => FailureReason::Timeout,
            Self::Unexpected { .. } => FailureReason::Unexpected,
        }
    }
}

/// Maps a reqwest transfer error to the fault taxonomy.
///
/// Timeout is checked first: connect timeouts carry both flags and the
/// timeout classification is the more actionable one.
pub(crate) fn classify_transfer_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url)
    } else if error.is_connect() {
        DownloadError::connect(url, error)
    } else {
        DownloadError::unexpected(url, error.to_string())
    }
}

// Note on From trait implementations: no blanket `From<reqwest::Error>` or
// `From<std::io::Error>` — the variants require context (url, path) that the
// source errors do not carry. The helper constructors are the seam.
