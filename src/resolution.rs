//! Resolution token parsing and normalization.
//!
//! A resolution token is the exact-match key used to select wallpaper links
//! on the listing page. It is always lower-cased on construction so that
//! `1920X1080` and `1920x1080` select the same links.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Error returned when a resolution string is not in `WIDTHxHEIGHT` form.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The input does not match the `WIDTHxHEIGHT` pattern.
    #[error("resolution must be in 1024x768 format, got {input:?}")]
    Format {
        /// The rejected input.
        input: String,
    },
}

/// Normalized `WIDTHxHEIGHT` string, e.g. `1920x1080`.
///
/// Matches against link label text exactly as it appears in the page markup;
/// the listing site prints resolutions lower-cased, so the token is
/// lower-cased here rather than case-folding the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionToken(String);

#[allow(clippy::expect_used)]
fn resolution_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{3,5}[xX]\d{3,4}$").expect("static resolution pattern is valid")
    })
}

impl ResolutionToken {
    /// Parses and normalizes a resolution string.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Format`] when the input is not
    /// digits-x-digits (width 3-5 digits, height 3-4 digits).
    pub fn parse(input: &str) -> Result<Self, ResolutionError> {
        let trimmed = input.trim();
        if !resolution_pattern().is_match(trimmed) {
            return Err(ResolutionError::Format {
                input: input.to_string(),
            });
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Returns the normalized token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolutionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
