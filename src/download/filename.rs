//! Destination filename derivation from wallpaper URLs.

use url::Url;

/// Derives the destination filename from the URL's final path segment.
///
/// Percent-escapes are decoded and path separators stripped so the name can
/// be joined onto the output directory safely. Returns `None` when the URL
/// is unparsable or has no usable final segment (e.g. a trailing slash).
#[must_use]
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(last)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| last.to_string());
    let cleaned: String = decoded
        .chars()
        .filter(|c| !matches!(c, '/' | '\\') && !c.is_control())
        .collect();
    let cleaned = cleaned.trim().to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Name used in logs and outcomes: the derived filename, or the URL itself
/// when no filename can be derived.
pub(crate) fn display_name(url: &str) -> String {
    filename_from_url(url).unwrap_or_else(|| url.to_string())
}
