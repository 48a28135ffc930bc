//! Wallpaper link extraction from the monthly listing page.
//!
//! Resolution labels on the listing page are not uniquely addressable by CSS
//! class or tag, so extraction anchors on the fixed section-label text
//! (`with calendar:` / `without calendar:`) and matches the resolution text
//! within the label's enclosing element. The heuristic is isolated behind
//! [`extract_wallpaper_links`] so the matching strategy can be swapped
//! without touching callers.

use std::collections::HashSet;

use scraper::{Html, Selector};

use crate::resolution::ResolutionToken;

/// Section labels that precede each wallpaper's download links.
pub const SECTION_LABELS: [&str; 2] = ["with calendar:", "without calendar:"];

/// Extracts the image URLs advertised at `resolution`.
///
/// A hyperlink qualifies when its own text equals the resolution token
/// exactly and a section label is a direct child text node of one of the
/// hyperlink's enclosing elements. Duplicate URLs are dropped; order follows
/// the document. An empty result means no link matched the resolution — the
/// caller decides how to surface that.
#[must_use]
#[allow(clippy::expect_used)]
pub fn extract_wallpaper_links(html: &str, resolution: &ResolutionToken) -> Vec<String> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").expect("static anchor selector is valid");

    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for anchor in document.select(&anchor_selector) {
        let matches_resolution = anchor
            .text()
            .any(|text| text.trim() == resolution.as_str());
        if !matches_resolution {
            continue;
        }

        // The anchor qualifies only when one of its enclosing elements carries
        // a section label as a direct child text node (the label's siblings).
        let labeled = anchor.ancestors().any(|ancestor| {
            ancestor.children().any(|child| {
                child
                    .value()
                    .as_text()
                    .is_some_and(|text| is_section_label(text))
            })
        });
        if !labeled {
            continue;
        }

        if let Some(href) = anchor.value().attr("href") {
            if seen.insert(href.to_string()) {
                urls.push(href.to_string());
            }
        }
    }

    urls
}

fn is_section_label(text: &str) -> bool {
    let trimmed = text.trim();
    SECTION_LABELS.iter().any(|label| trimmed == *label)
}
