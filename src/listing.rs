//! Listing page extraction.
//!
//! A listing page renders announcements as `<li>` entries inside the
//! `#wp_news_w8` container: an `<a>` carrying title and href, and a sibling
//! `<span>` carrying the publish date as plain text. The page shows newest
//! first; extraction preserves document order and never sorts or dedups.
use scraper::{Html, Selector};
use thiserror::Error;

/// Maximum number of entries taken from one listing page.
pub const MAX_ENTRIES: usize = 10;

const CONTAINER_SELECTOR: &str = "#wp_news_w8 ul li";

/// One announcement entry as extracted from the listing page.
///
/// `link` is the href exactly as the page emitted it, usually relative;
/// resolution against the base host happens downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    pub link: String,
    pub date_text: String,
}

#[derive(Debug, Error)]
pub enum ListingError {
    /// A selector failed to parse. Selectors are fixed strings, so this
    /// indicates a programming error rather than bad input.
    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Extract up to [`MAX_ENTRIES`] announcement entries from listing HTML.
///
/// Entries without an `<a href>` are skipped. A page where the container
/// matches nothing (site markup changed, empty section) yields an empty
/// list, not an error; callers see a shorter or empty feed.
pub fn extract_entries(html: &str) -> Result<Vec<ListingEntry>, ListingError> {
    let document = Html::parse_document(html);
    let li_selector = Selector::parse(CONTAINER_SELECTOR)
        .map_err(|e| ListingError::Selector(e.to_string()))?;
    let a_selector = Selector::parse("a").map_err(|e| ListingError::Selector(e.to_string()))?;
    let span_selector =
        Selector::parse("span").map_err(|e| ListingError::Selector(e.to_string()))?;

    let mut entries = Vec::new();

    for li in document.select(&li_selector) {
        if entries.len() >= MAX_ENTRIES {
            break;
        }

        let Some(a) = li.select(&a_selector).next() else {
            continue;
        };
        let Some(href) = a.value().attr("href") else {
            continue;
        };

        let title = a.text().collect::<String>().trim().to_string();
        let date_text = li
            .select(&span_selector)
            .next()
            .map(|span| span.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        entries.push(ListingEntry {
            title,
            link: href.to_string(),
            date_text,
        });
    }

    tracing::debug!(count = entries.len(), "extracted listing entries");
    Ok(entries)
}
