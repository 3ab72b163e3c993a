//! Detail-page content extraction.
//!
//! When full descriptions are requested, each announcement's detail page is
//! fetched and the markup of its `.wp_articlecontent` container becomes the
//! item description, followed by a separator and a link back to the original
//! page. Only `.htm`/`.html` targets are article pages; anything else
//! (attachments like `.pdf` or `.doc`) yields no content.
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

const ARTICLE_SELECTOR: &str = ".wp_articlecontent";

#[derive(Debug, Error)]
pub enum ContentError {
    /// A selector failed to parse; fixed strings, so effectively unreachable.
    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Whether a detail URL points at an article page worth fetching.
///
/// The decision is by file extension of the URL path: `htm` and `html` are
/// article pages, everything else (including extension-less paths) is not.
pub fn is_article_page(url: &Url) -> bool {
    matches!(url.path().rsplit('.').next(), Some("htm" | "html"))
}

/// The `查看原文` link-back markup appended to every description.
fn view_original(url: &Url) -> String {
    format!(r#"<a href="{url}" target="_blank">查看原文</a>"#)
}

/// Description used when enrichment is not requested: the title plus a
/// link back to the detail page. No network involved.
pub fn synthesized_description(title: &str, url: &Url) -> String {
    format!("{title}<br>{}", view_original(url))
}

/// Extract the article body from detail-page HTML.
///
/// Returns the inner markup of the first `.wp_articlecontent` container,
/// followed by a horizontal separator and the link-back. A page without the
/// container (markup changed, permission interstitial) yields `None` rather
/// than an error, matching the silent-degradation policy for extraction
/// mismatches.
pub fn extract_article_body(html: &str, url: &Url) -> Result<Option<String>, ContentError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse(ARTICLE_SELECTOR).map_err(|e| ContentError::Selector(e.to_string()))?;

    let Some(container) = document.select(&selector).next() else {
        tracing::debug!(url = %url, "detail page has no article container");
        return Ok(None);
    };

    Ok(Some(format!(
        "{}<br><hr />{}",
        container.inner_html(),
        view_original(url)
    )))
}
