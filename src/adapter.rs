//! The feed adapter: one category key in, one normalized feed out.
//!
//! Pipeline per request: resolve the category, acquire a fresh WAF cookie,
//! fetch and extract the listing, and when full descriptions are requested,
//! fan out one detail fetch per item. Detail fetches run
//! concurrently and join in listing order: results are re-associated to
//! their originating entry by position, never by completion time. A single
//! failed detail fetch fails the whole request; there is no partial feed.
use crate::cache::ContentCache;
use crate::category::{self, CategoryError, ResolvedCategory};
use crate::config::Config;
use crate::content::{self, ContentError};
use crate::feed::{parse_pub_date, Feed, FeedItem, FEED_DESCRIPTION};
use crate::fetch::{self, FetchError};
use crate::listing::{self, ListingEntry, ListingError};
use futures::future::try_join_all;
use thiserror::Error;
use url::Url;

/// Errors produced by a feed request, aggregating every stage of the
/// pipeline. Only [`AdapterError::Category`] is a caller mistake; the rest
/// are upstream failures.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Content(#[from] ContentError),
    /// A listing entry's href could not be resolved against the base host.
    #[error("Invalid item link '{link}': {source}")]
    InvalidItemLink {
        link: String,
        source: url::ParseError,
    },
}

/// Parse the "get full description" flag from its raw route/CLI form.
///
/// The accepted true literals are exactly `true`, `1` and `yes` (ASCII
/// case-insensitive, surrounding whitespace ignored). Anything else,
/// including an absent value, is false. The contract is deliberately a
/// closed set rather than truthiness coercion.
pub fn parse_full_text_flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => v.eq_ignore_ascii_case("true") || v == "1" || v.eq_ignore_ascii_case("yes"),
        None => false,
    }
}

/// The adapter owns the HTTP client and the process-wide content cache;
/// one instance serves any number of feed requests.
pub struct FeedAdapter {
    client: reqwest::Client,
    base_url: Url,
    config: Config,
    cache: ContentCache,
}

impl FeedAdapter {
    pub fn new(config: Config) -> Result<Self, AdapterError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| CategoryError::InvalidBaseUrl {
                base: config.base_url.clone(),
                source,
            })?;
        let client = fetch::build_client(&config)?;
        Ok(Self {
            client,
            base_url,
            config,
            cache: ContentCache::new(),
        })
    }

    /// Fetch the feed for one category.
    ///
    /// With `full_text` false this performs exactly two requests (cookie
    /// portal + listing) and synthesizes item descriptions locally. With
    /// `full_text` true it additionally fetches each item's detail page,
    /// memoized per URL for the process lifetime.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::Category`] - unknown category key
    /// - [`AdapterError::Fetch`] - cookie, listing, or any detail fetch failed
    /// - [`AdapterError::InvalidItemLink`] - a listing href did not resolve
    pub async fn fetch_feed(
        &self,
        category_key: &str,
        full_text: bool,
    ) -> Result<Feed, AdapterError> {
        let resolved = category::resolve(category_key, self.base_url.as_str())?;

        // Fresh cookie per request; the WAF rotates sessions.
        let cookie = fetch::acquire_cookie(
            &self.client,
            self.base_url.as_str(),
            self.config.timeout_secs,
        )
        .await?;

        let listing_html =
            fetch::get_html(&self.client, &resolved.listing_url, &cookie, &self.config).await?;
        let entries = listing::extract_entries(&listing_html)?;

        tracing::info!(
            category = %resolved.key,
            entries = entries.len(),
            full_text,
            "fetched listing"
        );

        let items = try_join_all(
            entries
                .iter()
                .map(|entry| self.build_item(&resolved, entry, &cookie, full_text)),
        )
        .await?;

        Ok(Feed {
            title: resolved.title,
            link: resolved.listing_url.to_string(),
            description: FEED_DESCRIPTION.to_string(),
            items,
        })
    }

    async fn build_item(
        &self,
        category: &ResolvedCategory,
        entry: &ListingEntry,
        cookie: &str,
        full_text: bool,
    ) -> Result<FeedItem, AdapterError> {
        // An entry with no title text still gets a non-empty feed title:
        // the category key itself, not a generic placeholder.
        let title = if entry.title.is_empty() {
            category.key.clone()
        } else {
            entry.title.clone()
        };

        let item_url =
            self.base_url
                .join(&entry.link)
                .map_err(|source| AdapterError::InvalidItemLink {
                    link: entry.link.clone(),
                    source,
                })?;

        let description = if full_text {
            self.cache
                .get_or_try_compute(item_url.as_str(), || self.fetch_detail(&item_url, cookie))
                .await?
        } else {
            Some(content::synthesized_description(&title, &item_url))
        };

        Ok(FeedItem {
            title,
            link: item_url.to_string(),
            description,
            pub_date: parse_pub_date(&entry.date_text),
        })
    }

    /// Compute the enrichment value for one detail URL (cache miss path).
    async fn fetch_detail(&self, url: &Url, cookie: &str) -> Result<Option<String>, AdapterError> {
        if !content::is_article_page(url) {
            tracing::debug!(url = %url, "non-article target, no content");
            return Ok(None);
        }

        let html = fetch::get_html(&self.client, url, cookie, &self.config).await?;
        Ok(content::extract_article_body(&html, url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flag_true_literals() {
        assert!(parse_full_text_flag(Some("true")));
        assert!(parse_full_text_flag(Some("TRUE")));
        assert!(parse_full_text_flag(Some("1")));
        assert!(parse_full_text_flag(Some("yes")));
        assert!(parse_full_text_flag(Some("Yes")));
        assert!(parse_full_text_flag(Some("  true  ")));
    }

    #[test]
    fn test_flag_everything_else_is_false() {
        assert!(!parse_full_text_flag(None));
        assert!(!parse_full_text_flag(Some("")));
        assert!(!parse_full_text_flag(Some("false")));
        assert!(!parse_full_text_flag(Some("0")));
        assert!(!parse_full_text_flag(Some("getDescription")));
        assert!(!parse_full_text_flag(Some("on")));
    }

    #[test]
    fn test_adapter_rejects_invalid_base_url() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            FeedAdapter::new(config),
            Err(AdapterError::Category(CategoryError::InvalidBaseUrl { .. }))
        ));
    }

    proptest! {
        #[test]
        fn flag_accepts_only_the_closed_set(raw in "[a-zA-Z0-9]{0,8}") {
            let lowered = raw.trim().to_ascii_lowercase();
            let expected = matches!(lowered.as_str(), "true" | "1" | "yes");
            prop_assert_eq!(parse_full_text_flag(Some(&raw)), expected);
        }
    }
}
