//! RSS feed generation for the NUAA Academic Affairs Office (教务处).
//!
//! The site publishes announcements in five fixed categories, each a plain
//! HTML listing page behind a WAF cookie wall. This crate turns one category
//! into a normalized feed:
//!
//! - [`category`] - the static category table and key resolution
//! - [`fetch`] - authenticated HTTP with per-request WAF cookie acquisition
//! - [`listing`] - CSS-selector extraction of listing entries
//! - [`content`] - optional detail-page enrichment
//! - [`cache`] - process-wide compute-once memoization of detail content
//! - [`feed`] - the normalized feed types and RSS/JSON encodings
//! - [`adapter`] - the pipeline tying the above together
//!
//! # Example
//!
//! ```no_run
//! use jwcfeed::{Config, FeedAdapter};
//!
//! # async fn run() -> Result<(), jwcfeed::AdapterError> {
//! let adapter = FeedAdapter::new(Config::default())?;
//! let feed = adapter.fetch_feed("tzgg", false).await?;
//! println!("{}", feed.to_rss_xml());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod cache;
pub mod category;
pub mod config;
pub mod content;
pub mod feed;
pub mod fetch;
pub mod listing;

pub use adapter::{parse_full_text_flag, AdapterError, FeedAdapter};
pub use config::Config;
pub use feed::{Feed, FeedItem};
