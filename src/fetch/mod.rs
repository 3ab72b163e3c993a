//! HTTP fetch layer: authenticated page retrieval and WAF cookie acquisition.
//!
//! The module is organized into two submodules:
//!
//! - [`client`] - GET requests with timeout, status validation, and
//!   size-limited body reads
//! - [`waf`] - per-request acquisition of the site's WAF session cookie
//!
//! There is no retry logic anywhere in this layer: a failed fetch surfaces
//! as a [`FetchError`] and fails the feed request it belongs to.

mod client;
mod waf;

pub use client::{build_client, get_html, FetchError};
pub use waf::acquire_cookie;
