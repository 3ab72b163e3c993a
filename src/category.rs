//! Announcement categories of the Academic Affairs Office site.
//!
//! The site publishes announcements in five fixed sections, each with its own
//! listing page. The table is static: no mutation, no dynamic registration.
use thiserror::Error;
use url::Url;

/// One entry of the static category table.
///
/// `suffix` is the listing page path relative to the site base URL.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    /// Short code used as the route/CLI parameter (e.g. `tzgg`).
    pub key: &'static str,
    /// Feed display title for this category.
    pub title: &'static str,
    /// Listing page path, resolved against the base URL.
    pub suffix: &'static str,
}

/// All categories the site publishes, in the order the site lists them.
pub const CATEGORIES: &[Category] = &[
    Category {
        key: "tzgg",
        title: "通知公告 | 南京航空航天大学教务处",
        suffix: "8222/list.htm",
    },
    Category {
        key: "jxfw",
        title: "教学服务 | 南京航空航天大学教务处",
        suffix: "8230/list.htm",
    },
    Category {
        key: "xspy",
        title: "学生培养 | 南京航空航天大学教务处",
        suffix: "8231/list.htm",
    },
    Category {
        key: "jxjs",
        title: "教学建设 | 南京航空航天大学教务处",
        suffix: "8232/list.htm",
    },
    Category {
        key: "jxzy",
        title: "教学资源 | 南京航空航天大学教务处",
        suffix: "8233/list.htm",
    },
];

/// A category resolved against a concrete base URL.
#[derive(Debug, Clone)]
pub struct ResolvedCategory {
    /// The requested category key, echoed back for fallback titling.
    pub key: String,
    /// Feed display title.
    pub title: String,
    /// Absolute URL of the listing page.
    pub listing_url: Url,
}

/// Errors that can occur while resolving a category key.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// The key is not one of the configured category codes.
    #[error("Unknown category '{key}' (valid categories: {valid})")]
    UnknownCategory { key: String, valid: String },
    /// The configured base URL (or the joined listing URL) is not a valid URL.
    #[error("Invalid base URL '{base}': {source}")]
    InvalidBaseUrl {
        base: String,
        source: url::ParseError,
    },
}

/// Resolve a category key against a base URL.
///
/// Returns the category's display title and the absolute listing URL formed
/// by joining the category's path suffix onto `base_url`.
///
/// # Errors
///
/// - [`CategoryError::UnknownCategory`] when `key` is not in the table. The
///   message lists every valid key so a caller-facing error is actionable.
/// - [`CategoryError::InvalidBaseUrl`] when `base_url` cannot be parsed or
///   the suffix cannot be joined onto it.
pub fn resolve(key: &str, base_url: &str) -> Result<ResolvedCategory, CategoryError> {
    let category = CATEGORIES
        .iter()
        .find(|c| c.key == key)
        .ok_or_else(|| CategoryError::UnknownCategory {
            key: key.to_string(),
            valid: valid_keys().join(", "),
        })?;

    let base = Url::parse(base_url).map_err(|source| CategoryError::InvalidBaseUrl {
        base: base_url.to_string(),
        source,
    })?;
    let listing_url = base
        .join(category.suffix)
        .map_err(|source| CategoryError::InvalidBaseUrl {
            base: base_url.to_string(),
            source,
        })?;

    Ok(ResolvedCategory {
        key: category.key.to_string(),
        title: category.title.to_string(),
        listing_url,
    })
}

/// All valid category keys, in table order.
pub fn valid_keys() -> Vec<&'static str> {
    CATEGORIES.iter().map(|c| c.key).collect()
}
