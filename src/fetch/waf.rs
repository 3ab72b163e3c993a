use super::FetchError;
use reqwest::header::SET_COOKIE;
use std::time::Duration;

/// Acquire the site's WAF session cookie.
///
/// The announcement host sits behind a web application firewall that expects
/// a session cookie on every page request. One unauthenticated GET of the
/// portal root yields the session via `Set-Cookie`; this helper collects
/// every `name=value` pair from the response and joins them into a single
/// `Cookie` header value.
///
/// The cookie is acquired fresh for every feed request and never cached;
/// the WAF rotates sessions aggressively and a stale cookie just redirects
/// back to the challenge page.
///
/// A portal that sets no cookie yields an empty string; whether that is fatal
/// is decided by the listing fetch that follows.
pub async fn acquire_cookie(
    client: &reqwest::Client,
    base_url: &str,
    timeout_secs: u64,
) -> Result<String, FetchError> {
    let response = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        client.get(base_url).send(),
    )
    .await
    .map_err(|_| FetchError::Timeout(timeout_secs))?
    .map_err(FetchError::Network)?;

    // The challenge page itself may answer with a non-2xx status; the
    // Set-Cookie headers are harvested either way.
    let cookie = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ");

    tracing::debug!(
        host = %base_url,
        cookies = cookie.split("; ").filter(|c| !c.is_empty()).count(),
        "acquired WAF cookie"
    );
    Ok(cookie)
}
