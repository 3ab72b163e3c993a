use crate::config::Config;
use futures::StreamExt;
use reqwest::header::COOKIE;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a page.
///
/// These cover the full lifecycle of a single GET: network issues, HTTP
/// errors, and body-read failures. None of them are retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the configured size limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Response body was not valid UTF-8
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
}

/// Build the HTTP client shared by every request of one adapter.
///
/// The per-request timeout is enforced separately via [`tokio::time::timeout`]
/// in [`get_html`], so only connection-level settings live here.
pub fn build_client(config: &Config) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Perform an authenticated GET and return the response body as a string.
///
/// The WAF `cookie` (if non-empty) is attached as a `Cookie` header. The
/// request is bounded by `config.timeout_secs` and the body by
/// `config.max_response_bytes`.
///
/// # Errors
///
/// - [`FetchError::Timeout`] - the request exceeded the configured timeout
/// - [`FetchError::Network`] - connection or TLS failure
/// - [`FetchError::HttpStatus`] - non-2xx response status
/// - [`FetchError::ResponseTooLarge`] - body exceeded the size limit
/// - [`FetchError::InvalidUtf8`] - body was not valid UTF-8
pub async fn get_html(
    client: &reqwest::Client,
    url: &Url,
    cookie: &str,
    config: &Config,
) -> Result<String, FetchError> {
    let mut request = client.get(url.clone());
    if !cookie.is_empty() {
        request = request.header(COOKIE, cookie);
    }

    let response = tokio::time::timeout(Duration::from_secs(config.timeout_secs), request.send())
        .await
        .map_err(|_| FetchError::Timeout(config.timeout_secs))?
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let body = read_limited_text(response, config.max_response_bytes).await?;
    tracing::debug!(url = %url, bytes = body.len(), "fetched page");
    Ok(body)
}

/// Read a response body with a size limit, then decode as UTF-8.
///
/// Streams chunks so an oversized body aborts before it is fully buffered.
async fn read_limited_text(
    response: reqwest::Response,
    limit: usize,
) -> Result<String, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8)
}
