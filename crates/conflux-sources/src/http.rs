//! Shared HTTP response helpers for source adapters.
//!
//! Centralizes the status-code gate so individual source modules stay
//! focused on feed parsing and record mapping.

use crate::error::SourceError;

/// Fetch a URL and return the response body as text.
///
/// Upstream feeds are declared without a charset even though they are
/// UTF-8; `reqwest::Response::text` handles that correctly.
pub async fn fetch_text(http: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let resp = check_response(http.get(url).send().await?).await?;
    Ok(resp.text().await?)
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success, otherwise
/// [`SourceError::Api`] with the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    if !resp.status().is_success() {
        return Err(SourceError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
