//! HTTP retrieval of the ground list page

use crate::config::ScrapeConfig;
use crate::error::{GroundsError, Result};

/// Create an HTTP client with browser-like headers
fn create_browser_client(config: &ScrapeConfig) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
        .timeout(config.timeout)
        .build()
        .map_err(|e| GroundsError::Fetch(format!("Failed to create HTTP client: {}", e)))
}

/// Fetch the configured page and return its body.
///
/// A single attempt is made; timeouts, connection failures and non-2xx
/// statuses all come back as [`GroundsError::Fetch`].
pub fn fetch_html(config: &ScrapeConfig) -> Result<String> {
    let client = create_browser_client(config)?;

    let response = client
        .get(&config.url)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .map_err(|e| {
            GroundsError::Fetch(format!("Request to '{}' failed: {}", config.url, e))
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GroundsError::Fetch(format!(
            "HTTP error from '{}': {} {}",
            config.url,
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    let html = response
        .text()
        .map_err(|e| GroundsError::Fetch(format!("Failed to read response: {}", e)))?;
    log::debug!("Fetched {} bytes from {}", html.len(), config.url);

    Ok(html)
}
