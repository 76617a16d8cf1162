use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{Result, TransportError};
use crate::key::ForecastKey;
use crate::transform;
use crate::types::ForecastRecord;

const DEFAULT_BASE_URL: &str = "http://www.yr.no";

/// HTTP client for yr.no forecast documents
///
/// Requests always go to the configured base URL; only the path of the
/// [`ForecastKey`] is used. No retries, and the transport's default timeouts.
pub struct YrClient {
    client: Client,
    base_url: String,
}

impl YrClient {
    /// Create a client for www.yr.no
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client for another forecast host
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download the raw forecast document for `key`
    pub async fn fetch(&self, key: &ForecastKey) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, key.path());
        debug!(url = %url, "Fetching forecast");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Forecast host unreachable");
            TransportError::Unreachable(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Forecast host returned failure status");
            return Err(TransportError::BadStatus {
                key: key.to_string(),
                status,
            }
            .into());
        }

        let body = response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read forecast body");
            TransportError::Unreachable(e)
        })?;

        debug!(url = %url, size = body.len(), "Fetched forecast");
        Ok(body.to_vec())
    }

    /// Fetch, parse and normalize the forecast for `key`
    pub async fn forecast(&self, key: &ForecastKey) -> Result<ForecastRecord> {
        let raw = self.fetch(key).await?;
        let parsed = transform::parse(&raw)?;
        Ok(transform::normalize(parsed))
    }
}

impl Default for YrClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(YrClient::new().base_url(), "http://www.yr.no");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = YrClient::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }
}
