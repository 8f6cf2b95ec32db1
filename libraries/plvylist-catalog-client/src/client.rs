//! HTTP catalog fetch.

use crate::error::{CatalogClientError, Result};
use plvylist_core::Catalog;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Fetches catalog documents over HTTP.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
}

impl CatalogClient {
    /// Create a client with the default timeouts.
    pub fn new() -> Result<Self> {
        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Plvylist/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_http(http: Client) -> Self {
        Self { http }
    }

    /// Fetch and parse the catalog document at `uri`.
    pub async fn fetch(&self, uri: &str) -> Result<Catalog> {
        let url = parse_catalog_url(uri)?;

        debug!(url = %url, "Fetching catalog");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Catalog request failed");
            return Err(CatalogClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let catalog = Catalog::from_json(&body)?;

        info!(url = %url, tracks = catalog.len(), "Catalog fetched");

        Ok(catalog)
    }
}

/// Validate a catalog URI.
///
/// Must be an absolute `http` or `https` URL.
pub fn parse_catalog_url(uri: &str) -> Result<Url> {
    let uri = uri.trim();

    if uri.is_empty() {
        return Err(CatalogClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = Url::parse(uri).map_err(|e| CatalogClientError::InvalidUrl(format!("{uri}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(CatalogClientError::InvalidUrl(format!(
            "unsupported scheme '{scheme}', URL must start with http:// or https://"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(parse_catalog_url("https://example.com/tracks.json").is_ok());
        assert!(parse_catalog_url("http://localhost:8080/tracks.json").is_ok());
    }

    #[test]
    fn rejects_empty_relative_and_other_schemes() {
        assert!(matches!(
            parse_catalog_url("  "),
            Err(CatalogClientError::InvalidUrl(msg)) if msg.contains("empty")
        ));
        assert!(matches!(
            parse_catalog_url("./tracks.json"),
            Err(CatalogClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_catalog_url("ftp://example.com/tracks.json"),
            Err(CatalogClientError::InvalidUrl(msg)) if msg.contains("ftp")
        ));
    }
}
