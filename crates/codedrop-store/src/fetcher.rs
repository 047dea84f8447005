//! Archive download for bulk uploads.

use async_trait::async_trait;
use codedrop_common::{DropError, Result};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Source of uploaded archive bytes.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Downloads the archive behind `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Downloads attachments over HTTP(S) with a shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpArchiveFetcher {
    client: reqwest::Client,
}

impl HttpArchiveFetcher {
    /// Creates a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DropError::config_with_source("Failed to build HTTP client", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArchiveSource for HttpArchiveFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url)
            .map_err(|e| DropError::invalid_field(format!("Attachment URL is invalid: {e}"), "archive"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DropError::invalid_field(
                format!("Unsupported attachment URL scheme `{}`", parsed.scheme()),
                "archive",
            ));
        }

        debug!("Downloading archive from {}", parsed.host_str().unwrap_or("<no host>"));
        let response = self
            .client
            .get(parsed.as_str())
            .send()
            .await
            .map_err(|e| DropError::transport_with_source("Failed to download the zip file", e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Archive download returned HTTP {}", status);
            return Err(DropError::transport_with_status(
                format!("Failed to download the zip file (HTTP {})", status.as_u16()),
                status.as_u16(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DropError::transport_with_source("Failed to read the zip file", e))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_scheme() {
        let fetcher = HttpArchiveFetcher::new(Duration::from_secs(5)).unwrap();
        let err = tokio_test::block_on(fetcher.fetch("file:///etc/passwd")).unwrap_err();
        assert!(matches!(err, DropError::InvalidInput { .. }));
    }

    #[test]
    fn test_rejects_malformed_url() {
        let fetcher = HttpArchiveFetcher::new(Duration::from_secs(5)).unwrap();
        let err = tokio_test::block_on(fetcher.fetch("not a url")).unwrap_err();
        assert!(matches!(err, DropError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_mock_source_returns_bytes() {
        let mut source = MockArchiveSource::new();
        source
            .expect_fetch()
            .withf(|url| url.ends_with("codes.zip"))
            .returning(|_| Ok(vec![1, 2, 3]));

        assert_eq!(source.fetch("https://cdn.example/codes.zip").await.unwrap(), vec![1, 2, 3]);
    }
}
