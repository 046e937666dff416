//! Asset retrieval — streamed HTTP downloads persisted to disk

use crate::error::{Error, Result};
use futures_util::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Request timeout for asset downloads (seconds)
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Downloads referenced assets (thumbnails) to local storage.
///
/// Fetches carry no credential parameters and are never retried. A failed
/// fetch is abandoned where it stands — no partial-file cleanup — and the
/// caller decides whether to proceed without the asset.
#[derive(Clone, Debug)]
pub struct AssetFetcher {
    client: reqwest::Client,
}

impl AssetFetcher {
    /// Create a fetcher with its own HTTP client
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(concat!("omeka-harvest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Create a fetcher sharing an existing HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Stream-copy the resource at `url` to `dest`, creating any missing
    /// intermediate directories first.
    ///
    /// # Errors
    /// [`Error::Http`] on a non-success status, [`Error::Network`] on
    /// transport failure, [`Error::Io`] when the destination cannot be
    /// written.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Http {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        debug!(url, dest = %dest.display(), "asset downloaded");
        Ok(())
    }
}
