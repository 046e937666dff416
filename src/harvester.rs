//! Collection walking and run orchestration.
//!
//! The walker pages through an item set's listing, following the `Link`
//! header `rel="next"` cursor the server supplies with each page, then
//! fetches media per item. Rows come out item-first: every item row, then
//! each item's media block in item order. Remote failures along the way are
//! logged and the run continues with whatever was collected.

use crate::config::Config;
use crate::error::Result;
use crate::export;
use crate::fetch::AssetFetcher;
use crate::normalize::Normalizer;
use crate::types::{OutputRow, RawRecord};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Request timeout for listing fetches (seconds)
const LISTING_TIMEOUT_SECS: u64 = 30;

/// Drives a full harvest: enumeration, normalization, export.
///
/// Execution is fully sequential — one request in flight at a time, row
/// order deterministic.
pub struct Harvester {
    http: reqwest::Client,
    fetcher: AssetFetcher,
    config: Config,
}

impl Harvester {
    /// Create a harvester for `config`
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(LISTING_TIMEOUT_SECS))
            .user_agent(concat!("omeka-harvest/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let fetcher = AssetFetcher::with_client(http.clone());
        Ok(Self {
            http,
            fetcher,
            config,
        })
    }

    /// Run the full harvest and return all rows in export order:
    /// every item row first, then each item's media block, item order
    /// throughout.
    ///
    /// # Errors
    /// Only setup-level failures (an unparseable base URL) surface here;
    /// remote failures degrade to partial results per the error policy.
    pub async fn run(&self) -> Result<Vec<OutputRow>> {
        let items = self.fetch_items().await?;
        info!(
            items = items.len(),
            item_set = %self.config.item_set_id,
            "item enumeration complete"
        );

        let normalizer = Normalizer::new(&self.fetcher, &self.config.objects_dir);

        let mut rows = Vec::with_capacity(items.len());
        for item in &items {
            rows.push(normalizer.normalize_item(item).await);
        }

        for item in &items {
            let Some(media) = self.fetch_media(item.id).await else {
                continue;
            };
            debug!(item_id = item.id, media = media.len(), "media listing received");
            for media_record in &media {
                rows.push(normalizer.normalize_media(media_record, item.id).await);
            }
        }

        Ok(rows)
    }

    /// Run the full harvest and write the CSV export, returning its path
    ///
    /// # Errors
    /// As [`Harvester::run`], plus export I/O failures.
    pub async fn run_to_csv(&self) -> Result<PathBuf> {
        let rows = self.run().await?;
        export::write_rows(&self.config.csv_path, &rows)?;
        info!(
            rows = rows.len(),
            path = %self.config.csv_path.display(),
            "export written"
        );
        Ok(self.config.csv_path.clone())
    }

    /// Page through the item listing until the server stops offering a
    /// `rel="next"` cursor, accumulating every item.
    ///
    /// A non-success status, transport failure, or unparseable page halts
    /// pagination early; everything collected so far is kept.
    async fn fetch_items(&self) -> Result<Vec<RawRecord>> {
        let mut first = self.listing_url("items")?;
        first
            .query_pairs_mut()
            .append_pair("item_set_id", &self.config.item_set_id)
            .append_pair("key_identity", &self.config.key_identity)
            .append_pair("key_credential", &self.config.key_credential)
            .append_pair("per_page", &self.config.per_page.to_string());

        let mut items = Vec::new();
        let mut next = Some(first);
        while let Some(url) = next.take() {
            debug!(%url, "fetching item page");
            let response = match self.http.get(url.clone()).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!(%url, error = %e, "item listing request failed, stopping pagination");
                    break;
                }
            };
            if !response.status().is_success() {
                warn!(
                    %url,
                    status = response.status().as_u16(),
                    "item listing returned an error status, stopping pagination"
                );
                break;
            }

            // Read the cursor before the body consumes the response
            next = next_page(&response);

            match response.json::<Vec<RawRecord>>().await {
                Ok(page) => {
                    debug!(count = page.len(), "item page received");
                    items.extend(page);
                }
                Err(e) => {
                    warn!(%url, error = %e, "item page body could not be parsed, stopping pagination");
                    break;
                }
            }
        }
        Ok(items)
    }

    /// One unpaginated media listing for `item_id`.
    ///
    /// Returns `None` on any failure — media for that item is skipped and
    /// the run continues.
    async fn fetch_media(&self, item_id: u64) -> Option<Vec<RawRecord>> {
        let mut url = match self.listing_url("media") {
            Ok(url) => url,
            Err(e) => {
                warn!(item_id, error = %e, "could not build media listing URL");
                return None;
            }
        };
        url.query_pairs_mut()
            .append_pair("item_id", &item_id.to_string())
            .append_pair("key_identity", &self.config.key_identity)
            .append_pair("key_credential", &self.config.key_credential);

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(item_id, error = %e, "media listing request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!(
                item_id,
                status = response.status().as_u16(),
                "media listing returned an error status"
            );
            return None;
        }
        match response.json().await {
            Ok(media) => Some(media),
            Err(e) => {
                warn!(item_id, error = %e, "media listing body could not be parsed");
                None
            }
        }
    }

    fn listing_url(&self, resource: &str) -> Result<Url> {
        Ok(Url::parse(&self.config.api_base_url)?.join(resource)?)
    }
}

/// Extract the `rel="next"` cursor from a response's `Link` header
fn next_page(response: &reqwest::Response) -> Option<Url> {
    let header = response
        .headers()
        .get(reqwest::header::LINK)?
        .to_str()
        .ok()?;
    parse_next_link(header).and_then(|target| Url::parse(&target).ok())
}

/// Parse an RFC 8288 `Link` header value, returning the `rel="next"` target
fn parse_next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut segments = part.split(';');
        let Some(target) = segments.next() else {
            continue;
        };
        let Some(target) = target
            .trim()
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
        else {
            continue;
        };
        let is_next = segments
            .map(str::trim)
            .filter_map(|param| param.strip_prefix("rel="))
            .any(|rel| rel.trim_matches('"') == "next");
        if is_next {
            return Some(target.to_string());
        }
    }
    None
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_next_link_from_single_relation() {
        let header = r#"<https://example.org/api/items?page=2>; rel="next""#;
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://example.org/api/items?page=2")
        );
    }

    #[test]
    fn parses_next_link_among_multiple_relations() {
        let header = concat!(
            r#"<https://example.org/api/items?page=1>; rel="first", "#,
            r#"<https://example.org/api/items?page=3>; rel="next", "#,
            r#"<https://example.org/api/items?page=5>; rel="last""#
        );
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://example.org/api/items?page=3")
        );
    }

    #[test]
    fn accepts_unquoted_rel_parameter() {
        let header = "<https://example.org/api/items?page=2>; rel=next";
        assert_eq!(
            parse_next_link(header).as_deref(),
            Some("https://example.org/api/items?page=2")
        );
    }

    #[test]
    fn returns_none_without_a_next_relation() {
        assert_eq!(
            parse_next_link(r#"<https://example.org/api/items?page=1>; rel="prev""#),
            None
        );
        assert_eq!(parse_next_link(""), None);
        assert_eq!(parse_next_link("garbage"), None);
    }
}
