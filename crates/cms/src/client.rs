//! HTTP client for CMS collection endpoints.
//!
//! [`CmsClient`] fetches single envelopes (retrying transient failures) and
//! aggregates multi-page collections into one ordered list.

use futures::future::try_join_all;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

use crate::config::CmsConfig;
use crate::envelope::Envelope;
use crate::error::CmsError;
use crate::query::QueryParams;
use crate::retry::with_retry;

/// HTTP client bound to one CMS instance.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    config: CmsConfig,
}

impl CmsClient {
    /// Create a client with its own connection pool and the configured timeout.
    pub fn new(config: CmsConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CmsConfig {
        &self.config
    }

    /// Fetch one page of `path`, retrying transient failures per the
    /// configured [`RetryConfig`](crate::retry::RetryConfig).
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Envelope<T>, CmsError> {
        with_retry(&self.config.retry, path, || self.fetch_page_once(path, params)).await
    }

    /// Fetch every page of `path` and concatenate them in page order.
    ///
    /// The first page is fetched alone to learn the page count; pages
    /// `2..=page_count` are then requested concurrently. Any failing page
    /// fails the whole fetch.
    pub async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Vec<T>, CmsError> {
        let first = self.fetch_page::<T>(path, params).await?;
        let page_count = first.page_count();

        if !first.has_more_pages() {
            return Ok(first.data);
        }

        let remaining_params: Vec<QueryParams> =
            (2..=page_count).map(|page| params.for_page(page)).collect();
        let remaining = try_join_all(
            remaining_params
                .iter()
                .map(|page_params| self.fetch_page::<T>(path, page_params)),
        )
        .await?;

        let mut all = first.data;
        for envelope in remaining {
            all.extend(envelope.data);
        }

        tracing::info!(
            path,
            page_count,
            total_items = all.len(),
            "Aggregated all CMS pages",
        );

        Ok(all)
    }

    // ---- private helpers ----

    async fn fetch_page_once<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<Envelope<T>, CmsError> {
        let url = self.config.url_for(path);

        tracing::debug!(
            url = %url,
            query = ?params.pairs(),
            authenticated = self.config.api_token.is_some(),
            "CMS request",
        );

        let mut request = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .query(params.pairs());
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| CmsError::Network {
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| CmsError::Network {
            path: path.to_string(),
            source,
        })?;

        if !status.is_success() {
            tracing::error!(
                url = %url,
                status = status.as_u16(),
                body = %body,
                "CMS request failed",
            );
            return Err(CmsError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|source| CmsError::Malformed {
                path: path.to_string(),
                source,
            })?;

        tracing::debug!(
            path,
            page = envelope.page(),
            items_received = envelope.data.len(),
            total_items = envelope.total(),
            "CMS response",
        );

        Ok(envelope)
    }
}
