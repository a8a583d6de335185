//! HTTP client for the per-creator post listing endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SourceError;
use crate::parse::parse_latest_post;
use crate::retry::{retry_fixed, RetryPolicy};
use crate::types::PostSummary;

/// Client for `GET {base}/{service}/user/{creator_id}`.
///
/// The listing is expected newest-first; only its first element is kept.
/// Use [`PostSourceClient::new`] with the production base URL or a
/// wiremock server URI in tests.
pub struct PostSourceClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl PostSourceClient {
    /// Creates a client with a bounded per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SourceError::InvalidBaseUrl`] if
    /// `base_url` does not parse as a hierarchical URL.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        retry: RetryPolicy,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let invalid = |reason: String| SourceError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_owned()));
        }

        Ok(Self {
            client,
            base_url: parsed,
            retry,
        })
    }

    /// Builds the listing URL; path segments are percent-encoded.
    #[must_use]
    pub fn feed_url(&self, service: &str, creator_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this branch always runs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([service, "user", creator_id]);
        }
        url
    }

    /// Fetches the newest post for a creator, retrying network-class errors.
    ///
    /// Returns `Ok(None)` if the creator's feed is empty.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] / [`SourceError::UnexpectedStatus`] once all
    ///   attempts are exhausted.
    /// - [`SourceError::Deserialize`] / [`SourceError::MalformedPost`] on the
    ///   first malformed response (not retried).
    pub async fn fetch_latest(
        &self,
        service: &str,
        creator_id: &str,
    ) -> Result<Option<PostSummary>, SourceError> {
        let url = self.feed_url(service, creator_id);
        let context = format!("{service}/{creator_id}");
        retry_fixed(self.retry, || self.fetch_once(&url, &context)).await
    }

    /// One GET: non-2xx becomes [`SourceError::UnexpectedStatus`], the body
    /// must be JSON, then the first post is extracted.
    async fn fetch_once(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<Option<PostSummary>, SourceError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        parse_latest_post(&value, context)
    }
}
