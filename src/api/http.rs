//! # HTTP Client
//!
//! [`HttpBooksApi`] speaks to a json-server style REST backend with `reqwest`.

use super::{ApiError, BooksApi, SearchField};
use crate::model::{Book, BookDraft, BookId};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default backend the original single-page UI was pointed at.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// REST client for the `/books` collection.
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBooksApi {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:4000`).
    ///
    /// # Arguments
    /// * `base_url` - Backend origin; `/books` is appended to it
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/books`
    pub fn collection_url(&self) -> Url {
        self.url_for(None)
    }

    /// `{base}/books/{id}`, with the id percent-encoded as a path segment.
    pub fn item_url(&self, id: &BookId) -> Url {
        self.url_for(Some(id))
    }

    /// `{base}/books?{field}={value}`
    pub fn query_url(&self, field: SearchField, value: &str) -> Url {
        let mut url = self.collection_url();
        url.query_pairs_mut().append_pair(field.param(), value);
        url
    }

    fn url_for(&self, id: Option<&BookId>) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("books");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        missing: Option<&BookId>,
    ) -> Result<T, ApiError> {
        let response = Self::check_status(response, missing)?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn check_status(
        response: reqwest::Response,
        missing: Option<&BookId>,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        warn!(%status, url = %response.url(), "Request rejected");
        match (status, missing) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(ApiError::NotFound(id.clone())),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            }),
        }
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        let url = self.collection_url();
        debug!(%url, "Sending request");
        let response = self.client.get(url).send().await?;
        Self::read_json(response, None).await
    }

    #[instrument(skip(self))]
    async fn find(&self, field: SearchField, value: &str) -> Result<Vec<Book>, ApiError> {
        let url = self.query_url(field, value);
        debug!(%url, "Sending request");
        let response = self.client.get(url).send().await?;
        Self::read_json(response, None).await
    }

    #[instrument(skip(self))]
    async fn create(&self, draft: &BookDraft) -> Result<Book, ApiError> {
        let url = self.collection_url();
        debug!(%url, "Sending request");
        let response = self.client.post(url).json(draft).send().await?;
        Self::read_json(response, None).await
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &BookId, draft: &BookDraft) -> Result<Book, ApiError> {
        let url = self.item_url(id);
        debug!(%url, "Sending request");
        let response = self.client.put(url).json(draft).send().await?;
        Self::read_json(response, Some(id)).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &BookId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!(%url, "Sending request");
        let response = self.client.delete(url).send().await?;
        Self::check_status(response, Some(id)).map(|_| ())
    }
}
