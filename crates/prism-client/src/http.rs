//! HTTP transport for Prism Central

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use prism_api::{ListingRequest, ListingResponse};

use crate::config::ConnectionConfig;
use crate::error::{ClientError, Result};
use crate::retry::with_backoff;
use crate::transport::ListingTransport;

/// Authenticated HTTPS client for the Prism Central v3 API
#[derive(Clone)]
pub struct PrismClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl PrismClient {
    /// Create a client from connection settings
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the TLS backend cannot
    /// be initialized.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        if !config.verify_ssl {
            warn!(host = %config.host, "TLS certificate verification disabled");
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Self::with_client(config, client)
    }

    /// Create a client with a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(config: &ConnectionConfig, client: Client) -> Result<Self> {
        let base_url = Url::parse(&config.base_url())?;
        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff,
        })
    }

    /// Build a full URL from an endpoint path
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Perform a POST request with JSON body
    async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let url = self.url(path)?;
        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }

    /// POST, retrying transient failures with exponential backoff
    async fn post_with_retry<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        with_backoff(self.max_attempts, self.initial_backoff, || self.post(path, body)).await
    }

    /// Fetch one listing page
    ///
    /// # Errors
    /// Returns an error if the request fails after all retries, the server
    /// answers with a non-success status, or the body cannot be decoded.
    #[instrument(skip(self, request), fields(kind = %request.kind, offset = request.offset))]
    pub async fn list_page(&self, request: &ListingRequest) -> Result<ListingResponse> {
        let page: ListingResponse = self.post_with_retry(request.kind.endpoint(), request).await?;
        debug!(
            entities = page.entities.len(),
            total = ?page.metadata.total_matches,
            "page received"
        );
        Ok(page)
    }
}

#[async_trait]
impl ListingTransport for PrismClient {
    async fn list(&self, request: &ListingRequest) -> Result<ListingResponse> {
        self.list_page(request).await
    }
}

impl fmt::Debug for PrismClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrismClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

fn map_send_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(e)
    }
}
