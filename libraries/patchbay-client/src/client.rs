//! HTTP client for the Patchbay server API.

use crate::error::{ClientError, Result};
use crate::types::{CartMutationRequest, CatalogParams, ErrorBody, MoveRequest, StoreConfig};
use patchbay_core::{CartEntry, CartKind, CatalogPreset, ItemRef, Pack};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Client for the Patchbay storefront API.
///
/// Stateless apart from the connection pool; one instance is shared by all
/// action handlers.
pub struct StorefrontClient {
    http: Client,
    base_url: String,
}

impl StorefrontClient {
    /// Create a new client with the given configuration.
    pub fn new(config: StoreConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Patchbay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Get the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the catalog. Default parameters return the full catalog,
    /// newest first.
    pub async fn search_catalog(&self, params: &CatalogParams) -> Result<Vec<CatalogPreset>> {
        let url = format!("{}/api/catalog", self.base_url);
        debug!(url = %url, "Searching catalog");

        let response = self
            .send(self.http.get(&url).query(&params.query_pairs()))
            .await?;
        let response = Self::check(response).await?;

        response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse catalog response: {}", e))
        })
    }

    /// List packs with their child preset rows.
    pub async fn list_packs(&self) -> Result<Vec<Pack>> {
        let url = format!("{}/api/packs", self.base_url);
        debug!(url = %url, "Listing packs");

        let response = self.send(self.http.get(&url)).await?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse packs response: {}", e)))
    }

    /// Fetch the authoritative entries of one collection.
    pub async fn fetch_entries(&self, owner_id: &str, kind: CartKind) -> Result<Vec<CartEntry>> {
        let url = format!("{}/api/cart", self.base_url);
        debug!(url = %url, kind = %kind, "Fetching cart entries");

        let response = self
            .send(
                self.http
                    .get(&url)
                    .query(&[("owner", owner_id), ("kind", kind.as_str())]),
            )
            .await?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse cart response: {}", e)))
    }

    /// Add an item to a collection.
    pub async fn add_entry(&self, request: &CartMutationRequest) -> Result<()> {
        let url = format!("{}/api/cart", self.base_url);
        debug!(url = %url, item = %request.item, "Adding cart entry");

        let response = self.send(self.http.post(&url).json(request)).await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Move an item between the two collections in a single server call.
    pub async fn move_entry(&self, request: &MoveRequest) -> Result<()> {
        let url = format!("{}/api/cart/move", self.base_url);
        debug!(url = %url, item = %request.item, from = %request.from, "Moving cart entry");

        let response = self.send(self.http.put(&url).json(request)).await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Remove an item from a collection.
    pub async fn remove_entry(&self, request: &CartMutationRequest) -> Result<()> {
        let url = format!("{}/api/cart", self.base_url);
        debug!(url = %url, item = %request.item, "Removing cart entry");

        let response = self.send(self.http.delete(&url).json(request)).await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete an owned catalog item.
    pub async fn delete_item(&self, item: &ItemRef) -> Result<()> {
        let url = format!(
            "{}/api/{}/{}",
            self.base_url,
            item.kind.collection(),
            item.id
        );
        debug!(url = %url, "Deleting item");

        let response = self.send(self.http.delete(&url)).await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })
    }

    /// Convert non-success responses into `ServerError`, surfacing the
    /// server-provided message when the body carries one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => String::new(),
        };

        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}
