//! REST adapter for the Product/Stock Service.

use crate::catalog::{CatalogError, ProductCatalog};
use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Reads products and stock from `{base_url}/products/{id}` and
/// `{base_url}/stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Builds a catalog client whose requests give up after `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, id: ProductId) -> Result<T, CatalogError> {
        let url = format!("{}/{}/{}", self.base_url, resource, id.0);
        debug!(%url, "GET");
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id));
        }
        if !status.is_success() {
            return Err(CatalogError::Transport(format!("{url} returned {status}")));
        }

        resp.json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch("products", id).await
    }

    #[instrument(skip(self))]
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.fetch("stock", id).await
    }
}
