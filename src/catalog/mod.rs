//! The Product/Stock Service port.
//!
//! The cart only ever reads from the service: one product record when a product is
//! first added, and the current stock level before an amount grows. Two adapters
//! are provided:
//!
//! - [`ProductClient`](crate::clients::ProductClient) - the in-process product actor
//! - [`HttpCatalog`] - a remote REST API (`/products/{id}`, `/stock/{id}`)

pub mod http;

pub use http::HttpCatalog;

use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;

/// Errors returned by a product catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// The service has no product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The request did not complete (connection, timeout, non-success status).
    #[error("Catalog transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),

    /// The catalog backend is not running.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to products and their stock.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetches the product record for `id`.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;

    /// Fetches the available stock for `id`.
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}
