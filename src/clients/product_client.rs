//! # Product Client
//!
//! Wraps a `ResourceClient<ProductRecord>` and exposes the product actor both as a
//! small admin API (register products, change stock) and as a [`ProductCatalog`].
use crate::catalog::{CatalogError, ProductCatalog};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductRecord, ProductUpdate, Stock};
use crate::product_actor::{ProductAction, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<ProductRecord>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<ProductRecord>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ProductError::from)
    }

    /// Changes price and/or stock, returning the updated record.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| not_found_as(id, e))
    }

    /// Current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<Stock, ProductError> {
        debug!("Checking stock");
        self.inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(|e| not_found_as(id, e))
    }

    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ProductError> {
        match self.get(id).await? {
            Some(record) => Ok(record.product),
            None => Err(ProductError::NotFound(id)),
        }
    }
}

fn not_found_as(id: ProductId, e: FrameworkError) -> ProductError {
    match e {
        FrameworkError::NotFound(_) => ProductError::NotFound(id),
        other => ProductError::from(other),
    }
}

#[async_trait]
impl ActorClient<ProductRecord> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<ProductRecord> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}

#[async_trait]
impl ProductCatalog for ProductClient {
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        Ok(self.product(id).await?)
    }

    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        Ok(self.check_stock(id).await?)
    }
}
