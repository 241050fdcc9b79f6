//! # Cart Client
//!
//! Addresses every cart held by the cart actor. Most callers want the single-cart
//! [`CartStore`](crate::clients::CartStore) built on top of it.
use crate::cart_actor::{CartAction, CartError};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartId, CartSnapshot, ProductId, UpdateProductAmount};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// Clones share the table of open carts, so a storage key maps to at most one cart
/// no matter which clone opened it.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    open: Arc<Mutex<HashMap<String, CartId>>>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self {
            inner,
            open: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Opens the cart persisted under `storage_key`, loading whatever is stored
    /// there. A key that is already open returns the existing cart.
    #[instrument(skip(self, storage_key))]
    pub async fn open_cart(&self, storage_key: impl Into<String>) -> Result<CartId, CartError> {
        let storage_key = storage_key.into();
        // Held across the create so two concurrent opens of one key cannot both create.
        let mut open = self.open.lock().await;
        if let Some(id) = open.get(&storage_key) {
            debug!(%storage_key, cart = %id, "Already open");
            return Ok(*id);
        }
        debug!(%storage_key, "Sending request");
        let id = self
            .inner
            .create(CartCreate {
                storage_key: storage_key.clone(),
            })
            .await
            .map_err(CartError::from)?;
        open.insert(storage_key, id);
        Ok(id)
    }

    /// A copy of the cart, including its publishing handle.
    #[instrument(skip(self))]
    pub async fn cart(&self, id: CartId) -> Result<Cart, CartError> {
        self.get(id).await?.ok_or(CartError::UnknownCart(id))
    }

    #[instrument(skip(self))]
    pub async fn add_product(
        &self,
        id: CartId,
        product_id: ProductId,
    ) -> Result<CartSnapshot, CartError> {
        self.act(id, CartAction::AddProduct(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(
        &self,
        id: CartId,
        product_id: ProductId,
    ) -> Result<CartSnapshot, CartError> {
        self.act(id, CartAction::RemoveProduct(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        id: CartId,
        product_id: ProductId,
        amount: i64,
    ) -> Result<CartSnapshot, CartError> {
        let request = UpdateProductAmount { product_id, amount };
        self.act(id, CartAction::UpdateProductAmount(request)).await
    }

    /// Empties a cart and deletes its stored value.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self, id: CartId) -> Result<CartSnapshot, CartError> {
        self.act(id, CartAction::Clear).await
    }

    /// Stops tracking a cart. Its stored entries are kept, and every handle to the
    /// cart sees `UnknownCart` from then on.
    #[instrument(skip(self))]
    pub async fn close_cart(&self, id: CartId) -> Result<(), CartError> {
        let mut open = self.open.lock().await;
        self.inner
            .delete(id)
            .await
            .map_err(|e| unknown_cart_as(id, e))?;
        open.retain(|_, open_id| *open_id != id);
        Ok(())
    }

    async fn act(&self, id: CartId, action: CartAction) -> Result<CartSnapshot, CartError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| unknown_cart_as(id, e))
    }
}

fn unknown_cart_as(id: CartId, e: FrameworkError) -> CartError {
    match e {
        FrameworkError::NotFound(_) => CartError::UnknownCart(id),
        other => CartError::from(other),
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::from(e)
    }
}
