//! # Cart Store
//!
//! One open cart seen the way a UI sees it: the current entries, a subscription to
//! every committed change, and the mutations. Failures are returned to the caller
//! and also reach the notifier the cart actor was started with.
//!
//! Stores opened on the same storage key through one
//! [`CartSystem`](crate::lifecycle::CartSystem) drive the same cart.
use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::model::{self, CartId, CartSnapshot, ProductId};
use tokio::sync::watch;
use tracing::info;

/// Handle to a single cart.
#[derive(Clone)]
pub struct CartStore {
    client: CartClient,
    id: CartId,
    state: watch::Receiver<CartSnapshot>,
}

impl CartStore {
    /// Opens the cart stored under `storage_key`.
    pub async fn open(client: CartClient, storage_key: impl Into<String>) -> Result<Self, CartError> {
        let id = client.open_cart(storage_key).await?;
        let cart = client.cart(id).await?;
        info!(cart = %id, entries = cart.entries().len(), "Cart opened");
        Ok(Self {
            client,
            id,
            state: cart.subscribe(),
        })
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    /// The last committed entries.
    pub fn cart(&self) -> CartSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that observes every committed cart. Failed and ignored requests
    /// publish nothing.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.state.clone()
    }

    pub async fn add_product(&self, product_id: ProductId) -> Result<CartSnapshot, CartError> {
        self.client.add_product(self.id, product_id).await
    }

    pub async fn remove_product(&self, product_id: ProductId) -> Result<CartSnapshot, CartError> {
        self.client.remove_product(self.id, product_id).await
    }

    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<CartSnapshot, CartError> {
        self.client
            .update_product_amount(self.id, product_id, amount)
            .await
    }

    /// Empties the cart, e.g. after checkout, and deletes its stored value.
    pub async fn clear(&self) -> Result<CartSnapshot, CartError> {
        self.client.clear_cart(self.id).await
    }

    /// Sum of all amounts in the cart.
    pub fn total_items(&self) -> u64 {
        model::total_items(&self.cart())
    }

    /// Sum of price times amount.
    pub fn subtotal(&self) -> f64 {
        model::subtotal(&self.cart())
    }

    /// Stops tracking the cart in the actor. The stored entries are kept. Other
    /// handles opened on the same key stop working too.
    pub async fn close(self) -> Result<(), CartError> {
        self.client.close_cart(self.id).await
    }
}
