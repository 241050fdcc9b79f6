use crate::cart_actor::{self, CartContext, CartError};
use crate::catalog::ProductCatalog;
use crate::clients::{CartClient, CartStore, ProductClient};
use crate::config::CartConfig;
use crate::notify::Notifier;
use crate::product_actor;
use crate::storage::Storage;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] JoinError),
}

/// The running cart system: a cart actor and, optionally, an in-process product actor.
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::with_local_catalog(&config, storage, notifier);
/// let products = system.product_client.clone().unwrap();
/// let shoe = products.create_product(shoe_params).await?;
///
/// let store = system.open_default_cart().await?;
/// store.add_product(shoe).await?;
///
/// drop(store);
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for the Cart actor
    pub cart_client: CartClient,

    /// Client for the in-process Product actor, when the system runs one
    pub product_client: Option<ProductClient>,

    storage_key: String,
    /// Joined in order on shutdown: the cart actor first.
    handles: Vec<JoinHandle<()>>,
}

impl CartSystem {
    /// Starts a cart actor backed by `catalog`.
    pub fn start(
        config: &CartConfig,
        catalog: Arc<dyn ProductCatalog>,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (cart_actor, cart_client) = cart_actor::new(config.channel_buffer);
        let context = CartContext {
            catalog,
            storage,
            notifier,
            policy: config.policy,
        };
        let cart_handle = tokio::spawn(cart_actor.run(context));
        info!(policy = ?config.policy, "Cart system started");

        Self {
            cart_client,
            product_client: None,
            storage_key: config.storage_key.clone(),
            handles: vec![cart_handle],
        }
    }

    /// Starts a product actor as the catalog, then the cart actor on top of it.
    pub fn with_local_catalog(
        config: &CartConfig,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (product_actor, product_client) = product_actor::new(config.channel_buffer);
        let product_handle = tokio::spawn(product_actor.run(()));

        let mut system = Self::start(config, Arc::new(product_client.clone()), storage, notifier);
        system.product_client = Some(product_client);
        system.handles.push(product_handle);
        system
    }

    /// Opens the cart stored under `storage_key`.
    pub async fn open_cart(&self, storage_key: impl Into<String>) -> Result<CartStore, CartError> {
        CartStore::open(self.cart_client.clone(), storage_key).await
    }

    /// Opens the cart stored under the configured key.
    pub async fn open_default_cart(&self) -> Result<CartStore, CartError> {
        self.open_cart(self.storage_key.clone()).await
    }

    /// Drops the system's clients and waits for every actor to stop.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cart system...");
        drop(self.cart_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
