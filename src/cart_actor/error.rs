//! Error types for the Cart actor.

use crate::catalog::CatalogError;
use crate::framework::FrameworkError;
use crate::model::{CartId, ProductId};
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A removal targeted a product that is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFoundInCart(ProductId),

    /// The requested amount exceeds the available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The Product/Stock Service lookup failed.
    #[error("Product service failure: {0}")]
    Service(#[from] CatalogError),

    /// The new cart could not be written to storage.
    #[error("Cart persistence failure: {0}")]
    Persistence(#[from] StorageError),

    /// No open cart has this id.
    #[error("Unknown cart: {0}")]
    UnknownCart(CartId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunication(msg)
    }
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        e.into_entity_error::<CartError>()
            .unwrap_or_else(|other| CartError::ActorCommunication(other.to_string()))
    }
}
