//! Error types for the Product actor.

use crate::catalog::CatalogError;
use crate::framework::FrameworkError;
use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The product payload was rejected (empty title, negative or non-finite price).
    #[error("Invalid product: {0}")]
    Invalid(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunication(msg)
    }
}

impl From<FrameworkError> for ProductError {
    fn from(e: FrameworkError) -> Self {
        e.into_entity_error::<ProductError>()
            .unwrap_or_else(|other| ProductError::ActorCommunication(other.to_string()))
    }
}

impl From<ProductError> for CatalogError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => CatalogError::NotFound(id),
            ProductError::Invalid(msg) => CatalogError::Decode(msg),
            ProductError::ActorCommunication(msg) => CatalogError::Unavailable(msg),
        }
    }
}
