//! # Product Actor
//!
//! An in-process Product/Stock Service. It keeps [`ProductRecord`]s (a product and
//! its stock level) and answers the two lookups the cart needs. The actor is what
//! [`ProductClient`](crate::clients::ProductClient) talks to; wrapped in that client
//! it is a [`ProductCatalog`](crate::catalog::ProductCatalog).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`ProductRecord`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, products) = product_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let id = products.create_product(ProductCreate {
//!     title: "Running Shoe".into(),
//!     price: 179.9,
//!     image: String::new(),
//!     stock: 3,
//! }).await?;
//! let stock = products.check_stock(id).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::ProductRecord;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<ProductRecord>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
