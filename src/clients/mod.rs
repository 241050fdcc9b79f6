//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! - [`ProductClient`] - the product actor, usable as a
//!   [`ProductCatalog`](crate::catalog::ProductCatalog)
//! - [`CartClient`] - every open cart, addressed by [`CartId`](crate::model::CartId)
//! - [`CartStore`] - one cart, the surface a UI binds to

pub mod actor_client;
pub mod cart_client;
pub mod cart_store;
pub mod product_client;

pub use actor_client::*;
pub use cart_client::*;
pub use cart_store::*;
pub use product_client::*;
