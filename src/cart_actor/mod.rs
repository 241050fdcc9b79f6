//! # Cart Actor
//!
//! The cart state machine. A [`Cart`] is an entity of the generic
//! [`ResourceActor`](crate::framework::ResourceActor); the three mutations are
//! [`CartAction`]s handled in [`entity`].
//!
//! ## Structure
//!
//! - [`entity`] - `ActorEntity` implementation for [`Cart`], and its [`CartContext`]
//! - [`actions`] - [`CartAction`] and the notice each failure maps to
//! - [`error`] - [`CartError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Commit Contract
//!
//! A mutation computes the next entries, writes them to storage, and only then
//! makes them visible and publishes them. A failed lookup or write leaves the cart,
//! its storage and its subscribers exactly as they were, and the failure is sent
//! to the notifier once.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::{CartContext, CartPolicy};
pub use error::*;

use crate::clients::CartClient;
use crate::framework::ResourceActor;
use crate::model::Cart;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
