//! # System Lifecycle
//!
//! Creates the actors, wires them through their `Context`, and shuts them down.
//!
//! Actors are created first and receive their dependencies in `run(context)`. The
//! cart actor's context holds the catalog, the storage backend and the notifier;
//! with the in-process catalog that catalog is a clone of the product actor's
//! client, so the dependency graph is `cart -> product` and has no cycle.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**: [`CartSystem::shutdown`] drops the clients it owns. Any
//!    [`CartStore`](crate::clients::CartStore) still alive keeps the cart actor
//!    running, so drop those first.
//! 2. **Cart actor exits**: its channel closes, the loop ends and the context
//!    (including its product client) is dropped.
//! 3. **Product actor exits**: its last client is gone.
//! 4. **Await completion**: every task is joined, in that order.

pub mod cart_system;
pub mod tracing;

pub use cart_system::*;
pub use tracing::*;
