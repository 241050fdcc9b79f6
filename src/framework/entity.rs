//! The [`ActorEntity`] contract.
//!
//! An entity is the state a [`ResourceActor`](crate::framework::ResourceActor) owns. The
//! carts and the product catalog in this crate are both entities, so the message loop
//! is written once and shared.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they can call out to other services (the cart awaits the
/// product catalog while handling an action). The `Context` type carries those
/// dependencies and is handed to `run()` rather than `new()`, which lets a system
/// create every actor first and wire them afterwards.
///
/// # Sequential Hooks
/// The actor awaits each hook before it takes the next message. Anything an entity
/// reads and then writes inside a single hook is therefore never interleaved with
/// another request for the same actor.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of resource-specific operations (e.g. `AddProduct`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per entity. The actor boxes it into
    /// [`FrameworkError::EntityError`](crate::framework::FrameworkError::EntityError);
    /// clients recover it with
    /// [`FrameworkError::into_entity_error`](crate::framework::FrameworkError::into_entity_error).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from the ID and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity becomes visible.
    /// Returning an error discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
