//! Generic actor framework for resource management.
//!
//! An entity type implements [`ActorEntity`]; a [`ResourceActor`] owns every instance
//! of it on one Tokio task and processes CRUD and custom action requests one at a
//! time; a [`ResourceClient`] is the cloneable handle that sends those requests.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that manages entities
//! - [`ResourceClient`] - Typed, cloneable client for one actor
//! - [`FrameworkError`] - Plumbing errors and boxed entity errors
//!
//! # Testing
//!
//! See the [`mock`] module for driving code that depends on a client without
//! spawning the real actor behind it.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
