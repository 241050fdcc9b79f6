//! The generic actor server.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{ResourceRequest, Response};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel, and processes one request at a time. Hooks are
/// awaited inside the loop, so a request that suspends on a remote lookup still
/// holds exclusive access to its entity until it answers; no `Mutex` is needed.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// IDs are assigned from an internal `u32` counter starting at 1.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the mpsc channel; when it is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Cart" rather than "cart_store::model::cart::Cart"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            debug!(entity_type, kind = msg.kind(), "Request");
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    self.handle_create(entity_type, params, respond_to, &context)
                        .await;
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    self.handle_update(entity_type, id, update, respond_to, &context)
                        .await;
                }
                ResourceRequest::Delete { id, respond_to } => {
                    self.handle_delete(entity_type, id, respond_to, &context)
                        .await;
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    self.handle_action(entity_type, id, action, respond_to, &context)
                        .await;
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle_create(
        &mut self,
        entity_type: &str,
        params: T::Create,
        respond_to: Response<T::Id>,
        context: &T::Context,
    ) {
        debug!(entity_type, ?params, "Create");
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = match T::from_create_params(id.clone(), params) {
            Ok(item) => item,
            Err(e) => {
                warn!(entity_type, error = %e, "Create failed");
                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                return;
            }
        };
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, %id, error = %e, "on_create failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }
        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        let _ = respond_to.send(Ok(id));
    }

    async fn handle_update(
        &mut self,
        entity_type: &str,
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
        context: &T::Context,
    ) {
        debug!(entity_type, %id, ?update, "Update");
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };
        match item.on_update(update, context).await {
            Ok(()) => {
                info!(entity_type, %id, "Updated");
                let _ = respond_to.send(Ok(item.clone()));
            }
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Update failed");
                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            }
        }
    }

    async fn handle_delete(
        &mut self,
        entity_type: &str,
        id: T::Id,
        respond_to: Response<()>,
        context: &T::Context,
    ) {
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        let _ = respond_to.send(Ok(()));
    }

    async fn handle_action(
        &mut self,
        entity_type: &str,
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
        context: &T::Context,
    ) {
        debug!(entity_type, %id, ?action, "Action");
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };
        let result = item
            .handle_action(action, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
        match &result {
            Ok(_) => info!(entity_type, %id, "Action ok"),
            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
        }
        let _ = respond_to.send(result);
    }
}
