//! Request messages exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message type sent to the actor.
///
/// The variants map to CRUD operations plus `Action` for entity-specific
/// operations. Payload types come from the entity's associated types, so a cart
/// payload cannot be sent to the product actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short name of the operation, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "create",
            ResourceRequest::Get { .. } => "get",
            ResourceRequest::Update { .. } => "update",
            ResourceRequest::Delete { .. } => "delete",
            ResourceRequest::Action { .. } => "action",
        }
    }
}
