//! Custom actions for the Cart actor.
//!
//! Every cart mutation is an action, so the actor applies them one at a time: a
//! stock lookup and the write that depends on it are never interleaved with
//! another mutation of the same cart.

use crate::cart_actor::CartError;
use crate::model::{ProductId, UpdateProductAmount};
use crate::notify::{Notice, RemoveFailure};

/// Mutations of a [`Cart`](crate::model::Cart).
///
/// Each action answers with the cart snapshot after the action, which is the
/// unchanged cart when the request was ignored.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of a product, appending a new entry if needed.
    AddProduct(ProductId),
    /// Removes a product's entry entirely.
    RemoveProduct(ProductId),
    /// Sets the amount of an entry; non-positive amounts are ignored.
    UpdateProductAmount(UpdateProductAmount),
    /// Empties the cart and deletes its stored value.
    Clear,
}

impl CartAction {
    /// The notice the user sees when this action fails with `error`.
    pub fn failure_notice(&self, error: &CartError) -> Notice {
        match (self, error) {
            (_, CartError::InsufficientStock { .. }) => Notice::InsufficientStock,
            (CartAction::AddProduct(_), _) => Notice::AddFailed,
            (CartAction::RemoveProduct(_), CartError::NotFoundInCart(_)) => {
                Notice::RemoveFailed(RemoveFailure::NotInCart)
            }
            (CartAction::RemoveProduct(_) | CartAction::Clear, _) => {
                Notice::RemoveFailed(RemoveFailure::Persistence)
            }
            (CartAction::UpdateProductAmount(_), _) => Notice::UpdateFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::storage::StorageError;

    fn insufficient() -> CartError {
        CartError::InsufficientStock {
            product_id: ProductId(1),
            requested: 3,
            available: 2,
        }
    }

    #[test]
    fn test_notice_per_action() {
        let add = CartAction::AddProduct(ProductId(1));
        let remove = CartAction::RemoveProduct(ProductId(1));
        let update = CartAction::UpdateProductAmount(UpdateProductAmount {
            product_id: ProductId(1),
            amount: 3,
        });
        let lookup = CartError::Service(CatalogError::NotFound(ProductId(1)));
        let write = CartError::Persistence(StorageError::Unavailable("full".into()));

        assert_eq!(add.failure_notice(&insufficient()), Notice::InsufficientStock);
        assert_eq!(add.failure_notice(&lookup), Notice::AddFailed);
        assert_eq!(add.failure_notice(&write), Notice::AddFailed);

        assert_eq!(
            remove.failure_notice(&CartError::NotFoundInCart(ProductId(1))),
            Notice::RemoveFailed(RemoveFailure::NotInCart)
        );
        assert_eq!(
            remove.failure_notice(&write),
            Notice::RemoveFailed(RemoveFailure::Persistence)
        );

        assert_eq!(update.failure_notice(&insufficient()), Notice::InsufficientStock);
        assert_eq!(update.failure_notice(&lookup), Notice::UpdateFailed);
    }
}
