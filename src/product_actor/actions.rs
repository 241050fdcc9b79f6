//! Custom actions for the Product actor.

/// Custom actions for [`ProductRecord`](crate::model::ProductRecord) entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
}
