//! Pure data structures shared by the actors, the catalog adapters and consumers.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
