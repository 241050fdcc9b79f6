//! The cart entity and its entries.
//!
//! The [`ActorEntity`](crate::framework::ActorEntity) implementation lives in
//! [`cart_actor::entity`](crate::cart_actor::entity); this module only holds the data
//! and the pure operations on it.

use crate::model::product::{Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::watch;

/// Type-safe identifier for Carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// A product placed in the cart, with its quantity.
///
/// Persisted as the product's fields flattened next to `amount`:
/// `{"id":1,"title":"Shoe","price":100.0,"image":"","amount":2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartEntry {
    pub fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}

/// An immutable view of the cart, shared by every subscriber.
pub type CartSnapshot = Arc<[CartEntry]>;

/// Request to set the quantity of a cart entry.
///
/// `amount` is signed: zero and negative values are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Payload for opening a cart backed by `storage_key`.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub storage_key: String,
}

/// A shopping cart: ordered entries, at most one per product.
///
/// Every committed state is published on a `watch` channel; [`Cart::subscribe`]
/// hands out receivers.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: CartId,
    storage_key: String,
    entries: Vec<CartEntry>,
    published: Arc<watch::Sender<CartSnapshot>>,
}

impl Cart {
    pub fn new(id: CartId, storage_key: impl Into<String>) -> Self {
        let (published, _) = watch::channel(CartSnapshot::from(Vec::new()));
        Self {
            id,
            storage_key: storage_key.into(),
            entries: Vec::new(),
            published: Arc::new(published),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn entry(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entry(product_id).is_some()
    }

    /// The last published snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.published.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.published.subscribe()
    }

    /// Replaces the entries and publishes them. Callers persist first.
    pub(crate) fn replace(&mut self, entries: Vec<CartEntry>) -> CartSnapshot {
        let snapshot = CartSnapshot::from(entries.clone());
        self.entries = entries;
        self.published.send_replace(snapshot.clone());
        snapshot
    }
}

/// Drops entries that would break the cart invariants: zero amounts and repeated
/// product ids (the first occurrence wins). Returns the number of dropped entries.
pub fn sanitize_entries(entries: &mut Vec<CartEntry>) -> usize {
    let before = entries.len();
    let mut seen = HashSet::new();
    entries.retain(|entry| entry.amount > 0 && seen.insert(entry.id()));
    before - entries.len()
}

/// Sum of the quantities of all entries.
pub fn total_items(entries: &[CartEntry]) -> u64 {
    entries.iter().map(|entry| u64::from(entry.amount)).sum()
}

/// Sum of price times amount over all entries.
pub fn subtotal(entries: &[CartEntry]) -> f64 {
    entries.iter().map(CartEntry::line_total).sum()
}
