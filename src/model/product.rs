//! Products and stock as served by the Product/Stock Service.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
///
/// Serialized as the bare integer, matching the service's JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// A product record as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    /// Image URL. Absent in some catalog payloads.
    #[serde(default)]
    pub image: String,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// Available quantity for a product, as returned by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// A product together with its stock level: the entity the in-process product
/// actor manages.
///
/// See [`impl ActorEntity for ProductRecord`](crate::product_actor::entity) for the
/// create/update/action payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub product: Product,
    pub stock: u32,
}

impl ProductRecord {
    pub fn stock(&self) -> Stock {
        Stock {
            id: self.product.id,
            amount: self.stock,
        }
    }
}

/// Payload for registering a product with the product actor.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub title: String,
    pub price: f64,
    pub image: String,
    pub stock: u32,
}

/// Price or stock changes for a registered product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<f64>,
    pub stock: Option<u32>,
}
