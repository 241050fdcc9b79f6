//! # Cart Store
//!
//! A shopping-cart state store for a storefront. The cart is an ordered list of
//! products with quantities; it checks quantities against a Product/Stock Service,
//! persists every committed change under a single storage key, reports failures to
//! a notification sink, and publishes each new cart to its subscribers.
//!
//! ## Design
//!
//! ### Single writer
//! Each cart lives inside a generic [`ResourceActor`](framework::ResourceActor) that
//! handles one request at a time and awaits the stock lookup inside the handler. A
//! stock check and the write that depends on it always see the same cart, so two
//! rapid `add_product` calls for one product are applied one after the other.
//!
//! ### Persist, then publish
//! A mutation builds the next cart, writes it to [`storage`], and only then makes it
//! visible. A failed lookup or write leaves memory, storage and subscribers as they
//! were, and sends one [`Notice`](notify::Notice).
//!
//! ### Injected dependencies
//! The product catalog, the storage backend and the notifier are traits handed to
//! the cart actor in `run(context)`:
//!
//! | Port | Adapters |
//! |------|----------|
//! | [`ProductCatalog`](catalog::ProductCatalog) | [`ProductClient`](clients::ProductClient) (in-process actor), [`HttpCatalog`](catalog::HttpCatalog) |
//! | [`Storage`](storage::Storage) | [`MemoryStorage`](storage::MemoryStorage), [`FileStorage`](storage::FileStorage) |
//! | [`Notifier`](notify::Notifier) | [`TracingNotifier`](notify::TracingNotifier), [`ChannelNotifier`](notify::ChannelNotifier), [`RecordingNotifier`](notify::RecordingNotifier) |
//!
//! ## Module Tour
//!
//! - [`framework`] - the generic actor, client, errors and mocks
//! - [`model`] - carts, entries, products and stock
//! - [`cart_actor`] / [`product_actor`] - the two entities built on the framework
//! - [`clients`] - typed clients and the [`CartStore`](clients::CartStore) facade
//! - [`lifecycle`] - [`CartSystem`](lifecycle::CartSystem) startup/shutdown and tracing setup
//! - [`config`] - `CART_*` environment configuration
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod product_actor;
pub mod storage;
