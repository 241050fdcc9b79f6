//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber::fmt` subscriber filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actor loop tags
//! every line with an `entity_type` field instead.
//!
//! **With `RUST_LOG=info`**, a short shopping session reads:
//!
//! ```text
//! INFO Actor started entity_type="ProductRecord"
//! INFO Actor started entity_type="Cart"
//! INFO Hydrated cart=cart_1 entries=0
//! INFO Created entity_type="Cart" id=cart_1 size=1
//! INFO Action ok entity_type="Cart" id=cart_1
//! WARN Action failed entity_type="Cart" id=cart_1 error=Insufficient stock for product_1: requested 4, available 3
//! WARN Requested amount is out of stock notice=InsufficientStock
//! ```
//!
//! **With `RUST_LOG=debug`** each request also logs its payload (`Action ... action=AddProduct(product_1)`)
//! and every commit logs the number of entries written.

/// Installs the global subscriber. Calling it again is a no-op, so tests and
/// binaries can both call it.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
