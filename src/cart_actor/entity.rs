//! `ActorEntity` implementation for [`Cart`].
//!
//! The cart depends on three collaborators, injected as its [`CartContext`] when the
//! actor starts: the product catalog, the storage backend and the notifier.

use crate::cart_actor::{CartAction, CartError};
use crate::catalog::ProductCatalog;
use crate::framework::ActorEntity;
use crate::model::{
    sanitize_entries, Cart, CartCreate, CartEntry, CartId, CartSnapshot, ProductId,
    UpdateProductAmount,
};
use crate::notify::Notifier;
use crate::storage::{Storage, StorageError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Behaviour switches for the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartPolicy {
    /// When set, adding a product that is not yet in the cart first checks that at
    /// least one unit is in stock. Off by default: new entries are added without a
    /// stock lookup.
    pub check_stock_on_first_add: bool,
}

/// Dependencies of the cart actor.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn ProductCatalog>,
    pub storage: Arc<dyn Storage>,
    pub notifier: Arc<dyn Notifier>,
    pub policy: CartPolicy,
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartSnapshot;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id, params.storage_key))
    }

    /// Loads the persisted entries. Never fails: a missing, unreadable or corrupt
    /// value opens an empty cart.
    async fn on_create(&mut self, ctx: &CartContext) -> Result<(), Self::Error> {
        let entries = self.load(ctx.storage.as_ref());
        info!(cart = %self.id, entries = entries.len(), "Hydrated");
        self.replace(entries);
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &CartContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartSnapshot, Self::Error> {
        let result = match &action {
            CartAction::AddProduct(product_id) => self.add_product(*product_id, ctx).await,
            CartAction::RemoveProduct(product_id) => self.remove_product(*product_id, ctx),
            CartAction::UpdateProductAmount(request) => {
                self.update_product_amount(*request, ctx).await
            }
            CartAction::Clear => self.clear(ctx),
        };
        if let Err(e) = &result {
            ctx.notifier.notify(action.failure_notice(e));
        }
        result
    }
}

impl Cart {
    fn load(&self, storage: &dyn Storage) -> Vec<CartEntry> {
        let raw = match storage.get(self.storage_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(cart = %self.id, error = %e, "Stored cart unreadable, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<CartEntry>>(&raw) {
            Ok(mut entries) => {
                let dropped = sanitize_entries(&mut entries);
                if dropped > 0 {
                    warn!(cart = %self.id, dropped, "Dropped invalid stored entries");
                }
                entries
            }
            Err(e) => {
                warn!(cart = %self.id, error = %e, "Stored cart corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Persists `next`, then publishes it.
    fn commit(
        &mut self,
        next: Vec<CartEntry>,
        ctx: &CartContext,
    ) -> Result<CartSnapshot, CartError> {
        let encoded = serde_json::to_string(&next).map_err(StorageError::from)?;
        ctx.storage.set(self.storage_key(), &encoded)?;
        debug!(cart = %self.id, entries = next.len(), "Committed");
        Ok(self.replace(next))
    }

    async fn add_product(
        &mut self,
        product_id: ProductId,
        ctx: &CartContext,
    ) -> Result<CartSnapshot, CartError> {
        let mut next = self.entries().to_vec();

        if let Some(index) = next.iter().position(|entry| entry.id() == product_id) {
            let requested = u64::from(next[index].amount) + 1;
            let stock = ctx.catalog.get_stock(product_id).await?;
            let Some(amount) = u32::try_from(requested)
                .ok()
                .filter(|amount| *amount <= stock.amount)
            else {
                return Err(CartError::InsufficientStock {
                    product_id,
                    requested,
                    available: stock.amount,
                });
            };
            next[index].amount = amount;
        } else {
            let product = ctx.catalog.get_product(product_id).await?;
            if ctx.policy.check_stock_on_first_add {
                let stock = ctx.catalog.get_stock(product_id).await?;
                if stock.amount < 1 {
                    return Err(CartError::InsufficientStock {
                        product_id,
                        requested: 1,
                        available: stock.amount,
                    });
                }
            }
            next.push(CartEntry::new(product, 1));
        }

        self.commit(next, ctx)
    }

    /// Empties the cart and deletes its stored value.
    fn clear(&mut self, ctx: &CartContext) -> Result<CartSnapshot, CartError> {
        ctx.storage.remove(self.storage_key())?;
        debug!(cart = %self.id, "Cleared");
        Ok(self.replace(Vec::new()))
    }

    fn remove_product(
        &mut self,
        product_id: ProductId,
        ctx: &CartContext,
    ) -> Result<CartSnapshot, CartError> {
        if !self.contains(product_id) {
            return Err(CartError::NotFoundInCart(product_id));
        }
        let next = self
            .entries()
            .iter()
            .filter(|entry| entry.id() != product_id)
            .cloned()
            .collect();
        self.commit(next, ctx)
    }

    async fn update_product_amount(
        &mut self,
        request: UpdateProductAmount,
        ctx: &CartContext,
    ) -> Result<CartSnapshot, CartError> {
        let UpdateProductAmount { product_id, amount } = request;
        if amount <= 0 {
            debug!(cart = %self.id, %product_id, amount, "Ignoring non-positive amount");
            return Ok(self.snapshot());
        }
        let requested = amount.unsigned_abs();

        let stock = ctx.catalog.get_stock(product_id).await?;
        if u64::from(stock.amount) < requested {
            return Err(CartError::InsufficientStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        let mut next = self.entries().to_vec();
        let Some(entry) = next.iter_mut().find(|entry| entry.id() == product_id) else {
            debug!(cart = %self.id, %product_id, "Amount update for product not in cart");
            return Ok(self.snapshot());
        };
        // Fits: bounded by the u32 stock level checked above.
        entry.amount = u32::try_from(requested).unwrap_or(stock.amount);
        self.commit(next, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::model::{Product, Stock};
    use crate::notify::{Notice, RecordingNotifier, RemoveFailure};
    use crate::storage::MemoryStorage;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const KEY: &str = "@RocketShoes:cart";

    #[derive(Default)]
    struct FakeCatalog {
        items: Mutex<HashMap<ProductId, (Product, u32)>>,
        offline: Mutex<bool>,
        stock_lookups: AtomicUsize,
    }

    impl FakeCatalog {
        fn with(items: &[(u32, &str, f64, u32)]) -> Self {
            let catalog = Self::default();
            for (id, title, price, stock) in items {
                catalog.items.lock().unwrap().insert(
                    ProductId(*id),
                    (Product::new(*id, *title, *price), *stock),
                );
            }
            catalog
        }

        fn set_offline(&self, offline: bool) {
            *self.offline.lock().unwrap() = offline;
        }

        fn check_online(&self) -> Result<(), CatalogError> {
            if *self.offline.lock().unwrap() {
                return Err(CatalogError::Transport("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProductCatalog for FakeCatalog {
        async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
            self.check_online()?;
            self.items
                .lock()
                .unwrap()
                .get(&id)
                .map(|(product, _)| product.clone())
                .ok_or(CatalogError::NotFound(id))
        }

        async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
            self.check_online()?;
            self.stock_lookups.fetch_add(1, Ordering::SeqCst);
            self.items
                .lock()
                .unwrap()
                .get(&id)
                .map(|(_, amount)| Stock { id, amount: *amount })
                .ok_or(CatalogError::NotFound(id))
        }
    }

    struct Harness {
        cart: Cart,
        ctx: CartContext,
        catalog: Arc<FakeCatalog>,
        storage: Arc<MemoryStorage>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Harness {
        async fn new(catalog: FakeCatalog, storage: MemoryStorage, policy: CartPolicy) -> Self {
            let catalog = Arc::new(catalog);
            let storage = Arc::new(storage);
            let notifier = Arc::new(RecordingNotifier::new());
            let ctx = CartContext {
                catalog: catalog.clone(),
                storage: storage.clone(),
                notifier: notifier.clone(),
                policy,
            };
            let mut cart = Cart::from_create_params(
                CartId(1),
                CartCreate {
                    storage_key: KEY.to_string(),
                },
            )
            .unwrap();
            cart.on_create(&ctx).await.unwrap();
            Self {
                cart,
                ctx,
                catalog,
                storage,
                notifier,
            }
        }

        async fn act(&mut self, action: CartAction) -> Result<CartSnapshot, CartError> {
            self.cart.handle_action(action, &self.ctx).await
        }

        fn persisted(&self) -> Option<Vec<CartEntry>> {
            self.storage
                .get(KEY)
                .unwrap()
                .map(|raw| serde_json::from_str(&raw).unwrap())
        }
    }

    fn shoe() -> Product {
        Product::new(1, "Shoe", 100.0)
    }

    fn stored(entries: &[CartEntry]) -> MemoryStorage {
        MemoryStorage::with_value(KEY, serde_json::to_string(entries).unwrap())
    }

    fn update(id: u32, amount: i64) -> CartAction {
        CartAction::UpdateProductAmount(UpdateProductAmount {
            product_id: ProductId(id),
            amount,
        })
    }

    #[tokio::test]
    async fn test_add_new_product_appends_with_amount_one() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 5)]);
        let mut h = Harness::new(catalog, MemoryStorage::new(), CartPolicy::default()).await;

        let snapshot = h.act(CartAction::AddProduct(ProductId(1))).await.unwrap();

        assert_eq!(&*snapshot, &[CartEntry::new(shoe(), 1)]);
        assert_eq!(h.persisted().unwrap(), snapshot.to_vec());
        assert_eq!(
            h.storage.get(KEY).unwrap().unwrap(),
            serde_json::to_string(&*snapshot).unwrap()
        );
        assert!(h.notifier.notices().is_empty());
        // New entries are not stock-checked by default.
        assert_eq!(h.catalog.stock_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_add_preserves_append_order() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 5), (2, "Boot", 150.0, 5)]);
        let mut h = Harness::new(catalog, MemoryStorage::new(), CartPolicy::default()).await;

        h.act(CartAction::AddProduct(ProductId(2))).await.unwrap();
        h.act(CartAction::AddProduct(ProductId(1))).await.unwrap();
        let snapshot = h.act(CartAction::AddProduct(ProductId(2))).await.unwrap();

        let ids: Vec<_> = snapshot.iter().map(|e| (e.id().0, e.amount)).collect();
        assert_eq!(ids, vec![(2, 2), (1, 1)]);
    }

    #[tokio::test]
    async fn test_add_existing_increments_when_stock_allows() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 3)]);
        let storage = stored(&[CartEntry::new(shoe(), 2)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;

        let snapshot = h.act(CartAction::AddProduct(ProductId(1))).await.unwrap();

        assert_eq!(snapshot[0].amount, 3);
        assert_eq!(h.persisted().unwrap()[0].amount, 3);
    }

    #[tokio::test]
    async fn test_add_existing_rejected_when_stock_exhausted() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 2)]);
        let storage = stored(&[CartEntry::new(shoe(), 2)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;

        let err = h.act(CartAction::AddProduct(ProductId(1))).await.unwrap_err();

        assert!(matches!(
            err,
            CartError::InsufficientStock {
                requested: 3,
                available: 2,
                ..
            }
        ));
        assert_eq!(h.cart.entries(), &[CartEntry::new(shoe(), 2)]);
        assert_eq!(h.persisted().unwrap(), vec![CartEntry::new(shoe(), 2)]);
        assert_eq!(h.notifier.notices(), vec![Notice::InsufficientStock]);
    }

    #[tokio::test]
    async fn test_add_unknown_product_reports_add_failure() {
        let catalog = FakeCatalog::with(&[]);
        let mut h = Harness::new(catalog, MemoryStorage::new(), CartPolicy::default()).await;

        let err = h.act(CartAction::AddProduct(ProductId(9))).await.unwrap_err();

        assert!(matches!(err, CartError::Service(CatalogError::NotFound(ProductId(9)))));
        assert!(h.cart.entries().is_empty());
        assert_eq!(h.persisted(), None);
        assert_eq!(h.notifier.notices(), vec![Notice::AddFailed]);
    }

    #[tokio::test]
    async fn test_add_with_service_down_reports_add_failure() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 5)]);
        let storage = stored(&[CartEntry::new(shoe(), 1)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;
        h.catalog.set_offline(true);

        let err = h.act(CartAction::AddProduct(ProductId(1))).await.unwrap_err();

        assert!(matches!(err, CartError::Service(CatalogError::Transport(_))));
        assert_eq!(h.cart.entries()[0].amount, 1);
        assert_eq!(h.notifier.notices(), vec![Notice::AddFailed]);
    }

    #[tokio::test]
    async fn test_first_add_ignores_empty_stock_by_default() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 0)]);
        let mut h = Harness::new(catalog, MemoryStorage::new(), CartPolicy::default()).await;

        let snapshot = h.act(CartAction::AddProduct(ProductId(1))).await.unwrap();

        assert_eq!(&*snapshot, &[CartEntry::new(shoe(), 1)]);
    }

    #[tokio::test]
    async fn test_first_add_checks_stock_when_policy_enabled() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 0), (2, "Boot", 150.0, 1)]);
        let policy = CartPolicy {
            check_stock_on_first_add: true,
        };
        let mut h = Harness::new(catalog, MemoryStorage::new(), policy).await;

        let err = h.act(CartAction::AddProduct(ProductId(1))).await.unwrap_err();
        assert!(matches!(
            err,
            CartError::InsufficientStock {
                requested: 1,
                available: 0,
                ..
            }
        ));
        assert_eq!(h.notifier.take(), vec![Notice::InsufficientStock]);

        let snapshot = h.act(CartAction::AddProduct(ProductId(2))).await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), ProductId(2));
    }

    #[tokio::test]
    async fn test_remove_deletes_only_that_entry() {
        let boot = Product::new(2, "Boot", 150.0);
        let storage = stored(&[CartEntry::new(shoe(), 1), CartEntry::new(boot.clone(), 4)]);
        let mut h = Harness::new(FakeCatalog::default(), storage, CartPolicy::default()).await;

        let snapshot = h.act(CartAction::RemoveProduct(ProductId(1))).await.unwrap();

        assert_eq!(&*snapshot, &[CartEntry::new(boot.clone(), 4)]);
        assert_eq!(h.persisted().unwrap(), vec![CartEntry::new(boot, 4)]);
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_reports_not_in_cart() {
        let storage = stored(&[CartEntry::new(shoe(), 1)]);
        let mut h = Harness::new(FakeCatalog::default(), storage, CartPolicy::default()).await;

        let err = h.act(CartAction::RemoveProduct(ProductId(5))).await.unwrap_err();

        assert!(matches!(err, CartError::NotFoundInCart(ProductId(5))));
        assert_eq!(h.cart.entries(), &[CartEntry::new(shoe(), 1)]);
        assert_eq!(
            h.notifier.notices(),
            vec![Notice::RemoveFailed(RemoveFailure::NotInCart)]
        );
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cart_untouched() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 5), (2, "Boot", 150.0, 5)]);
        let storage = stored(&[CartEntry::new(shoe(), 1)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;
        let mut subscriber = h.cart.subscribe();
        subscriber.borrow_and_update();
        h.storage.fail_writes(true);

        let removed = h.act(CartAction::RemoveProduct(ProductId(1))).await;
        let added = h.act(CartAction::AddProduct(ProductId(2))).await;
        let updated = h.act(update(1, 3)).await;

        assert!(matches!(removed, Err(CartError::Persistence(_))));
        assert!(matches!(added, Err(CartError::Persistence(_))));
        assert!(matches!(updated, Err(CartError::Persistence(_))));
        assert_eq!(h.cart.entries(), &[CartEntry::new(shoe(), 1)]);
        assert_eq!(h.persisted().unwrap(), vec![CartEntry::new(shoe(), 1)]);
        assert!(!subscriber.has_changed().unwrap());
        assert_eq!(
            h.notifier.notices(),
            vec![
                Notice::RemoveFailed(RemoveFailure::Persistence),
                Notice::AddFailed,
                Notice::UpdateFailed,
            ]
        );
    }

    #[tokio::test]
    async fn test_add_at_amount_ceiling_is_rejected() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, u32::MAX)]);
        let storage = stored(&[CartEntry::new(shoe(), u32::MAX)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;

        let err = h.act(CartAction::AddProduct(ProductId(1))).await.unwrap_err();

        assert!(matches!(
            err,
            CartError::InsufficientStock {
                available: u32::MAX,
                ..
            }
        ));
        assert_eq!(h.cart.entries()[0].amount, u32::MAX);
        assert_eq!(h.notifier.notices(), vec![Notice::InsufficientStock]);
    }

    #[tokio::test]
    async fn test_clear_empties_cart_and_storage() {
        let storage = stored(&[CartEntry::new(shoe(), 2)]);
        let mut h = Harness::new(FakeCatalog::default(), storage, CartPolicy::default()).await;

        h.storage.fail_writes(true);
        let err = h.act(CartAction::Clear).await.unwrap_err();
        assert!(matches!(err, CartError::Persistence(_)));
        assert_eq!(h.cart.entries().len(), 1);
        assert_eq!(
            h.notifier.take(),
            vec![Notice::RemoveFailed(RemoveFailure::Persistence)]
        );

        h.storage.fail_writes(false);
        let snapshot = h.act(CartAction::Clear).await.unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(h.persisted(), None);
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_update_non_positive_amount_is_silent_noop() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 5)]);
        let storage = stored(&[CartEntry::new(shoe(), 1)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;

        for amount in [0, -5] {
            let snapshot = h.act(update(1, amount)).await.unwrap();
            assert_eq!(&*snapshot, &[CartEntry::new(shoe(), 1)]);
        }

        assert!(h.notifier.notices().is_empty());
        assert_eq!(h.catalog.stock_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_sets_amount_within_stock() {
        let boot = Product::new(2, "Boot", 150.0);
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 4), (2, "Boot", 150.0, 9)]);
        let storage = stored(&[CartEntry::new(shoe(), 1), CartEntry::new(boot.clone(), 2)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;

        let snapshot = h.act(update(1, 4)).await.unwrap();

        assert_eq!(
            &*snapshot,
            &[CartEntry::new(shoe(), 4), CartEntry::new(boot, 2)]
        );
        assert_eq!(h.persisted().unwrap(), snapshot.to_vec());
    }

    #[tokio::test]
    async fn test_update_beyond_stock_is_rejected() {
        let catalog = FakeCatalog::with(&[(1, "Shoe", 100.0, 4)]);
        let storage = stored(&[CartEntry::new(shoe(), 1)]);
        let mut h = Harness::new(catalog, storage, CartPolicy::default()).await;

        let err = h.act(update(1, 5)).await.unwrap_err();

        assert!(matches!(
            err,
            CartError::InsufficientStock {
                requested: 5,
                available: 4,
                ..
            }
        ));
        assert_eq!(h.cart.entries()[0].amount, 1);
        assert_eq!(h.notifier.notices(), vec![Notice::InsufficientStock]);
    }

    #[tokio::test]
    async fn test_update_with_lookup_failure_reports_update_failure() {
        let storage = stored(&[CartEntry::new(shoe(), 1)]);
        let mut h = Harness::new(FakeCatalog::default(), storage, CartPolicy::default()).await;

        let err = h.act(update(1, 2)).await.unwrap_err();

        assert!(matches!(err, CartError::Service(CatalogError::NotFound(_))));
        assert_eq!(h.notifier.notices(), vec![Notice::UpdateFailed]);
    }

    #[tokio::test]
    async fn test_update_for_product_not_in_cart_changes_nothing() {
        let catalog = FakeCatalog::with(&[(7, "Sock", 5.0, 10)]);
        let mut h = Harness::new(catalog, MemoryStorage::new(), CartPolicy::default()).await;

        let snapshot = h.act(update(7, 2)).await.unwrap();

        assert!(snapshot.is_empty());
        assert_eq!(h.persisted(), None);
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_hydration_tolerates_bad_storage() {
        let corrupt = MemoryStorage::with_value(KEY, "{not json");
        let h = Harness::new(FakeCatalog::default(), corrupt, CartPolicy::default()).await;
        assert!(h.cart.entries().is_empty());

        let duplicated = stored(&[
            CartEntry::new(shoe(), 2),
            CartEntry::new(shoe(), 7),
            CartEntry::new(Product::new(2, "Boot", 150.0), 0),
        ]);
        let h = Harness::new(FakeCatalog::default(), duplicated, CartPolicy::default()).await;
        assert_eq!(h.cart.entries(), &[CartEntry::new(shoe(), 2)]);
        assert_eq!(&*h.cart.snapshot(), &[CartEntry::new(shoe(), 2)]);
    }
}
