use anyhow::Context;
use cart_store::catalog::HttpCatalog;
use cart_store::clients::ProductClient;
use cart_store::config::CartConfig;
use cart_store::lifecycle::{setup_tracing, CartSystem};
use cart_store::model::{ProductCreate, ProductId};
use cart_store::notify::TracingNotifier;
use cart_store::storage::FileStorage;
use std::sync::Arc;
use tracing::{info, Instrument};

async fn seed_catalog(products: &ProductClient) -> anyhow::Result<Vec<ProductId>> {
    let seed = [
        ("Tênis de Caminhada Leve Confortável", 179.9, 3),
        ("Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, 5),
        ("Tênis Adidas Duramo Lite 2.0", 219.9, 2),
    ];
    let mut ids = Vec::with_capacity(seed.len());
    for (title, price, stock) in seed {
        let id = products
            .create_product(ProductCreate {
                title: title.to_string(),
                price,
                image: String::new(),
                stock,
            })
            .await?;
        ids.push(id);
    }
    Ok(ids)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = CartConfig::from_env()?;
    let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
    let notifier = Arc::new(TracingNotifier);

    let (system, product_ids) = match &config.api_url {
        Some(url) => {
            let catalog = HttpCatalog::new(url.clone(), config.http_timeout)?;
            info!(%url, "Using remote catalog");
            let system = CartSystem::start(&config, Arc::new(catalog), storage, notifier);
            (system, vec![ProductId(1), ProductId(2), ProductId(3)])
        }
        None => {
            let system = CartSystem::with_local_catalog(&config, storage, notifier);
            let products = system
                .product_client
                .clone()
                .context("local catalog not started")?;
            let ids = seed_catalog(&products).await?;
            (system, ids)
        }
    };

    let store = system.open_default_cart().await?;
    let mut updates = store.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let cart = updates.borrow_and_update().clone();
            info!(entries = cart.len(), "Cart changed");
        }
    });

    let span = tracing::info_span!("shopping_session", cart = %store.id());
    async {
        if let Some(&first) = product_ids.first() {
            for _ in 0..4 {
                // The fourth add exceeds the seeded stock of 3 and is reported as a notice.
                if let Err(e) = store.add_product(first).await {
                    info!(error = %e, "Add rejected");
                }
            }
        }
        if let Some(&second) = product_ids.get(1) {
            let steps = [
                ("add", store.add_product(second).await),
                ("set amount to 2", store.update_product_amount(second, 2).await),
                ("set amount to 0", store.update_product_amount(second, 0).await),
                ("remove", store.remove_product(second).await),
            ];
            for (step, result) in steps {
                match result {
                    Ok(cart) => info!(step, entries = cart.len(), "Cart updated"),
                    Err(e) => info!(step, error = %e, "Request rejected"),
                }
            }
        }
    }
    .instrument(span)
    .await;

    info!(
        total_items = store.total_items(),
        subtotal = store.subtotal(),
        "Session finished"
    );

    drop(store);
    system.shutdown().await?;
    watcher.await?;

    info!("Application completed successfully");
    Ok(())
}
