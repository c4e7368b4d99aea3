//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::cart::{CartStore, FileStorage};
use crate::catalog::{CatalogError, CatalogLoader};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The storefront serves a
/// single shopper, so there is exactly one cart; handlers take the lock
/// for the duration of one cart operation.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogLoader,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create a new application state with a file-backed cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogLoader::new(&config.catalog)?;
        let cart = CartStore::open(FileStorage::new(&config.cart_dir));
        Ok(Self::with_parts(config, catalog, cart))
    }

    /// Assemble state from prebuilt parts.
    #[must_use]
    pub fn with_parts(config: StorefrontConfig, catalog: CatalogLoader, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog loader.
    #[must_use]
    pub fn catalog(&self) -> &CatalogLoader {
        &self.inner.catalog
    }

    /// Lock the cart.
    ///
    /// Mutations save the snapshot synchronously before they return, so the
    /// file write happens while this lock is held. Snapshots are a few
    /// kilobytes and there is one shopper; concurrent requests queue on the
    /// lock and each sees the previous request's write on disk.
    pub async fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bandhan_core::{NewCartItem, ProductId};

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_are_all_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            cart_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config).unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move {
                    let item = NewCartItem::new("Kurta", 1200.0)
                        .with_id(ProductId::parse("p1").unwrap());
                    state.cart().await.add_item(item);
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        // Reading the file while holding the lock sees every write.
        let cart = state.cart().await;
        let on_disk = CartStore::restore(FileStorage::new(dir.path())).unwrap();
        assert_eq!(cart.item_count(), 8);
        assert_eq!(on_disk.lines(), cart.lines());
    }
}
