//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod render;

use std::io::Write;
use std::time::Duration;

use bandhan_storefront::cart::{CartStore, FileStorage, MemoryStorage};
use bandhan_storefront::catalog::{CatalogError, CatalogLoader, CatalogSettings, CatalogSource};
use bandhan_storefront::checkout::CheckoutSettings;

use crate::StoreArgs;

/// Catalog loader for one-shot commands. Caching is disabled.
pub fn catalog_loader(store: &StoreArgs) -> Result<CatalogLoader, CatalogError> {
    let defaults = CatalogSettings::default();
    let settings = CatalogSettings {
        source: store
            .source
            .as_deref()
            .map_or(defaults.source, CatalogSource::parse),
        cache_ttl: Duration::ZERO,
        fetch_timeout: defaults.fetch_timeout,
    };
    CatalogLoader::new(&settings)
}

/// Open the saved cart, or an empty in-memory one with `--ephemeral`.
pub fn open_cart(store: &StoreArgs) -> CartStore {
    if store.ephemeral {
        CartStore::open(MemoryStorage::new())
    } else {
        CartStore::open(FileStorage::new(store.cart_dir.clone()))
    }
}

/// Checkout destination settings, with flags overriding the defaults.
pub fn checkout_settings(store: &StoreArgs) -> CheckoutSettings {
    let defaults = CheckoutSettings::default();
    CheckoutSettings {
        fallback_phone: store.fallback_phone.clone().unwrap_or(defaults.fallback_phone),
        country_code: store.country_code.clone().unwrap_or(defaults.country_code),
    }
}

/// Write command output to stdout.
pub fn emit(text: &str) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}
