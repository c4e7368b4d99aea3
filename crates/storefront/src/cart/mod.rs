//! The shopping cart and its local snapshot.
//!
//! [`CartStore`] owns the ordered list of [`CartLine`]s. Every mutation
//! succeeds in memory first, then mirrors the whole cart to storage under
//! [`CART_STORAGE_KEY`]. A failed write is logged and otherwise ignored;
//! use [`CartStore::persist`] to observe storage errors directly.

pub mod storage;

use bandhan_core::{CartLine, DEFAULT_CART_CATEGORY, NewCartItem, ProductId};
use tracing::{debug, warn};

pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};

use crate::checkout::{self, CheckoutError, CheckoutLink, CheckoutSettings, OrderSummary};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "bandhanstore_cart";

/// User-facing confirmation of a cart change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartNotice {
    Added { name: String },
    Removed { name: String },
    Updated { name: String, quantity: u32 },
    Cleared,
}

impl CartNotice {
    /// Message shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added { name } => format!("{name} added to cart!"),
            Self::Removed { name } => format!("{name} removed from cart!"),
            Self::Updated { name, quantity } => format!("{name} quantity set to {quantity}"),
            Self::Cleared => "Cart cleared!".to_string(),
        }
    }
}

/// Owned cart state mirrored to a [`CartStorage`].
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Box<dyn CartStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart saved in `storage`.
    ///
    /// Missing, unreadable or corrupt snapshots yield an empty cart.
    pub fn open(storage: impl CartStorage + 'static) -> Self {
        let storage: Box<dyn CartStorage> = Box::new(storage);
        let lines = match read_snapshot(storage.as_ref()) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %e, "Failed to restore cart, starting empty");
                Vec::new()
            }
        };
        Self { lines, storage }
    }

    /// Open the cart saved in `storage`, reporting storage errors.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the snapshot cannot be read or decoded.
    pub fn restore(storage: impl CartStorage + 'static) -> Result<Self, StorageError> {
        let storage: Box<dyn CartStorage> = Box::new(storage);
        let lines = read_snapshot(storage.as_ref())?;
        Ok(Self { lines, storage })
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find the line for `id`.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Add one unit of `item`.
    ///
    /// An item whose id is already in the cart bumps that line's quantity.
    /// Items without an id get a timestamp id and always start a new line.
    pub fn add_item(&mut self, item: NewCartItem) -> CartNotice {
        let name = item.name.clone();

        let existing = item
            .id
            .as_ref()
            .and_then(|id| self.lines.iter_mut().find(|line| &line.id == id));

        if let Some(line) = existing {
            line.quantity = line.quantity.saturating_add(1);
            debug!(id = %line.id, quantity = line.quantity, "Cart line incremented");
        } else {
            let id = item.id.unwrap_or_else(|| self.fresh_id());
            let category = item
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CART_CATEGORY.to_string());
            debug!(%id, "Cart line added");
            self.lines.push(CartLine {
                id,
                name: item.name,
                price: item.price,
                image: item.image.unwrap_or_default(),
                quantity: 1,
                category,
            });
        }

        self.save();
        CartNotice::Added { name }
    }

    /// Remove the line for `id`. Unknown ids change nothing.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartNotice> {
        let index = self.lines.iter().position(|line| &line.id == id)?;
        let removed = self.lines.remove(index);
        self.save();
        Some(CartNotice::Removed { name: removed.name })
    }

    /// Set the quantity for `id`. Zero or less removes the line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Option<CartNotice> {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let line = self.lines.iter_mut().find(|line| &line.id == id)?;
        line.quantity = quantity;
        let notice = CartNotice::Updated {
            name: line.name.clone(),
            quantity,
        };
        self.save();
        Some(notice)
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartNotice {
        self.lines.clear();
        self.save();
        CartNotice::Cleared
    }

    /// Write the current cart to storage.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be encoded or written.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(&self.lines).map_err(StorageError::Serialize)?;
        self.storage.write(CART_STORAGE_KEY, &snapshot)
    }

    /// The order message for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart is empty.
    pub fn build_order_summary(&self, store_name: &str) -> Result<OrderSummary, CheckoutError> {
        checkout::build_order_summary(&self.lines, store_name)
    }

    /// The WhatsApp hand-off URL for the current cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart is empty, or
    /// `CheckoutError::Phone` if no destination number can be resolved.
    pub fn checkout_link(
        &self,
        footer_phone: Option<&str>,
        store_name: &str,
        settings: &CheckoutSettings,
    ) -> Result<CheckoutLink, CheckoutError> {
        checkout::checkout_link(&self.lines, store_name, footer_phone, settings)
    }

    fn save(&mut self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "Failed to save cart");
        }
    }

    /// Timestamp id not yet used by any line.
    fn fresh_id(&self) -> ProductId {
        let mut millis = chrono::Utc::now().timestamp_millis();
        loop {
            let id = ProductId::from_timestamp_millis(millis);
            if self.line(&id).is_none() {
                return id;
            }
            millis = millis.saturating_add(1);
        }
    }
}

/// Read and decode the snapshot, folding duplicate ids into the first line.
///
/// Only a snapshot that is not a JSON array is corrupt. Entries that cannot
/// be read as a line (no usable id, not an object) are skipped.
fn read_snapshot(storage: &dyn CartStorage) -> Result<Vec<CartLine>, StorageError> {
    let Some(raw) = storage.read(CART_STORAGE_KEY)? else {
        return Ok(Vec::new());
    };

    let entries: Vec<serde_json::Value> =
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            key: CART_STORAGE_KEY.to_string(),
            source,
        })?;

    let mut lines: Vec<CartLine> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let line: CartLine = match serde_json::from_value(entry) {
            Ok(line) => line,
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable cart line");
                continue;
            }
        };
        if let Some(first) = lines.iter_mut().find(|l| l.id == line.id) {
            first.quantity = first.quantity.saturating_add(line.quantity);
        } else {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::Rng;

    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn kurta() -> NewCartItem {
        NewCartItem::new("Kurta", 1200.0).with_id(id("p1"))
    }

    #[test]
    fn test_add_same_id_twice_increments() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(kurta());
        let notice = cart.add_item(kurta());

        assert_eq!(notice.message(), "Kurta added to cart!");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].category, DEFAULT_CART_CATEGORY);
        assert!((cart.total() - 2400.0).abs() < f64::EPSILON);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_without_id_assigns_unique_ids() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(NewCartItem::new("Stole", 300.0));
        cart.add_item(NewCartItem::new("Stole", 300.0));

        assert_eq!(cart.lines().len(), 2);
        assert_ne!(cart.lines()[0].id, cart.lines()[1].id);
        assert!(cart.lines()[0].id.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_remove_and_zero_quantity_agree() {
        let mut removed = CartStore::open(MemoryStorage::new());
        let mut zeroed = CartStore::open(MemoryStorage::new());
        for cart in [&mut removed, &mut zeroed] {
            cart.add_item(kurta());
            cart.add_item(NewCartItem::new("Saree", 4500.0).with_id(id("p2")));
        }

        let a = removed.remove_item(&id("p1"));
        let b = zeroed.set_quantity(&id("p1"), 0);

        assert_eq!(a, b);
        assert_eq!(removed.lines(), zeroed.lines());
        assert_eq!(a.unwrap().message(), "Kurta removed from cart!");
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());
        assert!(cart.remove_item(&id("missing")).is_none());
        assert!(cart.set_quantity(&id("missing"), 3).is_none());
        assert!(storage.read(CART_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_quantity_overwrites() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_item(kurta());
        let notice = cart.set_quantity(&id("p1"), 5).unwrap();

        assert_eq!(
            notice,
            CartNotice::Updated {
                name: "Kurta".to_string(),
                quantity: 5
            }
        );
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());
        cart.add_item(kurta());
        assert_eq!(cart.clear().message(), "Cart cleared!");
        assert!(cart.is_empty());
        assert_eq!(storage.read(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_mutations_are_mirrored() {
        let storage = MemoryStorage::new();
        let mut cart = CartStore::open(storage.clone());
        cart.add_item(kurta());
        cart.add_item(NewCartItem::new("Saree", 4500.0).with_id(id("p2")).with_category("Ethnic"));
        cart.set_quantity(&id("p2"), 3);

        let restored = CartStore::restore(storage).unwrap();
        assert_eq!(restored.lines(), cart.lines());
    }

    #[test]
    fn test_corrupt_snapshot_opens_empty() {
        let storage = MemoryStorage::new();
        storage.seed(CART_STORAGE_KEY, "{not a list").unwrap();

        assert!(matches!(
            CartStore::restore(storage.clone()),
            Err(StorageError::Corrupt { .. })
        ));
        assert!(CartStore::open(storage).is_empty());
    }

    #[test]
    fn test_unreadable_lines_are_skipped() {
        let storage = MemoryStorage::new();
        storage
            .seed(
                CART_STORAGE_KEY,
                r#"[{"id":"p1","name":"Kurta","price":1200,"quantity":2},
                    {"id":"p2","name":"Saree","price":4500},
                    {"id":null,"name":"Broken"},
                    {"name":"No id"},
                    "not a line"]"#,
            )
            .unwrap();

        let cart = CartStore::restore(storage.clone()).unwrap();
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(CartStore::open(storage).lines(), cart.lines());
    }

    #[test]
    fn test_restore_merges_duplicate_ids() {
        let storage = MemoryStorage::new();
        storage
            .seed(
                CART_STORAGE_KEY,
                r#"[{"id":"p1","name":"Kurta","price":1200,"quantity":2},
                    {"id":"p2","name":"Saree","price":4500},
                    {"id":"p1","name":"Kurta","price":1200,"quantity":1}]"#,
            )
            .unwrap();

        let cart = CartStore::restore(storage).unwrap();
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.lines()[1].id.as_str(), "p2");
    }

    #[test]
    fn test_failed_writes_keep_memory_state() {
        let mut cart = CartStore::open(MemoryStorage::read_only());
        cart.add_item(kurta());
        cart.add_item(kurta());

        assert_eq!(cart.item_count(), 2);
        assert!(matches!(cart.persist(), Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn test_summary_requires_items() {
        let mut cart = CartStore::open(MemoryStorage::new());
        assert!(matches!(
            cart.build_order_summary("Bandhan Store"),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(cart.is_empty());

        cart.add_item(kurta());
        let link = cart
            .checkout_link(None, "Bandhan Store", &CheckoutSettings::default())
            .unwrap();
        assert!(link.url.contains("phone=919876543210"));
    }

    #[test]
    fn test_random_operations_keep_totals_consistent() {
        let mut rng = rand::rng();
        let ids = ["a", "b", "c", "d"];
        let prices = [100.0, 249.5, 1200.0, 3599.0];

        for _ in 0..50 {
            let storage = MemoryStorage::new();
            let mut cart = CartStore::open(storage.clone());

            for _ in 0..40 {
                let pick = rng.random_range(0..ids.len());
                let product = id(ids[pick]);
                match rng.random_range(0..4) {
                    0 | 1 => {
                        cart.add_item(
                            NewCartItem::new(ids[pick], prices[pick]).with_id(product),
                        );
                    }
                    2 => {
                        cart.set_quantity(&product, rng.random_range(-1..6));
                    }
                    _ => {
                        cart.remove_item(&product);
                    }
                }

                let expected: f64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.price.amount() * f64::from(l.quantity))
                    .sum();
                assert!((cart.total() - expected).abs() < 1e-6);
                assert!(cart.lines().iter().all(|l| l.quantity >= 1));

                let mut seen: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), cart.lines().len());
            }

            let restored = CartStore::restore(storage).unwrap();
            assert_eq!(restored.lines(), cart.lines());
        }
    }
}
