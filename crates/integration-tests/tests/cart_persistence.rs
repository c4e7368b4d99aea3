//! Integration tests for the cart snapshot on disk.
//!
//! Each test reopens the cart from a fresh `FileStorage`, the way a restarted
//! storefront would.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::BTreeMap;
use std::path::Path;

use bandhan_core::{NewCartItem, ProductId};
use bandhan_storefront::cart::{
    CART_STORAGE_KEY, CartStorage, CartStore, FileStorage, StorageError,
};
use rand::Rng;

fn reopen(dir: &Path) -> CartStore {
    CartStore::open(FileStorage::new(dir.to_path_buf()))
}

fn id(s: &str) -> ProductId {
    ProductId::parse(s).unwrap()
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cart = reopen(dir.path());
        cart.add_item(
            NewCartItem::new("Silk Kurta", 1200.0)
                .with_id(id("p1"))
                .with_image("/img/silk.jpg")
                .with_category("Kurta Sets"),
        );
        cart.add_item(NewCartItem::new("Silk Kurta", 1200.0).with_id(id("p1")));
        cart.add_item(NewCartItem::new("Banarasi Saree", 4999.0).with_id(id("p2")));
    }

    let cart = reopen(dir.path());
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.lines()[0].id, id("p1"));
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[0].category, "Kurta Sets");
    assert_eq!(cart.lines()[1].category, "Fashion");
    assert_eq!(cart.item_count(), 3);
    assert!((cart.total() - 7399.0).abs() < f64::EPSILON);
}

#[test]
fn test_snapshot_file_is_a_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let mut cart = reopen(dir.path());
    cart.add_item(NewCartItem::new("Dupatta", 799.0).with_id(id("d1")));

    let path = FileStorage::new(dir.path().to_path_buf())
        .path_for(CART_STORAGE_KEY)
        .unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(raw[0]["id"], "d1");
    assert_eq!(raw[0]["quantity"], 1);
    assert_eq!(raw[0]["price"], 799.0);
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().to_path_buf());
    storage.write(CART_STORAGE_KEY, "{\"not\": \"a cart\"").unwrap();

    assert!(matches!(
        CartStore::restore(storage.clone()),
        Err(StorageError::Corrupt { .. })
    ));

    let mut cart = CartStore::open(storage);
    assert!(cart.is_empty());

    // The next mutation replaces the corrupt snapshot.
    cart.add_item(NewCartItem::new("Kurta", 100.0).with_id(id("k1")));
    assert_eq!(reopen(dir.path()).item_count(), 1);
}

#[test]
fn test_legacy_snapshot_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().to_path_buf());
    storage
        .write(
            CART_STORAGE_KEY,
            r#"[
                {"id": 1700000000000, "name": "Old Kurta", "price": "1,200", "quantity": 2},
                {"id": "p2", "name": "Saree", "price": 500, "quantity": 0, "category": ""},
                {"id": 1700000000000, "name": "Old Kurta", "price": 1200, "quantity": 1}
            ]"#,
        )
        .unwrap();

    let cart = CartStore::restore(storage).unwrap();
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.lines()[0].id.as_str(), "1700000000000");
    assert_eq!(cart.lines()[0].quantity, 3);
    assert_eq!(cart.lines()[1].quantity, 1);
    assert_eq!(cart.lines()[1].category, "Fashion");
}

#[test]
fn test_random_sequences_persist_exactly() {
    let mut rng = rand::rng();

    for _ in 0..20 {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = reopen(dir.path());
        let mut model: BTreeMap<String, u32> = BTreeMap::new();

        for _ in 0..40 {
            let key = format!("p{}", rng.random_range(0..5));
            match rng.random_range(0..4) {
                0 | 1 => {
                    cart.add_item(NewCartItem::new(key.clone(), 10.0).with_id(id(&key)));
                    *model.entry(key).or_insert(0) += 1;
                }
                2 => {
                    let quantity = rng.random_range(-1..4_i64);
                    let changed = cart.set_quantity(&id(&key), quantity).is_some();
                    assert_eq!(changed, model.contains_key(&key));
                    if changed {
                        if quantity <= 0 {
                            model.remove(&key);
                        } else {
                            model.insert(key, u32::try_from(quantity).unwrap());
                        }
                    }
                }
                _ => {
                    let removed = cart.remove_item(&id(&key)).is_some();
                    assert_eq!(removed, model.remove(&key).is_some());
                }
            }
        }

        let restored = reopen(dir.path());
        assert_eq!(restored.lines(), cart.lines());

        let expected: u32 = model.values().sum();
        assert_eq!(restored.item_count(), u64::from(expected));
        assert!((restored.total() - f64::from(expected) * 10.0).abs() < 1e-9);
        for (key, quantity) in &model {
            assert_eq!(restored.line(&id(key)).unwrap().quantity, *quantity);
        }
    }
}
