//! Cart management commands.
//!
//! The cart is the same snapshot the storefront server keeps, stored as
//! `<cart-dir>/bandhanstore_cart.json`.
//!
//! # Usage
//!
//! ```bash
//! bandhan cart add --id p1 --name "Silk Saree" --price 2999 --category Sarees
//! bandhan cart set p1 2
//! bandhan cart remove p1
//! bandhan cart list
//! bandhan cart checkout
//! bandhan cart clear
//! ```

use std::fmt::Write as _;

use bandhan_core::{NewCartItem, ProductId, ProductIdError, format_amount};
use bandhan_storefront::cart::{CartNotice, CartStore, StorageError};
use bandhan_storefront::catalog::CatalogError;
use bandhan_storefront::checkout::CheckoutError;
use thiserror::Error;

use super::{catalog_loader, checkout_settings, emit, open_cart};
use crate::StoreArgs;

/// Errors that can occur while managing the cart.
#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error("Invalid product ID: {0}")]
    InvalidId(#[from] ProductIdError),

    #[error("Product name must not be empty")]
    EmptyName,

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("No cart line with ID {0}")]
    UnknownId(ProductId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Build the item for `cart add` from its flags.
///
/// # Errors
///
/// Returns an error for a blank name, a negative or non-finite price, or an
/// unusable ID.
pub fn new_item(
    id: Option<&str>,
    name: &str,
    price: f64,
    image: Option<String>,
    category: Option<String>,
) -> Result<NewCartItem, CartCommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CartCommandError::EmptyName);
    }
    if !price.is_finite() || price < 0.0 {
        return Err(CartCommandError::InvalidPrice(price));
    }

    let mut item = NewCartItem::new(name, price);
    if let Some(id) = id {
        item = item.with_id(ProductId::parse(id)?);
    }
    item.image = image.filter(|image| !image.trim().is_empty());
    item.category = category.filter(|category| !category.trim().is_empty());
    Ok(item)
}

/// Print every line with quantities and totals.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn list(store: &StoreArgs) -> Result<(), CartCommandError> {
    let cart = open_cart(store);
    emit(&format_listing(&cart))?;
    Ok(())
}

/// Add one unit of `item`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn add(store: &StoreArgs, item: NewCartItem) -> Result<(), CartCommandError> {
    let mut cart = open_cart(store);
    let notice = cart.add_item(item);
    finish(&mut cart, &notice)
}

/// Remove the line with `id`.
///
/// # Errors
///
/// Returns an error if the ID is malformed or absent, or the cart cannot be
/// saved.
pub fn remove(store: &StoreArgs, id: &str) -> Result<(), CartCommandError> {
    let id = ProductId::parse(id)?;
    let mut cart = open_cart(store);
    let notice = cart
        .remove_item(&id)
        .ok_or(CartCommandError::UnknownId(id))?;
    finish(&mut cart, &notice)
}

/// Set the quantity of the line with `id`. Zero or less removes it.
///
/// # Errors
///
/// Returns an error if the ID is malformed or absent, or the cart cannot be
/// saved.
pub fn set(store: &StoreArgs, id: &str, quantity: i64) -> Result<(), CartCommandError> {
    let id = ProductId::parse(id)?;
    let mut cart = open_cart(store);
    let notice = cart
        .set_quantity(&id, quantity)
        .ok_or(CartCommandError::UnknownId(id))?;
    finish(&mut cart, &notice)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(store: &StoreArgs) -> Result<(), CartCommandError> {
    let mut cart = open_cart(store);
    let notice = cart.clear();
    finish(&mut cart, &notice)
}

/// Print the order summary and the WhatsApp link. The cart is left as is.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart, or an error if no
/// destination number can be resolved.
pub async fn checkout(store: &StoreArgs) -> Result<(), CartCommandError> {
    let document = catalog_loader(store)?.load().await;
    let footer_phone = Some(document.footer.phone.as_str()).filter(|phone| !phone.is_empty());
    let cart = open_cart(store);

    let summary = cart.build_order_summary(&document.brand.name)?;
    let link = cart.checkout_link(footer_phone, &document.brand.name, &checkout_settings(store))?;

    tracing::info!(phone = %link.phone, items = summary.item_count, "Checkout link ready");
    emit(&format!("{}\n\n{}", summary.text, link.url))?;
    Ok(())
}

/// Save explicitly so storage failures reach the caller, then report.
fn finish(cart: &mut CartStore, notice: &CartNotice) -> Result<(), CartCommandError> {
    cart.persist()?;
    tracing::info!(items = cart.item_count(), "{}", notice.message());
    Ok(())
}

fn format_listing(cart: &CartStore) -> String {
    if cart.is_empty() {
        return "Your bag is empty".to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{}  {} ({})  {} x ₹{} = ₹{}",
            line.id,
            line.name,
            line.category,
            line.quantity,
            format_amount(line.price.amount()),
            format_amount(line.subtotal()),
        );
    }
    let _ = write!(
        out,
        "Items: {}  Total: ₹{}",
        cart.item_count(),
        format_amount(cart.total())
    );
    out
}
