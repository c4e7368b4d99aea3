//! Order summary text and the WhatsApp checkout hand-off.

use std::fmt::Write as _;

use bandhan_core::{CartLine, PhoneError, PhoneNumber, format_amount};
use thiserror::Error;

/// Number used when the footer carries no usable phone.
pub const DEFAULT_FALLBACK_PHONE: &str = "919876543210";

/// Country code prepended to numbers that lack it.
pub const DEFAULT_COUNTRY_CODE: &str = "91";

const WHATSAPP_SEND_URL: &str = "https://api.whatsapp.com/send";

/// Errors that stop a checkout hand-off.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Your cart is empty!")]
    EmptyCart,

    /// Neither the footer nor the fallback yields a phone number.
    #[error("Invalid checkout phone: {0}")]
    Phone(#[from] PhoneError),
}

/// Destination settings for the hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub fallback_phone: String,
    pub country_code: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            fallback_phone: DEFAULT_FALLBACK_PHONE.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

/// The rendered order text plus the figures it quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub text: String,
    pub total: f64,
    pub item_count: u64,
}

/// A ready-to-open checkout URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    pub phone: PhoneNumber,
    pub url: String,
}

/// Build the order message for `lines`.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if `lines` is empty.
pub fn build_order_summary(
    lines: &[CartLine],
    store_name: &str,
) -> Result<OrderSummary, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let total: f64 = lines.iter().map(CartLine::subtotal).sum();
    let item_count: u64 = lines.iter().map(|line| u64::from(line.quantity)).sum();

    // Writing to a String cannot fail.
    let mut text = format!("🛍️ *{store_name} Order*\n\n📋 *Order Details:*\n");
    for (index, line) in lines.iter().enumerate() {
        let _ = write!(
            text,
            "{}. {}\n   - Category: {}\n   - Price: ₹{}\n   - Quantity: {}\n   - Subtotal: ₹{}\n\n",
            index + 1,
            line.name,
            line.category,
            format_amount(line.price.amount()),
            line.quantity,
            format_amount(line.subtotal()),
        );
    }
    let _ = write!(
        text,
        "💰 *Total Amount: ₹{}*\n📦 *Total Items: {item_count}*\n\n\
         Please confirm this order and provide delivery details. Thank you! 🙏",
        format_amount(total),
    );

    Ok(OrderSummary {
        text,
        total,
        item_count,
    })
}

/// Resolve the destination number.
///
/// The footer phone is used when it contains any digit, otherwise the
/// configured fallback. The country code is prepended unless already present.
///
/// # Errors
///
/// Returns `CheckoutError::Phone` if the fallback has no digits or the
/// country code is not numeric.
pub fn destination_phone(
    footer_phone: Option<&str>,
    settings: &CheckoutSettings,
) -> Result<PhoneNumber, CheckoutError> {
    let phone = match footer_phone.map(PhoneNumber::from_display) {
        Some(Ok(phone)) => phone,
        _ => PhoneNumber::from_display(&settings.fallback_phone)?,
    };
    Ok(phone.with_country_code(&settings.country_code)?)
}

/// Build the WhatsApp URL carrying the order summary.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart, or
/// `CheckoutError::Phone` if no destination can be resolved.
pub fn checkout_link(
    lines: &[CartLine],
    store_name: &str,
    footer_phone: Option<&str>,
    settings: &CheckoutSettings,
) -> Result<CheckoutLink, CheckoutError> {
    let summary = build_order_summary(lines, store_name)?;
    let phone = destination_phone(footer_phone, settings)?;
    let url = format!(
        "{WHATSAPP_SEND_URL}?phone={phone}&text={}",
        urlencoding::encode(&summary.text)
    );
    Ok(CheckoutLink { phone, url })
}
