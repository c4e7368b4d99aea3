//! Price representation and amount formatting.
//!
//! Prices are plain floating-point rupee amounts: that is what the catalog
//! document and the stored cart snapshot carry on the wire. Display follows
//! the `en-US` locale grouping the storefront has always shown (`₹1,234.5`).

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// ISO 4217 currency codes the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
        }
    }
}

/// A non-negative unit price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Create a new price. Negative and non-finite amounts become zero.
    #[must_use]
    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            Self(amount)
        } else {
            Self(0.0)
        }
    }

    /// The amount in rupees.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> f64 {
        self.0 * f64::from(quantity)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CurrencyCode::default().symbol(), format_amount(self.0))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::number(deserializer).map(Self::new)
    }
}

/// Format an amount with thousands separators and at most three decimals.
///
/// ```
/// use bandhan_core::format_amount;
///
/// assert_eq!(format_amount(2400.0), "2,400");
/// assert_eq!(format_amount(1234567.891), "1,234,567.891");
/// assert_eq!(format_amount(3598.8), "3,598.8");
/// ```
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // abs, rounded
    let thousandths = (value.abs() * 1000.0).round() as u128;
    let whole = thousandths / 1000;
    let fraction = thousandths % 1000;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    if value < 0.0 && thousandths > 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction > 0 {
        let decimals = format!("{fraction:03}");
        grouped.push('.');
        grouped.push_str(decimals.trim_end_matches('0'));
    }

    grouped
}
