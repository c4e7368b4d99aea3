//! Cart line items.
//!
//! The stored cart is a JSON array of [`CartLine`] with no version tag, so
//! every field except `id` tolerates being absent or malformed.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::lenient;
use super::price::Price;

/// Category assigned to items added without one.
pub const DEFAULT_CART_CATEGORY: &str = "Fashion";

fn default_category() -> String {
    DEFAULT_CART_CATEGORY.to_string()
}

const fn default_quantity() -> u32 {
    1
}

/// One product entry in the cart.
///
/// Invariant: `quantity >= 1`. A line whose quantity would drop to zero is
/// removed from the cart instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub image: String,
    #[serde(default = "default_quantity", deserialize_with = "lenient::positive_count")]
    pub quantity: u32,
    #[serde(default = "default_category", deserialize_with = "category")]
    pub category: String,
}

impl CartLine {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price.times(self.quantity)
    }
}

/// Blank or non-string categories restore as [`DEFAULT_CART_CATEGORY`].
fn category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: String = lenient::or_default(deserializer)?;
    if value.trim().is_empty() {
        Ok(default_category())
    } else {
        Ok(value)
    }
}

/// A product as offered to the cart by the page.
///
/// Missing `id` and `category` are filled in by the cart store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartItem {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewCartItem {
    /// Create an item with only the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price: Price::new(price),
            image: None,
            category: None,
        }
    }

    /// Set the product id.
    #[must_use]
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_line_roundtrip_shape() {
        let line = CartLine {
            id: ProductId::parse("p1").unwrap(),
            name: "Kurta".to_string(),
            price: Price::new(1200.0),
            image: "/img/kurta.jpg".to_string(),
            quantity: 2,
            category: "Ethnic".to_string(),
        };

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "p1",
                "name": "Kurta",
                "price": 1200.0,
                "image": "/img/kurta.jpg",
                "quantity": 2,
                "category": "Ethnic"
            })
        );
    }

    #[test]
    fn test_legacy_line_fills_missing_fields() {
        let line: CartLine =
            serde_json::from_value(json!({"id": 1_712_000_000_000_i64, "name": "Sherwani", "price": 8999}))
                .unwrap();
        assert_eq!(line.id.as_str(), "1712000000000");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.category, DEFAULT_CART_CATEGORY);
        assert_eq!(line.image, "");
    }

    #[test]
    fn test_zero_quantity_restores_as_one() {
        let line: CartLine =
            serde_json::from_value(json!({"id": "a", "quantity": 0, "category": " "})).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.category, DEFAULT_CART_CATEGORY);
    }

    #[test]
    fn test_line_without_id_is_rejected() {
        let result: Result<CartLine, _> = serde_json::from_value(json!({"name": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_subtotal() {
        let line: CartLine =
            serde_json::from_value(json!({"id": "a", "price": 250.5, "quantity": 4})).unwrap();
        assert!((line.subtotal() - 1002.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_item_builder() {
        let item = NewCartItem::new("Kurta", 1200.0)
            .with_id(ProductId::parse("p1").unwrap())
            .with_category("Ethnic");
        assert_eq!(item.id.unwrap().as_str(), "p1");
        assert_eq!(item.category.as_deref(), Some("Ethnic"));
        assert!(item.image.is_none());
    }
}
