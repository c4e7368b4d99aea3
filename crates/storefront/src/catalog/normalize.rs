//! Raw configuration shape detection and normalization.
//!
//! Two raw layouts are known:
//!
//! - **Organization** - everything lives under a top-level `data` object,
//!   field names carry a section prefix (`brand_name`, `category_image`,
//!   `product_price`) and some fields are keyed by array position
//!   (`category_description_2`, `instagram_caption_0`).
//! - **Canonical** - already a [`ConfigDocument`] (`brand`, `categories`,
//!   `hero_slider`, ...).
//!
//! Anything else is passed through as if it were canonical; missing or
//! mistyped fields take their defaults.

use bandhan_core::lenient::{is_truthy, truthy_text, value_as_number};
use bandhan_core::{
    Brand, Category, CategoryTile, ConfigDocument, DEFAULT_BRAND_DESCRIPTION, DEFAULT_BRAND_NAME,
    DEFAULT_BRAND_TAGLINE, DEFAULT_FOOTER_ADDRESS, DEFAULT_FOOTER_COPYRIGHT, DEFAULT_FOOTER_EMAIL,
    DEFAULT_FOOTER_PHONE, Footer, InstagramPost, Product, slugify,
};
use serde_json::Value;
use tracing::{debug, warn};

use super::hero::build_hero_slides;

/// Price used when `product_price` is missing, unparseable or zero.
pub const FALLBACK_PRICE: f64 = 2999.0;
/// Original price used when `product_price × 1.2` is unparseable or zero.
pub const FALLBACK_ORIGINAL_PRICE: f64 = 3599.0;
/// Markup applied to derive the struck-through original price.
pub const ORIGINAL_PRICE_MARKUP: f64 = 1.2;

const NEW_ARRIVAL_CATEGORY: &str = "New Arrival";
const DEFAULT_TILE_DESCRIPTION: &str = "Explore our collection";
const DEFAULT_INSTAGRAM_CAPTION: &str = "Follow us on Instagram";

/// Which raw layout a configuration document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Prefixed, index-keyed fields under `data`.
    Organization,
    /// Already canonical: has both `brand` and `categories`.
    Canonical,
    /// Nothing recognizable; passed through best-effort.
    Unrecognized,
}

/// Classify a raw document.
#[must_use]
pub fn detect_shape(raw: &Value) -> DocumentShape {
    if raw.get("data").is_some_and(is_truthy) {
        DocumentShape::Organization
    } else if raw.get("brand").is_some_and(is_truthy) && raw.get("categories").is_some_and(is_truthy)
    {
        DocumentShape::Canonical
    } else {
        DocumentShape::Unrecognized
    }
}

/// Normalize any raw configuration into a [`ConfigDocument`].
#[must_use]
pub fn normalize(raw: Value) -> ConfigDocument {
    let shape = detect_shape(&raw);
    debug!(?shape, "Normalizing configuration document");

    match shape {
        DocumentShape::Organization => normalize_organization(&raw["data"]),
        DocumentShape::Canonical | DocumentShape::Unrecognized => passthrough(raw),
    }
}

/// Read a canonical (or unknown) document as-is.
fn passthrough(raw: Value) -> ConfigDocument {
    match serde_json::from_value(raw) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Configuration is not a JSON object, using empty document");
            ConfigDocument::default()
        }
    }
}

/// Map the organization layout onto the canonical document.
#[must_use]
pub fn normalize_organization(data: &Value) -> ConfigDocument {
    let categories = categories(data);
    let shop_by_category = categories.iter().map(category_tile).collect();

    ConfigDocument {
        brand: brand(data.get("brand")),
        shop_by_category,
        categories,
        hero_slider: build_hero_slides(array(data, "hero")),
        new_arrivals: products(data),
        instagram_feed: instagram_feed(data),
        footer: footer(data.get("footer")),
        extra: serde_json::Map::new(),
    }
}

fn array<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn text_or(section: Option<&Value>, key: &str, default: &str) -> String {
    section
        .and_then(|s| truthy_text(s.get(key)))
        .unwrap_or_else(|| default.to_string())
}

fn brand(section: Option<&Value>) -> Brand {
    Brand {
        name: text_or(section, "brand_name", DEFAULT_BRAND_NAME),
        tagline: text_or(section, "brand_tagline", DEFAULT_BRAND_TAGLINE),
        logo: text_or(section, "brand_logo", ""),
        website: text_or(section, "brand_website", ""),
        description: text_or(section, "brand_description", DEFAULT_BRAND_DESCRIPTION),
    }
}

fn footer(section: Option<&Value>) -> Footer {
    Footer {
        company: text_or(section, "footer_company", DEFAULT_BRAND_NAME),
        address: text_or(section, "footer_address", DEFAULT_FOOTER_ADDRESS),
        phone: text_or(section, "footer_phone", DEFAULT_FOOTER_PHONE),
        email: text_or(section, "footer_email", DEFAULT_FOOTER_EMAIL),
        copyright: text_or(section, "footer_copyright", DEFAULT_FOOTER_COPYRIGHT),
        ..Footer::default()
    }
}

fn categories(data: &Value) -> Vec<Category> {
    array(data, "categories")
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let name = truthy_text(entry.get("category_name"))?;
            let slug = slugify(&name);
            Some(Category {
                image: truthy_text(entry.get("category_image")).unwrap_or_default(),
                description: truthy_text(entry.get(format!("category_description_{index}")))
                    .unwrap_or_default(),
                url: format!("#category-{slug}"),
                slug,
                name,
            })
        })
        .collect()
}

fn category_tile(category: &Category) -> CategoryTile {
    let mut tile = CategoryTile::from(category);
    if tile.description.is_empty() {
        tile.description = DEFAULT_TILE_DESCRIPTION.to_string();
    }
    tile
}

/// Keep only values a browser would treat as truthy: non-zero, non-NaN.
fn truthy_number(n: f64) -> Option<f64> {
    (n != 0.0 && !n.is_nan()).then_some(n)
}

fn products(data: &Value) -> Vec<Product> {
    array(data, "products")
        .iter()
        .filter_map(|entry| {
            let name = truthy_text(entry.get("product_name"))?;
            let parsed = entry.get("product_price").and_then(value_as_number);

            // Both fallbacks are applied independently, so a zero price
            // becomes 2999 while its original price becomes 3599.
            let price = parsed.and_then(truthy_number).unwrap_or(FALLBACK_PRICE);
            let original_price = parsed
                .map(|p| p * ORIGINAL_PRICE_MARKUP)
                .and_then(truthy_number)
                .unwrap_or(FALLBACK_ORIGINAL_PRICE);

            Some(Product {
                id: None,
                price,
                original_price,
                image: truthy_text(entry.get("product_image")).unwrap_or_default(),
                description: truthy_text(entry.get("product_description")).unwrap_or_default(),
                category: NEW_ARRIVAL_CATEGORY.to_string(),
                url: format!("#product-{}", slugify(&name)),
                name,
            })
        })
        .collect()
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn instagram_feed(data: &Value) -> Vec<InstagramPost> {
    array(data, "instagram")
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let image = non_blank(entry.get("instagram_image"))?;
            let url = non_blank(entry.get("instagram_link"))?;
            Some(InstagramPost {
                image: image.to_string(),
                url: url.to_string(),
                caption: truthy_text(entry.get(format!("instagram_caption_{index}")))
                    .unwrap_or_else(|| DEFAULT_INSTAGRAM_CAPTION.to_string()),
            })
        })
        .collect()
}
