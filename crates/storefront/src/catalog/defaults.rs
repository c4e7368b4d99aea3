//! Built-in catalog used when no configuration can be loaded.

use bandhan_core::{
    Brand, Category, CategoryTile, ConfigDocument, Footer, HeroSlide, InstagramPost, Product,
};

const PREMIUM_IMAGE: &str =
    "https://via.placeholder.com/600x400/667eea/ffffff?text=Premium+Collection";

/// The document the page renders when the configuration source is
/// unreachable or malformed.
#[must_use]
pub fn builtin_document() -> ConfigDocument {
    ConfigDocument {
        brand: Brand::default(),
        categories: vec![
            Category {
                name: "Premium Collection".to_string(),
                image: PREMIUM_IMAGE.to_string(),
                description: "Discover our finest pieces".to_string(),
                url: "#premium".to_string(),
                slug: "premium-collection".to_string(),
            },
            Category {
                name: "New Arrivals".to_string(),
                image: "https://via.placeholder.com/600x400/764ba2/ffffff?text=New+Arrivals"
                    .to_string(),
                description: "Latest fashion trends".to_string(),
                url: "#new-arrivals".to_string(),
                slug: "new-arrivals".to_string(),
            },
        ],
        hero_slider: vec![HeroSlide {
            title: "Welcome to Bandhan Store".to_string(),
            description: "Discover premium fashion collections".to_string(),
            image: "https://via.placeholder.com/1920x800/667eea/ffffff?text=Hero+Slide".to_string(),
            link: "#categories".to_string(),
            price: String::new(),
        }],
        shop_by_category: vec![CategoryTile {
            name: "Premium Collection".to_string(),
            image: PREMIUM_IMAGE.to_string(),
            description: "Discover our finest pieces".to_string(),
            url: "#premium".to_string(),
        }],
        new_arrivals: vec![Product {
            id: None,
            name: "Premium Outfit".to_string(),
            price: 2999.0,
            original_price: 3599.0,
            image: "https://via.placeholder.com/400x500/f8f9fa/6c757d?text=Premium+Outfit"
                .to_string(),
            description: String::new(),
            category: "New Arrival".to_string(),
            url: "#product-premium-outfit".to_string(),
        }],
        instagram_feed: vec![InstagramPost {
            image: "https://via.placeholder.com/300x300/667eea/ffffff?text=Instagram".to_string(),
            url: "#instagram".to_string(),
            caption: "Follow us @bandhanstore".to_string(),
        }],
        footer: Footer::default(),
        extra: serde_json::Map::new(),
    }
}
