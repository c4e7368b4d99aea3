//! The canonical catalog document.
//!
//! Every raw configuration shape is normalized into a [`ConfigDocument`]
//! before anything renders it. All fields carry serde defaults and tolerate
//! wrong JSON types, so any JSON object deserializes into a fully populated
//! document. Unknown top-level keys are kept in [`ConfigDocument::extra`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;
use super::lenient;

pub const DEFAULT_BRAND_NAME: &str = "Bandhan Store";
pub const DEFAULT_BRAND_TAGLINE: &str = "Premium Fashion";
pub const DEFAULT_BRAND_DESCRIPTION: &str = "Premium fashion crafted with tradition and excellence";

pub const DEFAULT_FOOTER_ADDRESS: &str = "Mumbai, India";
pub const DEFAULT_FOOTER_PHONE: &str = "+91 98765 43210";
pub const DEFAULT_FOOTER_EMAIL: &str = "info@bandhanstore.com";
pub const DEFAULT_FOOTER_COPYRIGHT: &str = "© 2025 Bandhan Store. All rights reserved.";

/// Lower-case `name` and collapse each whitespace run into a single `-`.
///
/// ```
/// use bandhan_core::slugify;
///
/// assert_eq!(slugify("Wedding  Wear"), "wedding-wear");
/// assert_eq!(slugify("Kurta Sets"), "kurta-sets");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            slug.extend(c.to_lowercase());
        }
    }
    slug
}

/// Brand identity shown in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub tagline: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub logo: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub website: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: DEFAULT_BRAND_NAME.to_string(),
            tagline: DEFAULT_BRAND_TAGLINE.to_string(),
            logo: String::new(),
            website: String::new(),
            description: DEFAULT_BRAND_DESCRIPTION.to_string(),
        }
    }
}

/// A product category with its navigation anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub image: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub slug: String,
}

/// A category tile in the "shop by category" grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTile {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub image: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
}

impl From<&Category> for CategoryTile {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            image: category.image.clone(),
            description: category.description.clone(),
            url: category.url.clone(),
        }
    }
}

/// One slide of the hero carousel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSlide {
    #[serde(deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub image: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub link: String,
    /// Optional price badge; empty when the slide has none.
    #[serde(deserialize_with = "lenient::or_default")]
    pub price: String,
}

/// A product card in the "new arrivals" grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub original_price: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub image: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub category: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
}

/// A post in the social media gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstagramPost {
    #[serde(deserialize_with = "lenient::or_default")]
    pub image: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub caption: String,
}

/// A footer navigation link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
}

impl Link {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// A social media profile link with its icon class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub url: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub icon: String,
}

impl SocialLink {
    fn new(name: &str, url: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Footer contact details and link lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    #[serde(deserialize_with = "lenient::or_default")]
    pub company: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub address: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub email: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub copyright: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub brand_description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub shop_links: Vec<Link>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub support_links: Vec<Link>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub company_links: Vec<Link>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub social_media: Vec<SocialLink>,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            company: DEFAULT_BRAND_NAME.to_string(),
            address: DEFAULT_FOOTER_ADDRESS.to_string(),
            phone: DEFAULT_FOOTER_PHONE.to_string(),
            email: DEFAULT_FOOTER_EMAIL.to_string(),
            copyright: DEFAULT_FOOTER_COPYRIGHT.to_string(),
            brand_description: DEFAULT_BRAND_DESCRIPTION.to_string(),
            shop_links: vec![
                Link::new("New Arrivals", "#products"),
                Link::new("Collections", "#categories"),
                Link::new("Sale", "#sale"),
                Link::new("Gift Cards", "#gifts"),
            ],
            support_links: vec![
                Link::new("Size Guide", "#size-guide"),
                Link::new("Returns", "#returns"),
                Link::new("Shipping", "#shipping"),
                Link::new("FAQ", "#faq"),
            ],
            company_links: vec![
                Link::new("About Us", "#about"),
                Link::new("Careers", "#careers"),
                Link::new("Press", "#press"),
                Link::new("Contact", "#contact"),
            ],
            social_media: vec![
                SocialLink::new("Facebook", "#facebook", "fab fa-facebook-f"),
                SocialLink::new("Instagram", "#instagram", "fab fa-instagram"),
                SocialLink::new("Twitter", "#twitter", "fab fa-twitter"),
                SocialLink::new("YouTube", "#youtube", "fab fa-youtube"),
            ],
        }
    }
}

/// The normalized configuration consumed by rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    #[serde(deserialize_with = "lenient::or_default")]
    pub brand: Brand,
    #[serde(deserialize_with = "lenient::or_default")]
    pub categories: Vec<Category>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub hero_slider: Vec<HeroSlide>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub shop_by_category: Vec<CategoryTile>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub new_arrivals: Vec<Product>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub instagram_feed: Vec<InstagramPost>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub footer: Footer,
    /// Top-level keys this document does not model, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
