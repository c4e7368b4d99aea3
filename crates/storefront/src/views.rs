//! View models for the storefront templates.
//!
//! Everything a template shows is computed here from a [`ConfigDocument`]
//! or a cart, so templates stay declarative: no arithmetic, no fallbacks,
//! just loops and conditionals over ready-made strings.

use bandhan_core::{CartLine, ConfigDocument, Link, Product, SocialLink, format_amount, slugify};

/// Categories linked from the navigation bar.
const NAV_CATEGORY_LIMIT: usize = 3;

/// Animation stagger between grid cards, in milliseconds.
const STAGGER_MS: usize = 100;

const PLACEHOLDER_CATEGORY_IMAGE: &str = "https://via.placeholder.com/600x400/f8f9fa/6c757d?text=";
const PLACEHOLDER_PRODUCT_IMAGE: &str = "https://via.placeholder.com/300x400/f8f9fa/6c757d?text=";

fn rupees(amount: f64) -> String {
    format!("₹{}", format_amount(amount))
}

fn stagger(index: usize) -> usize {
    (index + 1) * STAGGER_MS
}

fn placeholder(base: &str, name: &str) -> String {
    format!("{base}{}", urlencoding::encode(name))
}

// =============================================================================
// Page
// =============================================================================

/// Navigation entry for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub name: String,
    pub url: String,
    pub slug: String,
}

/// One hero carousel slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroSlideView {
    pub index: usize,
    pub active: bool,
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub price: Option<String>,
}

/// One card in the shop-by-category grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCardView {
    pub name: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub column_class: &'static str,
    pub large: bool,
    pub delay: usize,
}

/// One card in the new arrivals grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub cart_category: String,
    /// Product image, or a named placeholder. Also stored on the cart line.
    pub image: String,
    pub url: String,
    /// Raw amount posted back when adding to the cart.
    pub price_value: String,
    pub price: String,
    pub original_price: Option<String>,
    pub delay: usize,
}

/// One tile in the Instagram grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstagramPostView {
    pub image: String,
    pub url: String,
    pub caption: String,
    pub delay: usize,
}

/// Footer contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub brand_name: String,
    pub brand_description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub copyright: String,
    pub shop_links: Vec<Link>,
    pub support_links: Vec<Link>,
    pub company_links: Vec<Link>,
    pub social_media: Vec<SocialLink>,
}

/// Everything the home page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub brand_name: String,
    pub brand_tagline: String,
    pub brand_logo: Option<String>,
    pub brand_description: String,
    pub nav_categories: Vec<NavLinkView>,
    pub hero_slides: Vec<HeroSlideView>,
    pub category_cards: Vec<CategoryCardView>,
    pub products: Vec<ProductCardView>,
    /// Empty when no post has a usable image; the section is then hidden.
    pub instagram_posts: Vec<InstagramPostView>,
    pub footer: FooterView,
}

impl PageView {
    /// Build the page view for a document.
    #[must_use]
    pub fn from_document(doc: &ConfigDocument) -> Self {
        Self {
            title: format!("{} - {}", doc.brand.name, doc.brand.tagline),
            brand_name: doc.brand.name.clone(),
            brand_tagline: doc.brand.tagline.clone(),
            brand_logo: Some(doc.brand.logo.clone()).filter(|logo| !logo.is_empty()),
            brand_description: doc.brand.description.clone(),
            nav_categories: nav_categories(doc),
            hero_slides: hero_slides(doc),
            category_cards: category_cards(doc),
            products: doc
                .new_arrivals
                .iter()
                .enumerate()
                .map(|(index, product)| ProductCardView::new(index, product))
                .collect(),
            instagram_posts: instagram_posts(doc),
            footer: FooterView {
                brand_name: doc.brand.name.clone(),
                brand_description: doc.footer.brand_description.clone(),
                address: doc.footer.address.clone(),
                phone: doc.footer.phone.clone(),
                email: doc.footer.email.clone(),
                copyright: doc.footer.copyright.clone(),
                shop_links: doc.footer.shop_links.clone(),
                support_links: doc.footer.support_links.clone(),
                company_links: doc.footer.company_links.clone(),
                social_media: doc.footer.social_media.clone(),
            },
        }
    }
}

fn nav_categories(doc: &ConfigDocument) -> Vec<NavLinkView> {
    doc.categories
        .iter()
        .take(NAV_CATEGORY_LIMIT)
        .map(|category| NavLinkView {
            name: category.name.clone(),
            url: category.url.clone(),
            slug: category.slug.clone(),
        })
        .collect()
}

fn hero_slides(doc: &ConfigDocument) -> Vec<HeroSlideView> {
    doc.hero_slider
        .iter()
        .enumerate()
        .map(|(index, slide)| HeroSlideView {
            index,
            active: index == 0,
            title: slide.title.clone(),
            description: slide.description.clone(),
            image: slide.image.clone(),
            link: slide.link.clone(),
            price: Some(slide.price.clone()).filter(|price| !price.is_empty()),
        })
        .collect()
}

fn category_cards(doc: &ConfigDocument) -> Vec<CategoryCardView> {
    let column_class = if doc.shop_by_category.len() <= 2 {
        "col-lg-6"
    } else {
        "col-lg-4"
    };

    doc.shop_by_category
        .iter()
        .enumerate()
        .map(|(index, tile)| CategoryCardView {
            name: tile.name.clone(),
            description: tile.description.clone(),
            image: if tile.image.is_empty() {
                placeholder(PLACEHOLDER_CATEGORY_IMAGE, &tile.name)
            } else {
                tile.image.clone()
            },
            url: tile.url.clone(),
            column_class,
            large: index == 0,
            delay: stagger(index),
        })
        .collect()
}

impl ProductCardView {
    fn new(index: usize, product: &Product) -> Self {
        let id = product.id.as_ref().map_or_else(
            || format!("product-{}-{}", index + 1, slugify(&product.name)),
            ToString::to_string,
        );
        let cart_category = if product.category.is_empty() {
            bandhan_core::DEFAULT_CART_CATEGORY.to_string()
        } else {
            product.category.clone()
        };

        Self {
            id,
            name: product.name.clone(),
            category: product.category.clone(),
            cart_category,
            image: if product.image.is_empty() {
                placeholder(PLACEHOLDER_PRODUCT_IMAGE, &product.name)
            } else {
                product.image.clone()
            },
            url: product.url.clone(),
            price_value: product.price.to_string(),
            price: rupees(product.price),
            original_price: (product.original_price > product.price)
                .then(|| rupees(product.original_price)),
            delay: stagger(index),
        }
    }
}

/// Whether an Instagram image is a real path rather than a placeholder.
fn is_displayable_image(image: &str) -> bool {
    !image.trim().is_empty() && !image.contains("placeholder") && image.contains('/')
}

fn instagram_posts(doc: &ConfigDocument) -> Vec<InstagramPostView> {
    doc.instagram_feed
        .iter()
        .filter(|post| is_displayable_image(&post.image))
        .enumerate()
        .map(|(index, post)| InstagramPostView {
            image: if post.image.starts_with('/') {
                format!(".{}", post.image)
            } else {
                post.image.clone()
            },
            url: if post.url.is_empty() {
                "#instagram".to_string()
            } else {
                post.url.clone()
            },
            caption: if post.caption.is_empty() {
                format!("Instagram Post {}", index + 1)
            } else {
                post.caption.clone()
            },
            delay: stagger(index),
        })
        .collect()
}

// =============================================================================
// Cart
// =============================================================================

/// One cart line as shown in the cart modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    /// Quantity posted by the minus button; zero removes the line.
    pub decrement: u32,
    pub increment: u32,
    pub price: String,
    pub subtotal: String,
}

/// The cart count badge in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartBadge {
    pub count: u64,
    /// Hidden while the cart is empty.
    pub hidden: bool,
}

impl CartBadge {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self {
            count,
            hidden: count == 0,
        }
    }
}

/// Cart modal contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub badge: CartBadge,
    pub total: String,
}

impl CartView {
    /// Build the cart view for `lines`.
    #[must_use]
    pub fn from_lines(lines: &[CartLine]) -> Self {
        let item_count = lines.iter().map(|line| u64::from(line.quantity)).sum();
        Self {
            items: lines
                .iter()
                .map(|line| CartItemView {
                    id: line.id.to_string(),
                    name: line.name.clone(),
                    category: line.category.clone(),
                    image: line.image.clone(),
                    quantity: line.quantity,
                    decrement: line.quantity.saturating_sub(1),
                    increment: line.quantity.saturating_add(1),
                    price: rupees(line.price.amount()),
                    subtotal: rupees(line.subtotal()),
                })
                .collect(),
            item_count,
            badge: CartBadge::new(item_count),
            total: rupees(lines.iter().map(CartLine::subtotal).sum()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
