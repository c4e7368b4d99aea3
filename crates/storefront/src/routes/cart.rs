//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Mutations answer with a notice fragment and an `HX-Trigger: cart-updated`
//! header; the cart body and count badge refresh themselves on that event.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use bandhan_core::{NewCartItem, Price, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::cart::CartNotice;
use crate::error::{AppError, NoticeTemplate, Result, add_breadcrumb};
use crate::state::AppState;
use crate::views::{CartBadge, CartView};

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl AddToCartForm {
    fn into_item(self) -> Result<NewCartItem> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("name is required".to_string()));
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| AppError::BadRequest(format!("invalid price {:?}", self.price)))?;

        Ok(NewCartItem {
            id: self.id.as_deref().and_then(|id| ProductId::parse(id).ok()),
            name,
            price: Price::new(price),
            image: self.image.filter(|image| !image.is_empty()),
            category: self.category,
        })
    }
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart modal body fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_body.html")]
pub struct CartBodyTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: CartBadge,
}

fn parse_id(raw: &str) -> Result<ProductId> {
    ProductId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

const fn notice_level(notice: &CartNotice) -> &'static str {
    match notice {
        CartNotice::Added { .. } => "success",
        CartNotice::Removed { .. } | CartNotice::Updated { .. } | CartNotice::Cleared => "info",
    }
}

/// Notice fragment plus the trigger that refreshes cart widgets.
fn changed(notice: &CartNotice) -> Result<Response> {
    let html = NoticeTemplate {
        level: notice_level(notice),
        message: notice.message(),
    }
    .render()?;
    Ok((AppendHeaders([("HX-Trigger", "cart-updated")]), Html(html)).into_response())
}

/// Answer for operations that changed nothing.
fn unchanged() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Cart modal body (HTMX).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = CartView::from_lines(state.cart().await.lines());
    CartBodyTemplate { cart }
}

/// Cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.cart().await.item_count();
    CartCountTemplate {
        badge: CartBadge::new(count),
    }
}

/// Add one unit of a product (HTMX).
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let item = form.into_item()?;
    let id = item.id.as_ref().map(ToString::to_string).unwrap_or_default();
    let notice = state.cart().await.add_item(item);

    add_breadcrumb("cart", "Item added", Some(&[("product_id", id.as_str())]));
    changed(&notice)
}

/// Set a line's quantity (HTMX). Zero or less removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let id = parse_id(&form.id)?;
    let notice = state.cart().await.set_quantity(&id, form.quantity);
    notice.as_ref().map_or_else(|| Ok(unchanged()), changed)
}

/// Remove a line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let id = parse_id(&form.id)?;
    let notice = state.cart().await.remove_item(&id);
    if notice.is_some() {
        add_breadcrumb("cart", "Item removed", Some(&[("product_id", id.as_str())]));
    }
    notice.as_ref().map_or_else(|| Ok(unchanged()), changed)
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Response> {
    let notice = state.cart().await.clear();
    changed(&notice)
}

/// Redirect to the WhatsApp hand-off.
///
/// An empty cart answers 409 with a warning fragment and leaves the cart
/// untouched.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Redirect> {
    let document = state.catalog().load().await;
    let footer_phone = Some(document.footer.phone.as_str()).filter(|phone| !phone.is_empty());

    let link = state.cart().await.checkout_link(
        footer_phone,
        &document.brand.name,
        &state.config().checkout,
    )?;

    tracing::info!(phone = %link.phone, "Redirecting to WhatsApp");
    add_breadcrumb("checkout", "Redirecting to WhatsApp", None);
    Ok(Redirect::to(&link.url))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(price: &str) -> AddToCartForm {
        AddToCartForm {
            id: Some("  ".to_string()),
            name: " Kurta ".to_string(),
            price: price.to_string(),
            image: Some(String::new()),
            category: None,
        }
    }

    #[test]
    fn test_add_form_into_item() {
        let item = form("1200").into_item();
        assert!(matches!(
            item,
            Ok(NewCartItem { ref id, ref name, ref image, .. })
                if id.is_none() && name == "Kurta" && image.is_none()
        ));
    }

    #[test]
    fn test_add_form_rejects_bad_price() {
        assert!(matches!(form("free").into_item(), Err(AppError::BadRequest(_))));
        assert!(matches!(form("-5").into_item(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_count_badge_hidden_when_empty() {
        let empty = CartCountTemplate {
            badge: CartBadge::new(0),
        }
        .render()
        .unwrap();
        assert!(empty.contains("display: none"));

        let three = CartCountTemplate {
            badge: CartBadge::new(3),
        }
        .render()
        .unwrap();
        assert!(!three.contains("display: none"));
        assert!(three.contains(">3</span>"));
    }

    #[test]
    fn test_notice_levels() {
        assert_eq!(
            notice_level(&CartNotice::Added {
                name: "x".to_string()
            }),
            "success"
        );
        assert_eq!(notice_level(&CartNotice::Cleared), "info");
    }
}
