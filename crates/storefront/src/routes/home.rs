//! Home page route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use bandhan_core::{CartLine, ConfigDocument};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::views::{CartView, PageView};

/// Home page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub page: PageView,
    pub cart: CartView,
}

impl HomeTemplate {
    #[must_use]
    pub fn new(document: &ConfigDocument, lines: &[CartLine]) -> Self {
        Self {
            page: PageView::from_document(document),
            cart: CartView::from_lines(lines),
        }
    }
}

/// Render the full page for a document and cart.
///
/// # Errors
///
/// Returns an `askama::Error` if the template fails to render.
pub fn render_page(document: &ConfigDocument, lines: &[CartLine]) -> askama::Result<String> {
    HomeTemplate::new(document, lines).render()
}

/// Display the home page.
///
/// The catalog is resolved first (falling back to the built-in document),
/// then the page is rendered against it and the current cart.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let document = state.catalog().load().await;
    let template = {
        let cart = state.cart().await;
        HomeTemplate::new(&document, cart.lines())
    };
    Ok(Html(template.render()?))
}
