//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart modal body
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add to cart (notice, triggers cart-updated)
//! POST /cart/update            - Set quantity (notice, or 204 if unchanged)
//! POST /cart/remove            - Remove item (notice, or 204 if absent)
//! POST /cart/clear             - Clear cart (notice)
//!
//! # Notices
//! POST /newsletter             - Newsletter signup (notice)
//! POST /search                 - Search acknowledgement (notice, or 204 if empty)
//!
//! # Checkout
//! GET  /checkout               - Redirect to WhatsApp (409 if the cart is empty)
//!
//! # JSON API
//! GET  /api/catalog            - Normalized configuration document
//! GET  /api/cart               - Cart lines, total and item count
//!
//! # Assets
//! GET  /static/*               - Stylesheets and scripts
//! GET  /organizations/*        - Configuration and images
//! ```

pub mod api;
pub mod cart;
pub mod home;
pub mod newsletter;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(api::catalog))
        .route("/cart", get(api::cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Cart routes
        .nest("/cart", cart_routes())
        // Footer and nav forms
        .route("/newsletter", post(newsletter::subscribe))
        .route("/search", post(search::search))
        // Checkout redirect
        .route("/checkout", get(cart::checkout))
        // JSON API
        .nest("/api", api_routes())
}

/// Build the full application: routes, assets, request IDs and tracing.
pub fn app(state: AppState) -> Router {
    let assets = state.config().assets_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(assets.join("static")))
        .nest_service("/organizations", ServeDir::new(assets.join("organizations")))
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::cart::{CartStore, MemoryStorage};
    use crate::catalog::{CatalogLoader, CatalogSettings, CatalogSource};
    use crate::config::StorefrontConfig;
    use crate::middleware::REQUEST_ID_HEADER;

    /// State whose catalog source does not exist, so the built-in document is used.
    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let config = StorefrontConfig {
            catalog: CatalogSettings {
                source: CatalogSource::File(dir.path().join("missing.json")),
                cache_ttl: Duration::ZERO,
                fetch_timeout: Duration::from_secs(1),
            },
            assets_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        let catalog = CatalogLoader::new(&config.catalog).unwrap();
        AppState::with_parts(config, catalog, CartStore::open(MemoryStorage::new()))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(&dir)).oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_home_renders_with_fallback_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(&dir)).oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Bandhan Store - Premium Fashion"));
    }

    #[tokio::test]
    async fn test_add_then_api_cart() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        for _ in 0..2 {
            let response = app(state.clone())
                .oneshot(form_request(
                    "/cart/add",
                    "id=p1&name=Kurta&price=1200&image=&category=",
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers().get("HX-Trigger").unwrap(), "cart-updated");
            assert!(body_text(response).await.contains("Kurta added to cart!"));
        }

        let response = app(state).oneshot(get_request("/api/cart")).await.unwrap();
        let snapshot: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(snapshot["item_count"], 2);
        assert_eq!(snapshot["total"], 2400.0);
        assert_eq!(snapshot["lines"][0]["id"], "p1");
        assert_eq!(snapshot["lines"][0]["category"], "Fashion");
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        app(state.clone())
            .oneshot(form_request("/cart/add", "id=p1&name=Kurta&price=1200"))
            .await
            .unwrap();

        let response = app(state.clone())
            .oneshot(form_request("/cart/update", "id=p1&quantity=4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.cart().await.item_count(), 4);

        let response = app(state.clone())
            .oneshot(form_request("/cart/update", "id=ghost&quantity=4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app(state.clone())
            .oneshot(form_request("/cart/remove", "id=p1"))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Kurta removed from cart!"));
        assert!(state.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_bad_add_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(&dir))
            .oneshot(form_request("/cart/add", "name=Kurta&price=lots"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(&dir)).oneshot(get_request("/checkout")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(body_text(response).await.contains("Your cart is empty!"));
    }

    #[tokio::test]
    async fn test_checkout_redirects_to_whatsapp() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        app(state.clone())
            .oneshot(form_request("/cart/add", "id=p1&name=Kurta&price=1200"))
            .await
            .unwrap();

        let response = app(state.clone()).oneshot(get_request("/checkout")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.starts_with("https://api.whatsapp.com/send?phone=919876543210&text="));
        // Checkout leaves the cart alone.
        assert_eq!(state.cart().await.item_count(), 1);
    }

    #[tokio::test]
    async fn test_fragments() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let response = app(state.clone()).oneshot(get_request("/cart/count")).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("display: none"));

        app(state.clone())
            .oneshot(form_request("/cart/add", "id=p1&name=Kurta&price=1200"))
            .await
            .unwrap();
        let response = app(state.clone()).oneshot(get_request("/cart")).await.unwrap();
        assert!(body_text(response).await.contains("Buy via WhatsApp"));

        let response = app(state.clone())
            .oneshot(form_request("/cart/clear", ""))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Cart cleared!"));
        assert!(state.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_newsletter_and_search_answer_with_notices() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let response = app(state.clone())
            .oneshot(form_request("/newsletter", "email=asha%40example.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Thank you for subscribing to our newsletter!"));

        let response = app(state.clone())
            .oneshot(form_request("/newsletter", "email=+"))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Please enter a valid email address."));

        let response = app(state.clone())
            .oneshot(form_request("/search", "q=silk+saree"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Searching for"));

        let response = app(state.clone())
            .oneshot(form_request("/search", "q="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Neither form touches the cart.
        assert!(state.cart().await.is_empty());
    }

    #[tokio::test]
    async fn test_api_catalog_serves_builtin_document() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(test_state(&dir)).oneshot(get_request("/api/catalog")).await.unwrap();
        let doc: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(doc["brand"]["name"], "Bandhan Store");
        assert_eq!(doc["new_arrivals"][0]["price"], 2999.0);
    }
}
