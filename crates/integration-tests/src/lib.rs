//! Integration tests for the Bandhan storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bandhan-integration-tests
//! ```
//!
//! Every test runs self-contained: servers bind ephemeral local ports and
//! state lives in temporary directories.
//!
//! # Test Categories
//!
//! - `catalog_loading` - configuration over HTTP and from files, fallback, caching
//! - `cart_persistence` - cart snapshots surviving restarts and corruption
//! - `http_routes` - the storefront served over a real socket

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use bandhan_storefront::cart::{CartStore, FileStorage};
use bandhan_storefront::catalog::{CatalogLoader, CatalogSettings, CatalogSource};
use bandhan_storefront::config::StorefrontConfig;
use bandhan_storefront::routes;
use bandhan_storefront::state::AppState;
use serde_json::{Value, json};

/// An organization-layout configuration document.
#[must_use]
pub fn organization_config() -> Value {
    json!({
        "data": {
            "brand": {
                "brand_name": "Bandhan Test House",
                "brand_tagline": "Handloom Stories",
                "brand_logo": "/organizations/bandhan/images/logo.png"
            },
            "categories": [
                {"category_name": "Kurta Sets", "category_image": "/img/kurta.jpg",
                 "category_description_0": "Everyday comfort"},
                {"category_name": "Silk Sarees", "category_description_1": "Woven in Varanasi"}
            ],
            "hero": [
                {"hero_title": "Festive Edit"},
                {"hero_description": "New looks for the season"},
                {"hero_image": "/img/hero.jpg"}
            ],
            "products": [
                {"product_name": "Silk Kurta", "product_price": "1200",
                 "product_image": "/img/silk.jpg"},
                {"product_name": "Banarasi Saree", "product_price": "4999"}
            ],
            "instagram": [
                {"instagram_image": "/img/ig0.jpg", "instagram_link": "https://instagram.com/p/1",
                 "instagram_caption_0": "Diwali looks"}
            ],
            "footer": {"footer_phone": "+91 99999 11111"}
        }
    })
}

/// What the stub configuration server answers with.
#[derive(Clone)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: String,
}

impl StubResponse {
    /// A 200 response carrying `value` as JSON.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    /// An arbitrary status and body.
    #[must_use]
    pub fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// A running configuration server.
pub struct StubServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    /// URL of the configuration document.
    #[must_use]
    pub fn config_url(&self) -> String {
        format!("http://{}/organizations/bandhan/data/current%20configuration.json", self.addr)
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct StubState {
    response: StubResponse,
    hits: Arc<AtomicUsize>,
}

async fn serve_stub(State(state): State<StubState>) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (state.response.status, state.response.body.clone())
}

/// Spawn a server answering every configuration request with `response`.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn_config_server(response: StubResponse) -> StubServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/organizations/bandhan/data/{file}", get(serve_stub))
        .with_state(StubState {
            response,
            hits: Arc::clone(&hits),
        });

    let addr = spawn(app).await;
    StubServer { addr, hits }
}

/// Catalog settings for `source` with a short timeout.
#[must_use]
pub fn catalog_settings(source: &str, cache_ttl: Duration) -> CatalogSettings {
    CatalogSettings {
        source: CatalogSource::parse(source),
        cache_ttl,
        fetch_timeout: Duration::from_secs(5),
    }
}

/// Write `value` as the configuration file inside `dir` and return its path.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn write_config(dir: &Path, value: &Value) -> String {
    let path = dir.join("current configuration.json");
    std::fs::write(&path, value.to_string()).unwrap();
    path.display().to_string()
}

/// Spawn the full storefront over a real socket.
///
/// The catalog is read from `config_path` without caching and the cart is
/// stored under `cart_dir`.
///
/// # Panics
///
/// Panics if the catalog loader cannot be built or no port can be bound.
pub async fn spawn_storefront(config_path: &str, cart_dir: &Path) -> (SocketAddr, AppState) {
    let config = StorefrontConfig {
        catalog: catalog_settings(config_path, Duration::ZERO),
        cart_dir: cart_dir.to_path_buf(),
        assets_dir: cart_dir.to_path_buf(),
        ..StorefrontConfig::default()
    };
    #[allow(clippy::unwrap_used)]
    let catalog = CatalogLoader::new(&config.catalog).unwrap();
    let cart = CartStore::open(FileStorage::new(cart_dir.to_path_buf()));
    let state = AppState::with_parts(config, catalog, cart);

    let addr = spawn(routes::app(state.clone())).await;
    (addr, state)
}

#[allow(clippy::unwrap_used)]
async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
