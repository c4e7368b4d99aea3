//! Integration tests for the storefront served over a real socket.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use bandhan_integration_tests::{organization_config, spawn_storefront, write_config};
use bandhan_storefront::cart::{CART_STORAGE_KEY, FileStorage};
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Client, StatusCode, redirect};
use serde_json::Value;

fn client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

async fn post_form(client: &Client, url: String, body: &str) -> reqwest::Response {
    client
        .post(url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .send()
        .await
        .unwrap()
}

fn snapshot_exists(dir: &Path) -> bool {
    FileStorage::new(dir.to_path_buf())
        .path_for(CART_STORAGE_KEY)
        .unwrap()
        .exists()
}

#[tokio::test]
async fn test_home_page_uses_organization_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &organization_config());
    let (addr, _state) = spawn_storefront(&config, dir.path()).await;

    let response = client().get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let html = response.text().await.unwrap();
    assert!(html.contains("Bandhan Test House - Handloom Stories"));
    assert!(html.contains("Silk Kurta"));
    assert!(html.contains("Banarasi Saree"));
    assert!(html.contains("shopCategoryGrid"));
}

#[tokio::test]
async fn test_cart_flow_and_whatsapp_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &organization_config());
    let (addr, _state) = spawn_storefront(&config, dir.path()).await;
    let client = client();

    let response = client.get(format!("http://{addr}/checkout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    for _ in 0..2 {
        let response = post_form(
            &client,
            format!("http://{addr}/cart/add"),
            "id=product-1-silk-kurta&name=Silk+Kurta&price=1200&category=New+Arrival",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-trigger"], "cart-updated");
    }
    assert!(snapshot_exists(dir.path()));

    let cart: Value = client
        .get(format!("http://{addr}/api/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["total"], 2400.0);

    let response = client.get(format!("http://{addr}/checkout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[LOCATION].to_str().unwrap();
    // Footer phone "+91 99999 11111" already carries the country code.
    assert!(location.starts_with("https://api.whatsapp.com/send?phone=919999911111&text="));
    assert!(location.contains("Bandhan%20Test%20House%20Order"));

    let response = post_form(&client, format!("http://{addr}/cart/clear"), "").await;
    assert!(response.text().await.unwrap().contains("Cart cleared!"));

    let count = client
        .get(format!("http://{addr}/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(count.contains("display: none"));
}

#[tokio::test]
async fn test_cart_survives_server_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &organization_config());

    {
        let (addr, _state) = spawn_storefront(&config, dir.path()).await;
        post_form(
            &client(),
            format!("http://{addr}/cart/add"),
            "id=p9&name=Dupatta&price=799",
        )
        .await;
    }

    let (addr, state) = spawn_storefront(&config, dir.path()).await;
    assert_eq!(state.cart().await.item_count(), 1);

    let body = client()
        .get(format!("http://{addr}/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Dupatta"));
}

#[tokio::test]
async fn test_missing_config_serves_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json").display().to_string();
    let (addr, _state) = spawn_storefront(&missing, dir.path()).await;

    let doc: Value = client()
        .get(format!("http://{addr}/api/catalog"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(doc["brand"]["name"], "Bandhan Store");
}
