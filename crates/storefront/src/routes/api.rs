//! JSON API route handlers.

use axum::{Json, extract::State};
use bandhan_core::{CartLine, ConfigDocument};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

/// Cart contents with computed totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: f64,
    pub item_count: u64,
}

/// The normalized configuration document.
#[instrument(skip(state))]
pub async fn catalog(State(state): State<AppState>) -> Json<ConfigDocument> {
    Json(state.catalog().load().await)
}

/// The current cart.
#[instrument(skip(state))]
pub async fn cart(State(state): State<AppState>) -> Json<CartSnapshot> {
    let cart = state.cart().await;
    Json(CartSnapshot {
        lines: cart.lines().to_vec(),
        total: cart.total(),
        item_count: cart.item_count(),
    })
}
