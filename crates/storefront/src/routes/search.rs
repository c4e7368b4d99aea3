//! Search route handler.
//!
//! The storefront has no product index; a query is acknowledged with a
//! notice fragment.

use askama::Template;
use axum::{
    Form,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{NoticeTemplate, Result};

/// Search form data.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub q: String,
}

fn search_notice(query: &str) -> Option<NoticeTemplate> {
    (!query.is_empty()).then(|| NoticeTemplate {
        level: "info",
        message: format!("Searching for \"{query}\"..."),
    })
}

/// Acknowledge a search (HTMX). An empty query answers 204.
#[instrument]
pub async fn search(Form(form): Form<SearchForm>) -> Result<Response> {
    match search_notice(form.q.trim()) {
        Some(notice) => Ok(Html(notice.render()?).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
