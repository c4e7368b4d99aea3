//! Newsletter signup route handler.
//!
//! There is no mailing list behind the form; a signup is acknowledged with a
//! notice fragment and logged.

use askama::Template;
use axum::{
    Form,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{NoticeTemplate, Result};

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

fn subscribe_notice(email: &str) -> NoticeTemplate {
    if email.is_empty() {
        NoticeTemplate {
            level: "warning",
            message: "Please enter a valid email address.".to_string(),
        }
    } else {
        NoticeTemplate {
            level: "success",
            message: "Thank you for subscribing to our newsletter!".to_string(),
        }
    }
}

/// Subscribe to the newsletter (HTMX).
#[instrument(skip(form))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> Result<Response> {
    let email = form.email.trim();
    if !email.is_empty() {
        tracing::info!("Newsletter signup received");
    }
    Ok(Html(subscribe_notice(email).render()?).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_notice() {
        let thanks = subscribe_notice("asha@example.com");
        assert_eq!(thanks.level, "success");
        assert_eq!(thanks.message, "Thank you for subscribing to our newsletter!");

        assert_eq!(subscribe_notice("").level, "warning");
    }
}
