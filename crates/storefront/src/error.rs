//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Checkout could not proceed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Full-page error shown when the page itself cannot be rendered.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: &'static str,
}

/// Inline warning or confirmation fragment (for HTMX).
#[derive(Template)]
#[template(path = "partials/notice.html")]
pub struct NoticeTemplate {
    pub level: &'static str,
    pub message: String,
}

const GENERIC_ERROR: &str = "Something went wrong loading the store.";

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Render(_) | Self::Checkout(CheckoutError::Phone(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Checkout(CheckoutError::EmptyCart) => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match &self {
            Self::Render(_) => {
                let page = ErrorTemplate {
                    message: GENERIC_ERROR,
                };
                page.render().map_or_else(
                    |_| (status, GENERIC_ERROR).into_response(),
                    |html| (status, Html(html)).into_response(),
                )
            }
            Self::Checkout(CheckoutError::EmptyCart) => {
                let notice = NoticeTemplate {
                    level: "warning",
                    message: CheckoutError::EmptyCart.to_string(),
                };
                notice.render().map_or_else(
                    |_| (status, notice.message.clone()).into_response(),
                    |html| (status, Html(html)).into_response(),
                )
            }
            // Don't expose internal error details to clients
            Self::Checkout(CheckoutError::Phone(_)) => {
                (status, "Internal server error").into_response()
            }
            Self::BadRequest(_) => (status, self.to_string()).into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Item added", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bandhan_core::PhoneError;

    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::Phone(PhoneError::NoDigits))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_empty_cart_renders_warning() {
        let response = AppError::Checkout(CheckoutError::EmptyCart).into_response();
        let body = body_text(response).await;
        assert!(body.contains("alert-warning"));
        assert!(body.contains("Your cart is empty!"));
    }

    #[tokio::test]
    async fn test_render_error_shows_retry_page() {
        let response = AppError::Render(askama::Error::Fmt).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.contains("Retry"));
        assert!(body.contains(GENERIC_ERROR));
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let err = AppError::Checkout(CheckoutError::Phone(PhoneError::NoDigits));
        assert_eq!(body_text(err.into_response()).await, "Internal server error");
    }
}
