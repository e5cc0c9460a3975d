//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Home page
//! GET  /about              - About page
//! GET  /contact            - Contact form (?sent=true shows confirmation)
//! POST /contact            - Contact form submission
//!
//! # Compress
//! GET  /compress           - Product and pricing page
//! GET  /compress/docs      - API documentation
//! POST /checkout           - Start Stripe checkout for a tier
//! GET  /compress/success   - Confirm payment and show the new API key
//!
//! # Operations
//! GET  /health             - Liveness with version and uptime
//! GET  /health/ready       - Readiness (database reachable)
//! ```

pub mod checkout;
pub mod contact;
pub mod health;
pub mod pages;

use askama::Template;
use axum::{
    Form, Router,
    body::Body,
    extract::{FromRequest, Request},
    response::Html,
    routing::{get, post},
};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Largest accepted form body, in bytes.
pub const MAX_FORM_BYTES: usize = 32 * 1024;

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(contact::show).post(contact::submit))
        // Compress product
        .route("/compress", get(pages::compress))
        .route("/compress/docs", get(pages::docs))
        .route("/compress/success", get(checkout::success))
        .route("/checkout", post(checkout::create))
        // Operations
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
}

/// Render a template, turning failures into a logged 500.
pub(crate) fn render<T: Template>(template: &T, page: &'static str) -> Result<Html<String>> {
    template
        .render()
        .map(Html)
        .map_err(|source| AppError::Template { page, source })
}

/// URL-encoded form extractor that rejects bodies over [`MAX_FORM_BYTES`].
///
/// Oversized bodies, missing content types and malformed encodings all
/// become `400 Bad Request`.
pub struct LimitedForm<T>(pub T);

impl<T, S> FromRequest<S> for LimitedForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self> {
        let (parts, body) = request.into_parts();
        let bytes = axum::body::to_bytes(body, MAX_FORM_BYTES)
            .await
            .map_err(|_| AppError::BadRequest("Form too large".to_string()))?;

        let request = Request::from_parts(parts, Body::from(bytes));
        let Form(value) = Form::<T>::from_request(request, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}
