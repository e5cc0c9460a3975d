//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server errors are logged and
//! captured to Sentry before a generic message goes back to the client;
//! client errors are answered with a 400 and not logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::{CheckoutError, IssuanceError};

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Starting a checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Confirming a payment or issuing its key failed.
    #[error("Issuance error: {0}")]
    Issuance(#[from] IssuanceError),

    /// A page template failed to render.
    #[error("Template error in {page}: {source}")]
    Template {
        page: &'static str,
        #[source]
        source: askama::Error,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code sent to the client.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::Checkout(CheckoutError::InvalidTier(_))
            | Self::Issuance(IssuanceError::MissingSessionId) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Never includes internal detail.
    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Checkout(CheckoutError::InvalidTier(_)) => "Invalid tier".to_string(),
            Self::Checkout(_) => "Payment processing error".to_string(),
            Self::Issuance(err) => match err {
                IssuanceError::MissingSessionId => "Missing session ID".to_string(),
                IssuanceError::Provider(_) | IssuanceError::MissingEmail(_) => {
                    "Payment verification failed".to_string()
                }
                IssuanceError::KeyGeneration(_) | IssuanceError::Repository(_) => {
                    "Failed to create API key".to_string()
                }
            },
            Self::Template { .. } | Self::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, self.public_message()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
