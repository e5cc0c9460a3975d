//! Stripe Checkout API client.
//!
//! Talks to the two Checkout Session endpoints the site needs:
//! - `POST /v1/checkout/sessions` - create a hosted payment session
//! - `GET /v1/checkout/sessions/{id}` - retrieve it after the buyer returns
//!
//! # Architecture
//!
//! Services depend on the [`CheckoutProvider`] trait rather than on
//! [`StripeClient`] directly, so checkout and issuance can be exercised
//! without network access.

pub mod types;

use std::future::Future;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use url::Url;

use crate::config::StripeConfig;

pub use types::{CheckoutSession, CheckoutSessionDetails, CheckoutSessionRequest, CustomerDetails};

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// No secret key is configured.
    #[error("Stripe secret key is not configured")]
    NotConfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response or build a request.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Created session has no hosted page URL.
    #[error("checkout session {0} has no redirect URL")]
    MissingUrl(String),
}

/// Hosted checkout operations used by the site.
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted payment session.
    fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> impl Future<Output = Result<CheckoutSession, StripeError>> + Send;

    /// Retrieve a session by ID.
    fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<CheckoutSessionDetails, StripeError>> + Send;
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    api_base: Url,
    configured: bool,
}

impl StripeClient {
    /// Create a new Stripe API client.
    ///
    /// A client built without a secret key fails every call with
    /// `StripeError::NotConfigured`.
    ///
    /// # Errors
    ///
    /// Returns error if the secret key is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let mut headers = HeaderMap::new();

        if let Some(secret_key) = &config.secret_key {
            let auth_value = format!("Bearer {}", secret_key.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| StripeError::Parse(format!("Invalid API key format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            configured: config.secret_key.is_some(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StripeError> {
        self.api_base
            .join(path)
            .map_err(|e| StripeError::Parse(format!("Invalid Stripe URL: {e}")))
    }

    const fn ensure_configured(&self) -> Result<(), StripeError> {
        if self.configured {
            Ok(())
        } else {
            Err(StripeError::NotConfigured)
        }
    }
}

impl CheckoutProvider for StripeClient {
    async fn create_checkout_session(
        &self,
        request: &CheckoutSessionRequest,
    ) -> Result<CheckoutSession, StripeError> {
        self.ensure_configured()?;

        let quantity = request.quantity.to_string();
        let params = [
            ("mode", "payment"),
            ("line_items[0][price]", request.price_id.as_str()),
            ("line_items[0][quantity]", quantity.as_str()),
            ("success_url", request.success_url.as_str()),
            ("cancel_url", request.cancel_url.as_str()),
        ];

        let response = self
            .client
            .post(self.endpoint("/v1/checkout/sessions")?)
            .form(&params)
            .send()
            .await?;

        let session: CheckoutSession = parse_response(response).await?;
        tracing::debug!(session_id = %session.id, "Stripe checkout session created");
        Ok(session)
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSessionDetails, StripeError> {
        self.ensure_configured()?;

        let path = format!("/v1/checkout/sessions/{}", urlencoding::encode(session_id));
        let response = self.client.get(self.endpoint(&path)?).send().await?;

        parse_response(response).await
    }
}

/// Turn a Stripe response into `T`, or an `Api` error with Stripe's message.
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, StripeError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<types::ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| {
                let kind = envelope.error.kind.unwrap_or_default();
                envelope
                    .error
                    .message
                    .map(|message| format!("{kind}: {message}"))
            })
            .unwrap_or(body);
        return Err(StripeError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| StripeError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::PriceTable;

    fn config(secret_key: Option<&str>) -> StripeConfig {
        StripeConfig {
            secret_key: secret_key.map(SecretString::from),
            api_base: Url::parse("https://api.stripe.com").unwrap(),
            prices: PriceTable::default(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_client_refuses_calls() {
        let client = StripeClient::new(&config(None)).unwrap();
        let request = CheckoutSessionRequest {
            price_id: "price_1".to_string(),
            quantity: 1,
            success_url: "https://example.com/ok".to_string(),
            cancel_url: "https://example.com/cancel".to_string(),
        };

        assert!(matches!(
            client.create_checkout_session(&request).await,
            Err(StripeError::NotConfigured)
        ));
        assert!(matches!(
            client.retrieve_checkout_session("cs_1").await,
            Err(StripeError::NotConfigured)
        ));
    }

    #[test]
    fn test_rejects_key_with_invalid_header_chars() {
        assert!(matches!(
            StripeClient::new(&config(Some("sk_test_\nbroken"))),
            Err(StripeError::Parse(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_base() {
        let client = StripeClient::new(&config(Some("sk_test_abc"))).unwrap();
        let url = client.endpoint("/v1/checkout/sessions/cs_1").unwrap();
        assert_eq!(url.as_str(), "https://api.stripe.com/v1/checkout/sessions/cs_1");
    }
}
