//! Checkout orchestration.
//!
//! Resolves the submitted tier to its Stripe price and creates a hosted
//! checkout session. The tier is validated before Stripe is contacted.

use devrewoh_core::{Tier, TierError};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::PriceTable;
use crate::stripe::{CheckoutProvider, CheckoutSessionRequest, StripeError};

/// Placeholder Stripe substitutes with the real session ID on redirect.
const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Errors that can occur while starting a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The submitted tier is not recognized.
    #[error("invalid tier: {0}")]
    InvalidTier(#[from] TierError),

    /// The tier is known but no Stripe price is configured for it.
    #[error("no Stripe price configured for tier {0}")]
    PriceNotConfigured(Tier),

    /// Stripe rejected or failed the request.
    #[error("stripe error: {0}")]
    Provider(#[from] StripeError),
}

/// Where Stripe sends the buyer after paying or cancelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutUrls {
    /// Build the redirect targets under the site's public base URL.
    #[must_use]
    pub fn from_base(base_url: &Url) -> Self {
        let base = base_url.as_str().trim_end_matches('/');
        Self {
            success_url: format!("{base}/compress/success?session_id={SESSION_ID_PLACEHOLDER}"),
            cancel_url: format!("{base}/compress"),
        }
    }
}

/// Start a hosted checkout for `tier_label` and return the redirect URL.
///
/// # Errors
///
/// Returns `CheckoutError::InvalidTier` for unknown labels (before any
/// provider call), `PriceNotConfigured` when the tier has no price, and
/// `Provider` when Stripe fails or returns no URL.
#[instrument(skip(provider, prices, urls))]
pub async fn start_checkout<P: CheckoutProvider>(
    provider: &P,
    prices: &PriceTable,
    urls: &CheckoutUrls,
    tier_label: &str,
) -> Result<String, CheckoutError> {
    let tier: Tier = tier_label.parse()?;
    let price_id = prices
        .price_for(tier)
        .ok_or(CheckoutError::PriceNotConfigured(tier))?;

    let request = CheckoutSessionRequest {
        price_id: price_id.to_owned(),
        quantity: 1,
        success_url: urls.success_url.clone(),
        cancel_url: urls.cancel_url.clone(),
    };

    let session = provider.create_checkout_session(&request).await?;
    let url = session
        .url
        .ok_or_else(|| StripeError::MissingUrl(session.id.clone()))?;

    tracing::info!(tier = %tier, session_id = %session.id, "Checkout session created");
    Ok(url)
}
