//! Payment confirmation and API key issuance.
//!
//! After Stripe redirects the buyer back, the session is retrieved, the paid
//! amount is mapped to a tier and credit allowance, and a new key is minted
//! and stored. The raw key leaves this module exactly once, in [`IssuedKey`].
//!
//! Issuance is not idempotent: confirming the same session twice mints two
//! independent keys.

use devrewoh_core::{ApiKeyError, CreditGrant, GeneratedApiKey};
use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use crate::db::{ApiKeyRepository, NewApiKey, RepositoryError};
use crate::stripe::{CheckoutProvider, StripeError};

/// Errors that can occur while confirming a payment and issuing a key.
#[derive(Debug, Error)]
pub enum IssuanceError {
    /// The return URL carried no session ID.
    #[error("missing checkout session id")]
    MissingSessionId,

    /// Stripe could not return the session.
    #[error("stripe error: {0}")]
    Provider(#[from] StripeError),

    /// The session has no payer email to attach the key to.
    #[error("checkout session {0} has no customer email")]
    MissingEmail(String),

    /// Random key material could not be generated.
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] ApiKeyError),

    /// The key could not be stored.
    #[error("failed to store api key: {0}")]
    Repository(#[from] RepositoryError),
}

/// What a retrieved checkout session says was bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub session_id: String,
    pub email: String,
    pub amount_cents: i64,
    pub grant: CreditGrant,
}

/// A minted key with its row, not yet stored.
#[derive(Debug)]
pub struct PendingCredential {
    pub key: GeneratedApiKey,
    pub record: NewApiKey,
}

/// A stored key, carrying the raw secret for the one-time display.
#[derive(Debug)]
pub struct IssuedKey {
    pub api_key: SecretString,
    pub key_prefix: String,
    pub tier_label: String,
    pub credits: i32,
    pub email: String,
}

/// Retrieve the session and work out what the buyer paid for.
///
/// Amounts that match no tier resolve to the `unknown` grant with zero
/// credits; this is logged but not treated as an error.
///
/// # Errors
///
/// Returns `MissingSessionId` for an absent or blank ID (before any provider
/// call), `Provider` if retrieval fails, and `MissingEmail` if the session
/// carries no payer email.
#[instrument(skip(provider))]
pub async fn confirm_payment<P: CheckoutProvider>(
    provider: &P,
    session_id: Option<&str>,
) -> Result<PaymentConfirmation, IssuanceError> {
    let session_id = session_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(IssuanceError::MissingSessionId)?;

    let session = provider.retrieve_checkout_session(session_id).await?;

    if !session.is_paid() {
        tracing::warn!(
            session_id = %session.id,
            payment_status = ?session.payment_status,
            "Issuing key for checkout session that is not marked paid"
        );
    }

    let email = session
        .payer_email()
        .ok_or_else(|| IssuanceError::MissingEmail(session.id.clone()))?
        .to_owned();

    let amount_cents = session.amount_total.unwrap_or_default();
    let grant = CreditGrant::from_amount_cents(amount_cents);
    if !grant.is_recognized() {
        tracing::warn!(
            session_id = %session.id,
            amount_cents,
            "Paid amount matches no tier; issuing zero-credit key"
        );
    }

    Ok(PaymentConfirmation {
        session_id: session.id,
        email,
        amount_cents,
        grant,
    })
}

/// Mint a fresh key for a confirmed payment.
///
/// # Errors
///
/// Returns `KeyGeneration` if the OS random source fails.
pub fn prepare_credential(
    confirmation: &PaymentConfirmation,
) -> Result<PendingCredential, IssuanceError> {
    let key = GeneratedApiKey::generate()?;
    let record = NewApiKey {
        key_hash: key.key_hash().to_owned(),
        key_prefix: key.key_prefix().to_owned(),
        user_email: confirmation.email.clone(),
        tier_label: confirmation.grant.label().to_owned(),
        credits: confirmation.grant.credits(),
    };

    Ok(PendingCredential { key, record })
}

/// Confirm the payment behind `session_id`, then mint and store a key.
///
/// # Errors
///
/// Any error from [`confirm_payment`] or [`prepare_credential`], or
/// `Repository` if the insert fails. No retry is attempted.
#[instrument(skip(pool, provider))]
pub async fn issue_api_key<P: CheckoutProvider>(
    pool: &PgPool,
    provider: &P,
    session_id: Option<&str>,
) -> Result<IssuedKey, IssuanceError> {
    let confirmation = confirm_payment(provider, session_id).await?;
    let PendingCredential { key, record } = prepare_credential(&confirmation)?;

    let stored = ApiKeyRepository::new(pool).insert(&record).await?;

    tracing::info!(
        api_key_id = stored.id,
        key_prefix = %stored.key_prefix,
        tier = %stored.tier_label,
        credits = stored.credits,
        session_id = %confirmation.session_id,
        "API key issued"
    );

    Ok(IssuedKey {
        api_key: key.into_secret(),
        key_prefix: stored.key_prefix,
        tier_label: stored.tier_label,
        credits: stored.credits,
        email: stored.user_email,
    })
}
