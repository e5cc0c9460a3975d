//! Compress checkout route handlers.
//!
//! `POST /checkout` sends the buyer to Stripe; Stripe sends them back to
//! `GET /compress/success`, where the key is minted and shown once.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use super::{LimitedForm, render};
use crate::error::Result;
use crate::filters;
use crate::services::{IssuedKey, issue_api_key, start_checkout};
use crate::state::AppState;

/// Tier selection form.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub tier: String,
}

/// Query Stripe appends to the success URL.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub session_id: Option<String>,
}

/// Payment confirmation page template.
#[derive(Template)]
#[template(path = "success.html")]
pub struct SuccessTemplate {
    pub api_key: String,
    pub tier: String,
    pub credits: i32,
    pub email: String,
}

impl From<IssuedKey> for SuccessTemplate {
    fn from(issued: IssuedKey) -> Self {
        Self {
            api_key: issued.api_key.expose_secret().to_owned(),
            tier: issued.tier_label,
            credits: issued.credits,
            email: issued.email,
        }
    }
}

/// Start a Stripe checkout for the selected tier.
///
/// POST /checkout
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    LimitedForm(form): LimitedForm<CheckoutForm>,
) -> Result<Redirect> {
    let url = start_checkout(
        state.stripe(),
        &state.config().stripe.prices,
        state.checkout_urls(),
        &form.tier,
    )
    .await?;

    Ok(Redirect::to(&url))
}

/// Confirm the payment and display the newly issued key.
///
/// GET /compress/success?session_id=...
#[instrument(skip_all)]
pub async fn success(
    State(state): State<AppState>,
    Query(query): Query<SuccessQuery>,
) -> Result<Response> {
    let issued = issue_api_key(state.pool(), state.stripe(), query.session_id.as_deref()).await?;
    let page = render(&SuccessTemplate::from(issued), "success")?;

    Ok(([(CACHE_CONTROL, "no-store")], page).into_response())
}
