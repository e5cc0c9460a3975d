//! Stripe Checkout wire types.
//!
//! Only the fields this site reads are modelled; everything else in the
//! Stripe response is ignored.

use serde::Deserialize;

/// Parameters for a one-off hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionRequest {
    pub price_id: String,
    pub quantity: u32,
    pub success_url: String,
    pub cancel_url: String,
}

/// A created checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page; absent once the session has completed or expired.
    #[serde(default)]
    pub url: Option<String>,
}

/// A retrieved checkout session, as needed to confirm payment.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionDetails {
    pub id: String,
    /// Total charged, in the smallest currency unit.
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl CheckoutSessionDetails {
    /// Payer email, preferring the address collected at checkout.
    #[must_use]
    pub fn payer_email(&self) -> Option<&str> {
        let present = |email: &&str| !email.is_empty();
        self.customer_details
            .as_ref()
            .and_then(|details| details.email.as_deref())
            .filter(present)
            .or_else(|| self.customer_email.as_deref().filter(present))
    }

    /// Whether Stripe reports the session as paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("paid")
    }
}

/// Customer details collected during checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
}

/// Stripe error envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieved_session_reads_customer_details_email() {
        let json = r#"{
            "id": "cs_test_123",
            "object": "checkout.session",
            "amount_total": 3900,
            "currency": "usd",
            "customer_details": {"email": "buyer@example.com", "name": "Buyer"},
            "customer_email": null,
            "payment_status": "paid"
        }"#;
        let session: CheckoutSessionDetails = serde_json::from_str(json).unwrap();
        assert_eq!(session.amount_total, Some(3900));
        assert_eq!(session.payer_email(), Some("buyer@example.com"));
        assert!(session.is_paid());
    }

    #[test]
    fn test_payer_email_falls_back_to_customer_email() {
        let json = r#"{"id": "cs_1", "customer_email": "prefill@example.com"}"#;
        let session: CheckoutSessionDetails = serde_json::from_str(json).unwrap();
        assert_eq!(session.payer_email(), Some("prefill@example.com"));
        assert_eq!(session.amount_total, None);
        assert!(!session.is_paid());
    }

    #[test]
    fn test_missing_email_is_none() {
        let json = r#"{"id": "cs_1", "customer_details": {"email": ""}}"#;
        let session: CheckoutSessionDetails = serde_json::from_str(json).unwrap();
        assert_eq!(session.payer_email(), None);
    }

    #[test]
    fn test_empty_details_email_falls_back_to_customer_email() {
        let json = r#"{
            "id": "cs_1",
            "customer_details": {"email": ""},
            "customer_email": "buyer@example.com"
        }"#;
        let session: CheckoutSessionDetails = serde_json::from_str(json).unwrap();
        assert_eq!(session.payer_email(), Some("buyer@example.com"));
    }

    #[test]
    fn test_created_session_url() {
        let json = r#"{"id": "cs_1", "url": "https://checkout.stripe.com/c/pay/cs_1"}"#;
        let session: CheckoutSession = serde_json::from_str(json).unwrap();
        assert_eq!(
            session.url.as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_1")
        );
    }

    #[test]
    fn test_error_envelope() {
        let json = r#"{"error": {"message": "No such price: 'price_x'", "type": "invalid_request_error"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.kind.as_deref(), Some("invalid_request_error"));
        assert_eq!(
            envelope.error.message.as_deref(),
            Some("No such price: 'price_x'")
        );
    }
}
