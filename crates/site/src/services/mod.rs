//! Business logic services for the site.
//!
//! # Services
//!
//! - `checkout` - Tier selection to hosted Stripe checkout
//! - `issuance` - Payment confirmation and API key minting

pub mod checkout;
pub mod issuance;

pub use checkout::{CheckoutError, CheckoutUrls, start_checkout};
pub use issuance::{
    IssuanceError, IssuedKey, PaymentConfirmation, PendingCredential, confirm_payment,
    issue_api_key, prepare_credential,
};
