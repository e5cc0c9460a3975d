//! Core types for the devrewoh site.
//!
//! This module provides type-safe wrappers for the commerce and contact domain.

pub mod api_key;
pub mod contact;
pub mod email;
pub mod tier;

pub use api_key::{API_KEY_TAG, ApiKeyError, DISPLAY_PREFIX_LENGTH, GeneratedApiKey, hash_secret};
pub use contact::{ContactField, ContactSubmission, FieldError};
pub use email::{Email, EmailError};
pub use tier::{CreditGrant, Tier, TierError};
