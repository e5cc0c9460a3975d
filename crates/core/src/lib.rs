//! devrewoh core - Domain types for the portfolio site.
//!
//! This crate provides the types shared by the site binary and the CLI:
//! - `site` - Public portfolio, contact form, and Compress checkout
//! - `cli` - Migrations and issued-key lookup
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no database access,
//! no HTTP clients. The only side effect is reading OS randomness when a new
//! API key is minted.
//!
//! # Modules
//!
//! - [`types`] - Pricing tiers, API keys, email addresses, and contact-form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
