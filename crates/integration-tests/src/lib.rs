//! Integration tests for the devrewoh site.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the site (and its database) first
//! cargo run -p devrewoh-cli -- migrate
//! cargo run -p devrewoh-site
//!
//! # Then run the ignored tests
//! cargo test -p devrewoh-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `site` - HTTP tests against a running server (`SITE_BASE_URL`)
//! - `api_keys` - Repository tests against a migrated database (`DATABASE_URL`)

use reqwest::{Client, redirect};

/// Base URL of the running site (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// HTTP client that reports redirects instead of following them.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
