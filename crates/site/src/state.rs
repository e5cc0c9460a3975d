//! Application state shared across handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::services::CheckoutUrls;
use crate::stripe::{StripeClient, StripeError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the database pool, the Stripe
/// client and the instant the process started serving.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    stripe: StripeClient,
    checkout_urls: CheckoutUrls,
    started_at: Instant,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Stripe client cannot be built from the
    /// configured secret key.
    pub fn new(config: SiteConfig, pool: PgPool) -> Result<Self, StripeError> {
        let stripe = StripeClient::new(&config.stripe)?;
        let checkout_urls = CheckoutUrls::from_base(&config.base_url);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                stripe,
                checkout_urls,
                started_at: Instant::now(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    /// Success and cancel URLs handed to Stripe.
    #[must_use]
    pub fn checkout_urls(&self) -> &CheckoutUrls {
        &self.inner.checkout_urls
    }

    /// Time since the state was created.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.inner.started_at.elapsed()
    }

    /// State backed by a pool that never connects unless queried.
    #[cfg(test)]
    #[allow(clippy::unwrap_used)]
    pub(crate) fn for_tests() -> Self {
        use secrecy::ExposeSecret;

        let config = SiteConfig::for_tests();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy(config.database_url.expose_secret())
            .unwrap();
        Self::new(config, pool).unwrap()
    }
}
