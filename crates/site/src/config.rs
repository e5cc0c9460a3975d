//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8080)
//! - `SITE_BASE_URL` - Public URL used for checkout redirects (default: <https://devrewoh.com>)
//! - `SITE_STATIC_DIR` - Static asset directory (default: crates/site/static)
//! - `STRIPE_SECRET_KEY` - Stripe secret API key
//! - `STRIPE_PRICE_STARTER` - Stripe price ID for the Starter tier
//! - `STRIPE_PRICE_GROWTH` - Stripe price ID for the Growth tier
//! - `STRIPE_PRICE_PRO` - Stripe price ID for the Professional tier
//! - `STRIPE_API_BASE` - Stripe API base URL (default: <https://api.stripe.com>)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use devrewoh_core::Tier;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://devrewoh.com";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_STATIC_DIR: &str = "crates/site/static";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used to build checkout redirect targets
    pub base_url: Url,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Stripe configuration
    pub stripe: StripeConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Stripe API configuration.
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key; checkout is unavailable without it
    pub secret_key: Option<SecretString>,
    /// API base URL
    pub api_base: Url,
    /// Price IDs per tier
    pub prices: PriceTable,
}

/// Stripe price IDs for each tier.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    pub starter: Option<String>,
    pub growth: Option<String>,
    pub professional: Option<String>,
}

impl PriceTable {
    /// Price ID configured for `tier`, if any.
    #[must_use]
    pub fn price_for(&self, tier: Tier) -> Option<&str> {
        match tier {
            Tier::Starter => self.starter.as_deref(),
            Tier::Growth => self.growth.as_deref(),
            Tier::Professional => self.professional.as_deref(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `DATABASE_URL` is missing or any variable
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_required_secret("DATABASE_URL")?;
        let host = parse_env("HOST", "0.0.0.0")?;
        let port = parse_env("PORT", "8080")?;
        let base_url = parse_env("SITE_BASE_URL", DEFAULT_BASE_URL)?;
        let static_dir = PathBuf::from(get_env_or_default("SITE_STATIC_DIR", DEFAULT_STATIC_DIR));
        let stripe = StripeConfig::from_env()?;
        let log_format = parse_env("LOG_FORMAT", "text")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            static_dir,
            stripe,
            log_format,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Configuration for unit tests: lazy database, no Stripe key.
    #[cfg(test)]
    #[allow(clippy::unwrap_used)]
    pub(crate) fn for_tests() -> Self {
        Self {
            database_url: SecretString::from("postgres://localhost/devrewoh_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            base_url: Url::parse("https://devrewoh.test").unwrap(),
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            stripe: StripeConfig {
                secret_key: None,
                api_base: Url::parse("http://127.0.0.1:9").unwrap(),
                prices: PriceTable {
                    starter: Some("price_starter".to_string()),
                    growth: Some("price_growth".to_string()),
                    professional: Some("price_pro".to_string()),
                },
            },
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StripeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret_key: get_optional_env("STRIPE_SECRET_KEY").map(SecretString::from),
            api_base: parse_env("STRIPE_API_BASE", DEFAULT_STRIPE_API_BASE)?,
            prices: PriceTable {
                starter: get_optional_env("STRIPE_PRICE_STARTER"),
                growth: get_optional_env("STRIPE_PRICE_GROWTH"),
                professional: get_optional_env("STRIPE_PRICE_PRO"),
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig::for_tests();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_price_table_lookup() {
        let prices = PriceTable {
            starter: Some("price_a".to_string()),
            growth: None,
            professional: Some("price_c".to_string()),
        };
        assert_eq!(prices.price_for(Tier::Starter), Some("price_a"));
        assert_eq!(prices.price_for(Tier::Growth), None);
        assert_eq!(prices.price_for(Tier::Professional), Some("price_c"));
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let mut config = SiteConfig::for_tests();
        config.database_url = SecretString::from("postgres://user:hunter2@db/site");
        config.stripe.secret_key = Some(SecretString::from("sk_test_supersecretvalue"));

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("devrewoh.test"));
        assert!(!debug_output.contains("hunter2"));
        assert!(!debug_output.contains("sk_test_supersecretvalue"));
    }
}
