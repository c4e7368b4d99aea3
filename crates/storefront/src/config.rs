//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CATALOG_SOURCE` - Configuration URL or path
//!   (default: `organizations/bandhan/data/current configuration.json`)
//! - `STOREFRONT_CATALOG_TTL_SECS` - Catalog cache lifetime, 0 disables (default: 300)
//! - `STOREFRONT_FETCH_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `STOREFRONT_CART_DIR` - Directory holding the cart snapshot (default: data)
//! - `STOREFRONT_ASSETS_DIR` - Directory with `static/` and `organizations/` (default: .)
//! - `CHECKOUT_FALLBACK_PHONE` - Number used when the footer has none (default: 919876543210)
//! - `CHECKOUT_COUNTRY_CODE` - Prefix for local numbers (default: 91)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use bandhan_core::PhoneNumber;
use thiserror::Error;

use crate::catalog::{CatalogSettings, CatalogSource, DEFAULT_CATALOG_SOURCE};
use crate::checkout::{CheckoutSettings, DEFAULT_COUNTRY_CODE, DEFAULT_FALLBACK_PHONE};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where and how the catalog is loaded
    pub catalog: CatalogSettings,
    /// Directory for the cart snapshot
    pub cart_dir: PathBuf,
    /// Directory served under `/static` and `/organizations`
    pub assets_dir: PathBuf,
    /// WhatsApp destination settings
    pub checkout: CheckoutSettings,
    /// Sentry DSN for error tracking (optional)
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (optional)
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            catalog: CatalogSettings::default(),
            cart_dir: PathBuf::from("data"),
            assets_dir: PathBuf::from("."),
            checkout: CheckoutSettings::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parse_or("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parse_or("STOREFRONT_PORT", "3000")?;

        let catalog = CatalogSettings {
            source: CatalogSource::parse(
                &env.get_env_or_default("STOREFRONT_CATALOG_SOURCE", DEFAULT_CATALOG_SOURCE),
            ),
            cache_ttl: Duration::from_secs(env.parse_or("STOREFRONT_CATALOG_TTL_SECS", "300")?),
            fetch_timeout: Duration::from_secs(
                env.parse_or("STOREFRONT_FETCH_TIMEOUT_SECS", "10")?,
            ),
        };

        let checkout = CheckoutSettings {
            fallback_phone: env.get_env_or_default("CHECKOUT_FALLBACK_PHONE", DEFAULT_FALLBACK_PHONE),
            country_code: env.get_env_or_default("CHECKOUT_COUNTRY_CODE", DEFAULT_COUNTRY_CODE),
        };
        validate_checkout(&checkout)?;

        Ok(Self {
            host,
            port,
            catalog,
            cart_dir: PathBuf::from(env.get_env_or_default("STOREFRONT_CART_DIR", "data")),
            assets_dir: PathBuf::from(env.get_env_or_default("STOREFRONT_ASSETS_DIR", ".")),
            checkout,
            sentry_dsn: env.get_optional_env("SENTRY_DSN"),
            sentry_environment: env.get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Reject checkout settings that could never produce a destination.
fn validate_checkout(settings: &CheckoutSettings) -> Result<(), ConfigError> {
    let phone = PhoneNumber::from_display(&settings.fallback_phone).map_err(|e| {
        ConfigError::InvalidEnvVar("CHECKOUT_FALLBACK_PHONE".to_string(), e.to_string())
    })?;
    phone
        .with_country_code(&settings.country_code)
        .map_err(|e| ConfigError::InvalidEnvVar("CHECKOUT_COUNTRY_CODE".to_string(), e.to_string()))?;
    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable. Blank values count as unset.
    fn get_optional_env(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_env_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional_env(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_env_or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
