//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL; `https` enables secure cookies
//!   (default: <http://localhost:3000>)
//! - `SHOPFRONT_SHIPPING_FLAT` - Flat shipping charge (default: 5.99)
//! - `SHOPFRONT_TAX_RATE` - Tax rate applied to the subtotal (default: 0.10)
//! - `SHOPFRONT_CURRENCY` - Display currency code (default: USD)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rust_decimal::Decimal;
use secrecy::SecretString;
use shopfront_core::{CurrencyCode, Money, PricingPolicy};
use thiserror::Error;
use url::Url;

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
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Shipping and tax applied to every cart
    pub pricing: PricingPolicy,
    /// Currency used when formatting amounts
    pub currency: CurrencyCode,
    /// Sentry DSN for error tracking (contains the project key)
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        dotenvy::dotenv().ok();

        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_or_default(lookup, "STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_or_default(lookup, "STOREFRONT_PORT", "3000")?;
        let base_url = parse_or_default(lookup, "STOREFRONT_BASE_URL", "http://localhost:3000")?;

        let shipping_flat: Money = parse_or_default(lookup, "SHOPFRONT_SHIPPING_FLAT", "5.99")?;
        let tax_rate: Decimal = parse_or_default(lookup, "SHOPFRONT_TAX_RATE", "0.10")?;
        let pricing = PricingPolicy::new(shipping_flat, tax_rate).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_TAX_RATE".to_string(), e.to_string())
        })?;
        let currency = parse_or_default(lookup, "SHOPFRONT_CURRENCY", "USD")?;

        let sentry_dsn = lookup("SENTRY_DSN")
            .filter(|dsn| !dsn.is_empty())
            .map(SecretString::from);
        let sentry_environment = lookup("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate(lookup, "SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_rate(lookup, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            host,
            port,
            base_url,
            pricing,
            currency,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to a default when it is unset.
fn parse_or_default<T>(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate that must lie within `0.0..=1.0`.
fn parse_rate(
    lookup: &dyn Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<f32, ConfigError> {
    let rate: f32 = parse_or_default(lookup, key, default)?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(&|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.pricing, PricingPolicy::default());
        assert_eq!(config.currency, CurrencyCode::USD);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_pricing_overrides() {
        let config = load(&[
            ("SHOPFRONT_SHIPPING_FLAT", "0"),
            ("SHOPFRONT_TAX_RATE", "0.2"),
            ("SHOPFRONT_CURRENCY", "eur"),
        ])
        .unwrap();
        assert!(config.pricing.shipping_flat().is_zero());
        assert_eq!(config.pricing.tax_rate(), Decimal::new(2, 1));
        assert_eq!(config.currency, CurrencyCode::EUR);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_negative_shipping_rejected() {
        let err = load(&[("SHOPFRONT_SHIPPING_FLAT", "-5")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SHOPFRONT_SHIPPING_FLAT"));
    }

    #[test]
    fn test_negative_tax_rate_rejected() {
        let err = load(&[("SHOPFRONT_TAX_RATE", "-0.1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SHOPFRONT_TAX_RATE"));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let err = load(&[("SENTRY_SAMPLE_RATE", "1.5")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SENTRY_SAMPLE_RATE"));
    }

    #[test]
    fn test_https_base_url_is_secure() {
        let config = load(&[("STOREFRONT_BASE_URL", "https://shop.example.com")]).unwrap();
        assert!(config.is_secure());
    }

    #[test]
    fn test_sentry_dsn_is_secret() {
        let config = load(&[("SENTRY_DSN", "https://key@o0.ingest.sentry.io/1")]).unwrap();
        let dsn = config.sentry_dsn.as_ref().unwrap();
        assert_eq!(dsn.expose_secret(), "https://key@o0.ingest.sentry.io/1");
        assert!(!format!("{config:?}").contains("key@o0"));
    }

    #[test]
    fn test_empty_sentry_dsn_is_ignored() {
        let config = load(&[("SENTRY_DSN", "")]).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
