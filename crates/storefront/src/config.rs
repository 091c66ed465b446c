//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VIKI_DATA_DIR` - Directory backing the persisted key-value slots (default: `.viki`)
//! - `VIKI_CURRENCY` - ISO 4217 currency code for display (default: NGN)
//! - `VIKI_SHIPPING_COST` - Flat shipping fee in minor units (default: 500000)
//! - `VIKI_CONTACT_ENDPOINT` - Form-intake URL for the support form
//! - `VIKI_CONTACT_RESET_DELAY_MS` - Delay before the support form's submit
//!   control is re-enabled (default: 1500)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;
use viki_core::{CurrencyCode, MinorUnits};

use crate::pricing::Pricing;

/// Flat shipping fee: ₦5,000.00 in kobo.
pub const DEFAULT_SHIPPING_COST: MinorUnits = MinorUnits::new(500_000);

/// Form-intake endpoint the support form posts to.
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://formspree.io/f/xldadpjg";

const DEFAULT_DATA_DIR: &str = ".viki";
const DEFAULT_RESET_DELAY_MS: u64 = 1500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding one JSON file per persisted slot
    pub data_dir: PathBuf,
    /// Currency and shipping used for totals and display
    pub pricing: Pricing,
    /// Support form integration
    pub contact: ContactConfig,
}

/// Support form (third-party form intake) configuration.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Endpoint receiving the form-encoded POST
    pub endpoint: Url,
    /// How long the submit control stays disabled after a submission settles
    pub reset_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pricing: Pricing::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_contact_endpoint(),
            reset_delay: Duration::from_millis(DEFAULT_RESET_DELAY_MS),
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("VIKI_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let currency = match lookup("VIKI_CURRENCY") {
            Some(value) => value
                .parse::<CurrencyCode>()
                .map_err(|e| invalid("VIKI_CURRENCY", &e))?,
            None => CurrencyCode::default(),
        };

        let shipping = match lookup("VIKI_SHIPPING_COST") {
            Some(value) => {
                let amount = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| invalid("VIKI_SHIPPING_COST", &e))?;
                if amount < 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "VIKI_SHIPPING_COST".to_string(),
                        "must not be negative".to_string(),
                    ));
                }
                MinorUnits::new(amount)
            }
            None => DEFAULT_SHIPPING_COST,
        };

        let endpoint = match lookup("VIKI_CONTACT_ENDPOINT") {
            Some(value) => {
                Url::parse(value.trim()).map_err(|e| invalid("VIKI_CONTACT_ENDPOINT", &e))?
            }
            None => default_contact_endpoint(),
        };

        let reset_delay = match lookup("VIKI_CONTACT_RESET_DELAY_MS") {
            Some(value) => Duration::from_millis(
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| invalid("VIKI_CONTACT_RESET_DELAY_MS", &e))?,
            ),
            None => Duration::from_millis(DEFAULT_RESET_DELAY_MS),
        };

        Ok(Self {
            data_dir,
            pricing: Pricing::new(currency, shipping),
            contact: ContactConfig {
                endpoint,
                reset_delay,
            },
        })
    }
}

fn invalid(key: &str, err: &impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

fn default_contact_endpoint() -> Url {
    Url::parse(DEFAULT_CONTACT_ENDPOINT).expect("default contact endpoint is a valid URL")
}
