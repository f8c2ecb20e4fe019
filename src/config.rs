//! Provider credentials.

use anyhow::{Context, Result, bail};
use std::env;

/// Credentials issued by the provider for the integrating application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Customer id, sent as the `customer` form field and bound into the
    /// request signature.
    pub customer_id: String,
    /// Authorization key, only ever bound into the signature.
    pub key: String,
}

impl Config {
    pub fn new(customer_id: impl Into<String>, key: impl Into<String>) -> Self {
        Config {
            customer_id: customer_id.into(),
            key: key.into(),
        }
    }

    /// Load credentials from environment variables
    ///
    /// # Environment Variables
    /// - `KUAIDI100_CUSTOMER`: Required - customer id issued by the provider
    /// - `KUAIDI100_KEY`: Required - authorization key issued by the provider
    pub fn from_env() -> Result<Self> {
        let customer_id = env::var("KUAIDI100_CUSTOMER")
            .context("KUAIDI100_CUSTOMER not set")?;

        if customer_id.trim().is_empty() {
            bail!("KUAIDI100_CUSTOMER cannot be empty");
        }

        let key = env::var("KUAIDI100_KEY")
            .context("KUAIDI100_KEY not set")?;

        if key.trim().is_empty() {
            bail!("KUAIDI100_KEY cannot be empty");
        }

        Ok(Config { customer_id, key })
    }
}
