//! Runtime configuration, read from the environment (and `.env` when present).

use crate::cart_actor::CartPolicy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Key the cart is persisted under.
    pub storage_key: String,
    /// Directory `FileStorage` writes into.
    pub storage_dir: PathBuf,
    /// Base URL of a remote Product/Stock Service. `None` runs the in-process catalog.
    pub api_url: Option<String>,
    pub http_timeout: Duration,
    /// Capacity of each actor's request channel.
    pub channel_buffer: usize,
    pub policy: CartPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(".cart-store"),
            api_url: None,
            http_timeout: Duration::from_millis(10_000),
            channel_buffer: 32,
            policy: CartPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Loads `.env` if present, then reads the `CART_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|var| env::var(var).ok())?;
        tracing::info!(
            storage_key = %config.storage_key,
            remote_catalog = config.api_url.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Builds a config from any variable source. Unset variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let storage_key = get("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        let storage_dir = get("CART_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);
        let api_url = get("CART_API_URL");

        let http_timeout = match get("CART_HTTP_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse("CART_HTTP_TIMEOUT_MS", &raw)?),
            None => defaults.http_timeout,
        };
        let channel_buffer = match get("CART_CHANNEL_BUFFER") {
            Some(raw) => match parse::<usize>("CART_CHANNEL_BUFFER", &raw)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        var: "CART_CHANNEL_BUFFER",
                        reason: "must be at least 1".to_string(),
                    })
                }
                n => n,
            },
            None => defaults.channel_buffer,
        };
        let check_stock_on_first_add = match get("CART_CHECK_STOCK_ON_FIRST_ADD") {
            Some(raw) => parse("CART_CHECK_STOCK_ON_FIRST_ADD", &raw)?,
            None => defaults.policy.check_stock_on_first_add,
        };

        Ok(Self {
            storage_key,
            storage_dir,
            api_url,
            http_timeout,
            channel_buffer,
            policy: CartPolicy {
                check_stock_on_first_add,
            },
        })
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: format!("{raw:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "@RocketShoes:cart");
        assert!(!config.policy.check_stock_on_first_add);
    }

    #[test]
    fn test_reads_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("CART_STORAGE_KEY", "shop:cart"),
            ("CART_API_URL", "http://localhost:3333"),
            ("CART_HTTP_TIMEOUT_MS", "250"),
            ("CART_CHANNEL_BUFFER", "8"),
            ("CART_CHECK_STOCK_ON_FIRST_ADD", "true"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "shop:cart");
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:3333"));
        assert_eq!(config.http_timeout, Duration::from_millis(250));
        assert_eq!(config.channel_buffer, 8);
        assert!(config.policy.check_stock_on_first_add);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = CartConfig::from_lookup(lookup(&[("CART_HTTP_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "CART_HTTP_TIMEOUT_MS", .. }));

        let err = CartConfig::from_lookup(lookup(&[("CART_CHANNEL_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "CART_CHANNEL_BUFFER", .. }));

        let err =
            CartConfig::from_lookup(lookup(&[("CART_CHECK_STOCK_ON_FIRST_ADD", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
