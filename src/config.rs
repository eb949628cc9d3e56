//! Application configuration, read from the environment.
//!
//! A `.env` file is loaded first (see `main.rs`), so every key can live there.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::pricing::ZeroRatePolicy;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub pricing: PricingSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Currency and exchange-rate settings used at the pricing boundary
#[derive(Debug, Clone)]
pub struct PricingSettings {
    pub home_currency: String,
    pub foreign_currency: String,
    /// Used when a request omits `exchange_rate`
    pub default_exchange_rate: Decimal,
    pub zero_rate_policy: ZeroRatePolicy,
    /// Upper bound for persons, seats and bus counts in a request
    pub max_persons: u32,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            home_currency: "EGP".to_string(),
            foreign_currency: "SAR".to_string(),
            default_exchange_rate: dec!(13.5),
            zero_rate_policy: ZeroRatePolicy::Reject,
            max_persons: 5000,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let server = ServerConfig {
            host: lookup("PRICING_HOST").unwrap_or(defaults.server.host),
            port: parse_or(&lookup, "PRICING_PORT", defaults.server.port)?,
        };

        let pricing = PricingSettings {
            home_currency: lookup("PRICING_HOME_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(defaults.pricing.home_currency),
            foreign_currency: lookup("PRICING_FOREIGN_CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .unwrap_or(defaults.pricing.foreign_currency),
            default_exchange_rate: parse_or(
                &lookup,
                "PRICING_DEFAULT_EXCHANGE_RATE",
                defaults.pricing.default_exchange_rate,
            )?,
            zero_rate_policy: parse_or(
                &lookup,
                "PRICING_ZERO_RATE_POLICY",
                defaults.pricing.zero_rate_policy,
            )?,
            max_persons: parse_or(&lookup, "PRICING_MAX_PERSONS", defaults.pricing.max_persons)?,
        };

        if pricing.default_exchange_rate < Decimal::ZERO {
            return Err(ConfigError::Invalid {
                key: "PRICING_DEFAULT_EXCHANGE_RATE",
                value: pricing.default_exchange_rate.to_string(),
            });
        }

        if pricing.max_persons == 0 {
            return Err(ConfigError::Invalid {
                key: "PRICING_MAX_PERSONS",
                value: "0".to_string(),
            });
        }

        Ok(Config { server, pricing })
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.pricing.home_currency, "EGP");
        assert_eq!(config.pricing.foreign_currency, "SAR");
        assert_eq!(config.pricing.default_exchange_rate, dec!(13.5));
        assert_eq!(config.pricing.zero_rate_policy, ZeroRatePolicy::Reject);
        assert_eq!(config.pricing.max_persons, 5000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PRICING_HOST", "127.0.0.1"),
            ("PRICING_PORT", "9090"),
            ("PRICING_HOME_CURRENCY", "egp"),
            ("PRICING_DEFAULT_EXCHANGE_RATE", "14.25"),
            ("PRICING_ZERO_RATE_POLICY", "treat_as_one"),
            ("PRICING_MAX_PERSONS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.pricing.home_currency, "EGP");
        assert_eq!(config.pricing.default_exchange_rate, dec!(14.25));
        assert_eq!(config.pricing.zero_rate_policy, ZeroRatePolicy::TreatAsOne);
        assert_eq!(config.pricing.max_persons, 250);
    }

    #[test]
    fn test_invalid_values() {
        let err = Config::from_lookup(lookup_from(&[("PRICING_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PRICING_PORT"));

        let err =
            Config::from_lookup(lookup_from(&[("PRICING_ZERO_RATE_POLICY", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("PRICING_ZERO_RATE_POLICY"));

        let err = Config::from_lookup(lookup_from(&[("PRICING_DEFAULT_EXCHANGE_RATE", "-2")]))
            .unwrap_err();
        assert!(err.to_string().contains("PRICING_DEFAULT_EXCHANGE_RATE"));

        let err = Config::from_lookup(lookup_from(&[("PRICING_MAX_PERSONS", "0")])).unwrap_err();
        assert!(err.to_string().contains("PRICING_MAX_PERSONS"));
    }
}
