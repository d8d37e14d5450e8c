//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from an optional TOML file, then
//! selected values can be overridden from the environment (`ALERT_HIGH`,
//! `ALERT_LOW`, `ALERT_COINS`, `ALERT_INTERVAL`, `ALERT_COOLDOWN`).
//! Telegram credentials are never read from the file.
//!
//! # Example
//!
//! ```no_run
//! use kimchi::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::alerts::AlertsConfig;
use super::logging::LoggingConfig;
use super::upstream::UpstreamConfig;
use crate::domain::Symbol;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Alert thresholds, watched coins and monitor timing.
    #[serde(default)]
    pub alerts: AlertsConfig,

    /// Upstream market data endpoints.
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl Config {
    /// Parse configuration from TOML content and validate it.
    ///
    /// Environment overrides are not applied; see [`Config::apply_env`].
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// an override cannot be parsed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::load(path);
        }
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Apply overrides from the process environment, then validate.
    #[allow(clippy::result_large_err)]
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, then validate.
    #[allow(clippy::result_large_err)]
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = value("ALERT_HIGH") {
            self.alerts.high_pct = parse_decimal("ALERT_HIGH", &raw)?;
        }
        if let Some(raw) = value("ALERT_LOW") {
            self.alerts.low_pct = parse_decimal("ALERT_LOW", &raw)?;
        }
        if let Some(raw) = value("ALERT_COINS") {
            self.alerts.symbols = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect();
        }
        if let Some(raw) = value("ALERT_INTERVAL") {
            self.alerts.interval_minutes = parse_u64("ALERT_INTERVAL", &raw)?;
        }
        if let Some(raw) = value("ALERT_COOLDOWN") {
            self.alerts.cooldown_minutes = parse_u64("ALERT_COOLDOWN", &raw)?;
        }

        self.validate()
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        let alerts = &self.alerts;
        if alerts.high_pct <= alerts.low_pct {
            return Err(ConfigError::InvalidValue {
                field: "high_pct",
                reason: format!("must be greater than low_pct ({})", alerts.low_pct),
            }
            .into());
        }
        if alerts.watched_symbols().is_empty() {
            return Err(ConfigError::MissingField { field: "symbols" }.into());
        }
        if let Some(bad) = alerts
            .symbols
            .iter()
            .find(|s| !s.trim().is_empty() && !Symbol::new(s).is_well_formed())
        {
            return Err(ConfigError::InvalidValue {
                field: "symbols",
                reason: format!("'{bad}' is not an alphanumeric coin symbol"),
            }
            .into());
        }
        if alerts.interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_minutes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let upstream = &self.upstream;
        for (field, raw) in upstream.endpoints() {
            if raw.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
            let url = url::Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
                field,
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                }
                .into());
            }
        }
        if upstream.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if upstream.fallback_fx_rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "fallback_fx_rate",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[allow(clippy::result_large_err)]
fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal> {
    raw.trim().parse().map_err(|_| {
        ConfigError::InvalidValue {
            field,
            reason: format!("'{raw}' is not a number"),
        }
        .into()
    })
}

#[allow(clippy::result_large_err)]
fn parse_u64(field: &'static str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        ConfigError::InvalidValue {
            field,
            reason: format!("'{raw}' is not a non-negative integer"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    use crate::error::Error;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.alerts.high_pct, dec!(3.0));
        assert_eq!(config.alerts.symbols, vec!["BTC", "ETH", "XRP"]);
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.upstream.fallback_fx_rate, dec!(1350));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parses_alert_section() {
        let config = Config::parse_toml(
            r#"
            [alerts]
            high_pct = 4.5
            low_pct = -2
            symbols = ["sol", "doge"]
            interval_minutes = 1
            cooldown_minutes = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.alerts.high_pct, dec!(4.5));
        assert_eq!(config.alerts.low_pct, dec!(-2));
        assert_eq!(config.alerts.watched_symbols().len(), 2);
        assert_eq!(config.alerts.cooldown_minutes, 30);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("ALERT_HIGH", "5"),
                ("ALERT_LOW", "-3.5"),
                ("ALERT_COINS", "btc, sui ,"),
                ("ALERT_INTERVAL", "2"),
                ("ALERT_COOLDOWN", "15"),
            ]))
            .unwrap();

        assert_eq!(config.alerts.high_pct, dec!(5));
        assert_eq!(config.alerts.low_pct, dec!(-3.5));
        assert_eq!(config.alerts.symbols, vec!["btc", "sui"]);
        assert_eq!(config.alerts.interval_minutes, 2);
        assert_eq!(config.alerts.cooldown_minutes, 15);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ALERT_HIGH", "  ")])).unwrap();
        assert_eq!(config.alerts.high_pct, dec!(3.0));
    }

    #[test]
    fn invalid_env_number_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(env(&[("ALERT_INTERVAL", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "ALERT_INTERVAL",
                ..
            })
        ));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let err = Config::parse_toml("[alerts]\nhigh_pct = -2\nlow_pct = 1\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "high_pct",
                ..
            })
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(Config::parse_toml("[alerts]\ninterval_minutes = 0\n").is_err());
    }

    #[test]
    fn empty_symbol_list_is_rejected() {
        let err = Config::parse_toml("[alerts]\nsymbols = []\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "symbols" })
        ));
    }

    #[test]
    fn bad_upstream_url_is_rejected() {
        assert!(Config::parse_toml("[upstream]\nupbit_url = \"not a url\"\n").is_err());
        assert!(Config::parse_toml("[upstream]\nfx_url = \"ftp://example.com\"\n").is_err());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::parse_toml("[alerts\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
