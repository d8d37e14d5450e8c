//! Alert monitor configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::{AlertThresholds, Symbol};

/// `[alerts]` section: thresholds, watched coins and timing.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertsConfig {
    /// Alert when the premium is at or above this percentage (default: 3.0).
    #[serde(default = "default_high_pct")]
    pub high_pct: Decimal,
    /// Alert when the premium is at or below this percentage (default: -1.0).
    #[serde(default = "default_low_pct")]
    pub low_pct: Decimal,
    /// Coins to watch, in check order (default: BTC, ETH, XRP).
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// Minutes between monitor ticks (default: 5).
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
    /// Minutes before the same alert key may fire again (default: 60).
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u64,
    /// Seconds to wait before the first tick (default: 10).
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,
}

fn default_high_pct() -> Decimal {
    dec!(3.0)
}

fn default_low_pct() -> Decimal {
    dec!(-1.0)
}

fn default_symbols() -> Vec<String> {
    vec!["BTC".to_string(), "ETH".to_string(), "XRP".to_string()]
}

/// Upper bound keeping the cooldown representable as a `chrono::Duration`.
const MAX_COOLDOWN_MINUTES: i64 = 100 * 365 * 24 * 60;

const fn default_interval_minutes() -> u64 {
    5
}

const fn default_cooldown_minutes() -> u64 {
    60
}

const fn default_initial_delay_secs() -> u64 {
    10
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            high_pct: default_high_pct(),
            low_pct: default_low_pct(),
            symbols: default_symbols(),
            interval_minutes: default_interval_minutes(),
            cooldown_minutes: default_cooldown_minutes(),
            initial_delay_secs: default_initial_delay_secs(),
        }
    }
}

impl AlertsConfig {
    #[must_use]
    pub fn thresholds(&self) -> AlertThresholds {
        let cooldown_minutes = i64::try_from(self.cooldown_minutes)
            .unwrap_or(MAX_COOLDOWN_MINUTES)
            .min(MAX_COOLDOWN_MINUTES);
        AlertThresholds {
            high_pct: self.high_pct,
            low_pct: self.low_pct,
            cooldown: chrono::Duration::minutes(cooldown_minutes),
        }
    }

    /// Normalized watched symbols, de-duplicated with first occurrence kept.
    #[must_use]
    pub fn watched_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = Vec::with_capacity(self.symbols.len());
        for raw in &self.symbols {
            let symbol = Symbol::new(raw);
            if !symbol.is_empty() && !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        symbols
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }

    #[must_use]
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AlertsConfig::default();
        let thresholds = config.thresholds();
        assert_eq!(thresholds.high_pct, dec!(3.0));
        assert_eq!(thresholds.low_pct, dec!(-1.0));
        assert_eq!(thresholds.cooldown, chrono::Duration::minutes(60));
        assert_eq!(config.interval(), Duration::from_secs(300));
        assert_eq!(config.initial_delay(), Duration::from_secs(10));
    }

    #[test]
    fn watched_symbols_are_normalized_and_deduplicated() {
        let config = AlertsConfig {
            symbols: vec![
                "btc".to_string(),
                " ETH ".to_string(),
                "BTC".to_string(),
                String::new(),
                "sol".to_string(),
            ],
            ..Default::default()
        };
        let symbols: Vec<_> = config
            .watched_symbols()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(symbols, vec!["BTC", "ETH", "SOL"]);
    }
}
