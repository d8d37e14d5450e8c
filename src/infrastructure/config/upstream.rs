//! Upstream endpoint configuration.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::DEFAULT_USD_KRW;

/// `[upstream]` section: base URLs, request timeout and FX fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upbit_url")]
    pub upbit_url: String,
    #[serde(default = "default_bithumb_url")]
    pub bithumb_url: String,
    #[serde(default = "default_coingecko_url")]
    pub coingecko_url: String,
    /// Rate table endpoint; the base currency code is appended as a path segment.
    #[serde(default = "default_fx_url")]
    pub fx_url: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// USD/KRW rate used when the FX source is unreachable (default: 1350).
    #[serde(default = "default_fallback_fx_rate")]
    pub fallback_fx_rate: Decimal,
}

fn default_upbit_url() -> String {
    "https://api.upbit.com/v1".into()
}

fn default_bithumb_url() -> String {
    "https://api.bithumb.com/public".into()
}

fn default_coingecko_url() -> String {
    "https://api.coingecko.com/api/v3".into()
}

fn default_fx_url() -> String {
    "https://open.er-api.com/v6/latest".into()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_fallback_fx_rate() -> Decimal {
    DEFAULT_USD_KRW
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            upbit_url: default_upbit_url(),
            bithumb_url: default_bithumb_url(),
            coingecko_url: default_coingecko_url(),
            fx_url: default_fx_url(),
            timeout_secs: default_timeout_secs(),
            fallback_fx_rate: default_fallback_fx_rate(),
        }
    }
}

impl UpstreamConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `(field, url)` pairs for validation and diagnostics.
    #[must_use]
    pub fn endpoints(&self) -> [(&'static str, &str); 4] {
        [
            ("upbit_url", self.upbit_url.as_str()),
            ("bithumb_url", self.bithumb_url.as_str()),
            ("coingecko_url", self.coingecko_url.as_str()),
            ("fx_url", self.fx_url.as_str()),
        ]
    }
}
