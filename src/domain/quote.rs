//! Price snapshots returned by upstream market data sources.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Upstream data source a value was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Domestic exchange A (KRW market).
    Upbit,
    /// Domestic exchange B (KRW market).
    Bithumb,
    /// Global reference index (USD).
    CoinGecko,
    /// Foreign-exchange rate table.
    ExchangeRate,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Upbit => "Upbit",
            Self::Bithumb => "Bithumb",
            Self::CoinGecko => "CoinGecko",
            Self::ExchangeRate => "ExchangeRate",
        };
        f.write_str(name)
    }
}

/// Quote currency of a price or market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Krw,
    Usd,
    Btc,
    Usdt,
}

impl Currency {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Krw => "KRW",
            Self::Usd => "USD",
            Self::Btc => "BTC",
            Self::Usdt => "USDT",
        }
    }

    /// Parse an upper-case ISO or exchange code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KRW" => Some(Self::Krw),
            "USD" => Some(Self::Usd),
            "BTC" => Some(Self::Btc),
            "USDT" => Some(Self::Usdt),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Direction of a price versus the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rise,
    Even,
    Fall,
}

/// 24h market statistics reported alongside a domestic ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerStats {
    /// Signed change versus the previous close, as a fraction (0.012 = +1.2%).
    pub change_rate: Decimal,
    /// Signed change versus the previous close, in the quote currency.
    pub change_price: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    /// 24h traded value in the quote currency.
    pub turnover_24h: Decimal,
}

impl TickerStats {
    #[must_use]
    pub fn trend(&self) -> Trend {
        if self.change_rate > Decimal::ZERO {
            Trend::Rise
        } else if self.change_rate < Decimal::ZERO {
            Trend::Fall
        } else {
            Trend::Even
        }
    }

    /// Change rate as a percentage.
    #[must_use]
    pub fn change_pct(&self) -> Decimal {
        self.change_rate.saturating_mul(Decimal::ONE_HUNDRED)
    }
}

/// Immutable price snapshot of one asset on one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    symbol: String,
    price: Decimal,
    currency: Currency,
    source: Source,
    timestamp: DateTime<Utc>,
    stats: Option<TickerStats>,
}

impl PriceQuote {
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        price: Decimal,
        currency: Currency,
        source: Source,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            currency,
            source,
            timestamp,
            stats: None,
        }
    }

    #[must_use]
    pub fn with_stats(mut self, stats: TickerStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn stats(&self) -> Option<&TickerStats> {
        self.stats.as_ref()
    }
}
