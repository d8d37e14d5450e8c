//! Exchange market listings, order books, candles and 24h movers.
//!
//! These types describe what a domestic exchange publishes about its own
//! markets. They carry no premium semantics.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::quote::{Currency, PriceQuote};
use super::symbol::Symbol;

/// Most candles an exchange returns for one request.
pub const MAX_CANDLES: u16 = 200;

/// Exchange market code such as `KRW-BTC` (quote first, then base).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MarketCode(String);

impl MarketCode {
    #[must_use]
    pub fn new(quote: Currency, base: &Symbol) -> Self {
        Self(format!("{}-{}", quote.code(), base))
    }

    /// Parse a `QUOTE-BASE` code. Returns `None` if either half is missing.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        let (quote, base) = code.split_once('-')?;
        if quote.is_empty() || base.is_empty() {
            return None;
        }
        Some(Self(code))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quote currency, if it is one this crate knows.
    #[must_use]
    pub fn quote(&self) -> Option<Currency> {
        self.0.split_once('-').and_then(|(q, _)| Currency::from_code(q))
    }

    #[must_use]
    pub fn base(&self) -> Symbol {
        let base = self.0.split_once('-').map_or("", |(_, b)| b);
        Symbol::new(base)
    }
}

impl fmt::Display for MarketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One price level on each side of an order book.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderbookLevel {
    pub ask_price: Decimal,
    pub ask_size: Decimal,
    pub bid_price: Decimal,
    pub bid_size: Decimal,
}

/// Order book snapshot, best levels first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Orderbook {
    pub market: MarketCode,
    pub levels: Vec<OrderbookLevel>,
    pub timestamp: DateTime<Utc>,
}

impl Orderbook {
    /// Keep only the best `depth` levels.
    pub fn truncate(&mut self, depth: usize) {
        self.levels.truncate(depth);
    }

    /// Best ask minus best bid.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        let best = self.levels.first()?;
        best.ask_price.checked_sub(best.bid_price)
    }
}

/// Candle width. Minute candles come in the units the exchange supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandleInterval {
    Minutes(u16),
    Days,
    Weeks,
    Months,
}

impl CandleInterval {
    pub const MINUTE_UNITS: [u16; 8] = [1, 3, 5, 10, 15, 30, 60, 240];

    /// Path segment used by the exchange, e.g. `minutes/60`.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Minutes(unit) => format!("minutes/{unit}"),
            Self::Days => "days".to_string(),
            Self::Weeks => "weeks".to_string(),
            Self::Months => "months".to_string(),
        }
    }
}

impl fmt::Display for CandleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for CandleInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "days" | "day" | "1d" => Ok(Self::Days),
            "weeks" | "week" | "1w" => Ok(Self::Weeks),
            "months" | "month" => Ok(Self::Months),
            other => {
                let unit = other
                    .strip_prefix("minutes/")
                    .or_else(|| other.strip_suffix('m'))
                    .and_then(|n| n.parse::<u16>().ok())
                    .ok_or_else(|| {
                        format!("unknown interval '{s}' (use minutes/N, days, weeks or months)")
                    })?;
                if Self::MINUTE_UNITS.contains(&unit) {
                    Ok(Self::Minutes(unit))
                } else {
                    Err(format!(
                        "unsupported minute unit {unit} (use one of {:?})",
                        Self::MINUTE_UNITS
                    ))
                }
            }
        }
    }
}

/// OHLC candle. Times are exchange-local (KST) as published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub opened_at_kst: NaiveDateTime,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

/// Which end of the 24h change ranking to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoverDirection {
    Up,
    Down,
}

/// Rank tickers by 24h change rate and keep the top `limit`.
///
/// Quotes without 24h statistics are dropped. Ties keep upstream order.
#[must_use]
pub fn rank_movers(
    quotes: Vec<PriceQuote>,
    direction: MoverDirection,
    limit: usize,
) -> Vec<PriceQuote> {
    let mut ranked: Vec<(Decimal, PriceQuote)> = quotes
        .into_iter()
        .filter_map(|q| q.stats().map(|s| s.change_rate).map(|rate| (rate, q)))
        .collect();

    match direction {
        MoverDirection::Up => ranked.sort_by(|a, b| b.0.cmp(&a.0)),
        MoverDirection::Down => ranked.sort_by(|a, b| a.0.cmp(&b.0)),
    }

    ranked.into_iter().take(limit).map(|(_, q)| q).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Source, TickerStats};
    use rust_decimal_macros::dec;

    fn quote(symbol: &str, change_rate: Decimal) -> PriceQuote {
        PriceQuote::new(symbol, dec!(1000), Currency::Krw, Source::Upbit, Utc::now()).with_stats(
            TickerStats {
                change_rate,
                change_price: dec!(0),
                high: dec!(1100),
                low: dec!(900),
                turnover_24h: dec!(1000000),
            },
        )
    }

    fn symbols(quotes: &[PriceQuote]) -> Vec<&str> {
        quotes.iter().map(PriceQuote::symbol).collect()
    }

    #[test]
    fn market_code_parts() {
        let code = MarketCode::parse("krw-btc").unwrap();
        assert_eq!(code.as_str(), "KRW-BTC");
        assert_eq!(code.quote(), Some(Currency::Krw));
        assert_eq!(code.base(), Symbol::new("BTC"));
        assert_eq!(MarketCode::new(Currency::Usdt, &Symbol::new("eth")).as_str(), "USDT-ETH");
        assert!(MarketCode::parse("BTC").is_none());
        assert!(MarketCode::parse("KRW-").is_none());
    }

    #[test]
    fn interval_parsing() {
        assert_eq!("days".parse::<CandleInterval>(), Ok(CandleInterval::Days));
        assert_eq!("minutes/60".parse(), Ok(CandleInterval::Minutes(60)));
        assert_eq!("15m".parse(), Ok(CandleInterval::Minutes(15)));
        assert_eq!(CandleInterval::Minutes(240).path(), "minutes/240");
        assert!("minutes/7".parse::<CandleInterval>().is_err());
        assert!("hours".parse::<CandleInterval>().is_err());
    }

    #[test]
    fn movers_rank_both_ways() {
        let quotes = vec![
            quote("AAA", dec!(0.01)),
            quote("BBB", dec!(-0.05)),
            quote("CCC", dec!(0.12)),
            quote("DDD", dec!(0)),
        ];

        let up = rank_movers(quotes.clone(), MoverDirection::Up, 2);
        assert_eq!(symbols(&up), vec!["CCC", "AAA"]);

        let down = rank_movers(quotes, MoverDirection::Down, 10);
        assert_eq!(symbols(&down), vec!["BBB", "DDD", "AAA", "CCC"]);
    }

    #[test]
    fn movers_skip_quotes_without_stats() {
        let bare = PriceQuote::new("EEE", dec!(5), Currency::Krw, Source::Upbit, Utc::now());
        let ranked = rank_movers(vec![bare, quote("AAA", dec!(0.02))], MoverDirection::Up, 10);
        assert_eq!(symbols(&ranked), vec!["AAA"]);
    }

    #[test]
    fn spread_uses_best_level() {
        let book = Orderbook {
            market: MarketCode::parse("KRW-BTC").unwrap(),
            levels: vec![
                OrderbookLevel {
                    ask_price: dec!(100010000),
                    ask_size: dec!(0.5),
                    bid_price: dec!(100000000),
                    bid_size: dec!(1.2),
                },
                OrderbookLevel {
                    ask_price: dec!(100020000),
                    ask_size: dec!(0.1),
                    bid_price: dec!(99990000),
                    bid_size: dec!(0.3),
                },
            ],
            timestamp: Utc::now(),
        };
        assert_eq!(book.spread(), Some(dec!(10000)));
    }
}
