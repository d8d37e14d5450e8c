//! Upbit REST payloads and their conversion into domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{
    Candle, MarketCode, Orderbook, OrderbookLevel, PriceQuote, Source, TickerStats,
};
use crate::error::MarketDataError;

/// Element of `/market/all`.
#[derive(Debug, Deserialize)]
pub(super) struct UpbitMarket {
    pub market: String,
}

/// Element of `/ticker`.
#[derive(Debug, Deserialize)]
pub(super) struct UpbitTicker {
    pub market: String,
    pub trade_price: Decimal,
    #[serde(default)]
    pub signed_change_rate: Option<Decimal>,
    #[serde(default)]
    pub signed_change_price: Option<Decimal>,
    #[serde(default)]
    pub high_price: Option<Decimal>,
    #[serde(default)]
    pub low_price: Option<Decimal>,
    #[serde(default)]
    pub acc_trade_price_24h: Option<Decimal>,
    /// Unix milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Element of `/orderbook`.
#[derive(Debug, Deserialize)]
pub(super) struct UpbitOrderbook {
    pub market: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub orderbook_units: Vec<UpbitOrderbookUnit>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpbitOrderbookUnit {
    pub ask_price: Decimal,
    pub bid_price: Decimal,
    pub ask_size: Decimal,
    pub bid_size: Decimal,
}

/// Element of `/candles/{unit}`.
#[derive(Debug, Deserialize)]
pub(super) struct UpbitCandle {
    pub candle_date_time_kst: NaiveDateTime,
    pub opening_price: Decimal,
    pub high_price: Decimal,
    pub low_price: Decimal,
    pub trade_price: Decimal,
}

fn timestamp_or_now(millis: Option<i64>) -> DateTime<Utc> {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}

fn market_code(raw: &str) -> Result<MarketCode, MarketDataError> {
    MarketCode::parse(raw)
        .ok_or_else(|| MarketDataError::unavailable(Source::Upbit, format!("bad market code '{raw}'")))
}

impl UpbitTicker {
    /// Quote for the ticker's base coin, priced in its market's quote currency.
    pub fn into_quote(self) -> Result<PriceQuote, MarketDataError> {
        let code = market_code(&self.market)?;
        let currency = code.quote().ok_or_else(|| {
            MarketDataError::unavailable(Source::Upbit, format!("unknown quote in '{code}'"))
        })?;

        let quote = PriceQuote::new(
            code.base().as_str(),
            self.trade_price,
            currency,
            Source::Upbit,
            timestamp_or_now(self.timestamp),
        );

        let stats = match (
            self.signed_change_rate,
            self.high_price,
            self.low_price,
            self.acc_trade_price_24h,
        ) {
            (Some(change_rate), Some(high), Some(low), Some(turnover_24h)) => Some(TickerStats {
                change_rate,
                change_price: self.signed_change_price.unwrap_or_default(),
                high,
                low,
                turnover_24h,
            }),
            _ => None,
        };

        Ok(match stats {
            Some(stats) => quote.with_stats(stats),
            None => quote,
        })
    }
}

impl UpbitOrderbook {
    pub fn into_orderbook(self) -> Result<Orderbook, MarketDataError> {
        Ok(Orderbook {
            market: market_code(&self.market)?,
            levels: self
                .orderbook_units
                .into_iter()
                .map(|u| OrderbookLevel {
                    ask_price: u.ask_price,
                    ask_size: u.ask_size,
                    bid_price: u.bid_price,
                    bid_size: u.bid_size,
                })
                .collect(),
            timestamp: timestamp_or_now(self.timestamp),
        })
    }
}

impl From<UpbitCandle> for Candle {
    fn from(c: UpbitCandle) -> Self {
        Self {
            opened_at_kst: c.candle_date_time_kst,
            open: c.opening_price,
            high: c.high_price,
            low: c.low_price,
            close: c.trade_price,
        }
    }
}
