//! Scripted exchange market data.
//!
//! [`StaticExchange`] lists the markets it has tickers for, serves generated
//! order books and candles, and records every request so tests can check
//! batching and that invalid input never reaches the exchange.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;

use crate::domain::{
    Candle, CandleInterval, Currency, MarketCode, Orderbook, OrderbookLevel, PriceQuote, Source,
    Symbol, TickerStats,
};
use crate::error::MarketDataError;
use crate::port::ExchangeMarketData;

#[derive(Default)]
struct Book {
    markets: Vec<MarketCode>,
    tickers: HashMap<MarketCode, PriceQuote>,
    orderbooks: HashMap<MarketCode, Orderbook>,
    candles: HashMap<MarketCode, Vec<Candle>>,
}

/// In-memory exchange. Clones share state.
#[derive(Clone, Default)]
pub struct StaticExchange {
    book: Arc<RwLock<Book>>,
    requests: Arc<AtomicUsize>,
    ticker_batches: Arc<Mutex<Vec<usize>>>,
    candle_counts: Arc<Mutex<Vec<u16>>>,
}

fn market(quote: &str, base: &str) -> MarketCode {
    let currency = Currency::from_code(&quote.to_ascii_uppercase()).unwrap_or(Currency::Krw);
    MarketCode::new(currency, &Symbol::new(base))
}

impl StaticExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// List `quote-base` and serve a ticker for it with 24h statistics.
    pub fn with_ticker(
        self,
        quote: &str,
        base: &str,
        price: Decimal,
        change_rate: Decimal,
    ) -> Self {
        let code = market(quote, base);
        let currency = code.quote().unwrap_or(Currency::Krw);
        let ticker = PriceQuote::new(base, price, currency, Source::Upbit, Utc::now()).with_stats(
            TickerStats {
                change_rate,
                change_price: price * change_rate,
                high: price,
                low: price,
                turnover_24h: price * Decimal::from(1000),
            },
        );
        {
            let mut book = self.book.write();
            if !book.markets.contains(&code) {
                book.markets.push(code.clone());
            }
            book.tickers.insert(code, ticker);
        }
        self
    }

    /// `count` KRW markets `C0..C{count-1}` with change rates spread from
    /// -count/2 % upwards.
    pub fn with_krw_markets(self, count: usize) -> Self {
        (0..count).fold(self, |exchange, i| {
            let offset = i64::try_from(i).unwrap_or(0) - i64::try_from(count / 2).unwrap_or(0);
            exchange.with_ticker(
                "KRW",
                &format!("C{i}"),
                Decimal::from(1000 + i64::try_from(i).unwrap_or(0)),
                Decimal::new(offset, 2),
            )
        })
    }

    /// KRW order book for `base` with `levels` levels spaced `step` apart
    /// around `mid`.
    pub fn with_orderbook(self, base: &str, mid: Decimal, step: Decimal, levels: usize) -> Self {
        let code = market("KRW", base);
        let levels = (0..levels)
            .map(|i| {
                let n = Decimal::from(i64::try_from(i).unwrap_or(0));
                OrderbookLevel {
                    ask_price: mid + step * (n + Decimal::ONE),
                    ask_size: Decimal::ONE,
                    bid_price: mid - step * n,
                    bid_size: Decimal::ONE,
                }
            })
            .collect();
        self.book.write().orderbooks.insert(
            code.clone(),
            Orderbook {
                market: code,
                levels,
                timestamp: Utc::now(),
            },
        );
        self
    }

    /// `count` daily KRW candles for `base`, newest first, closing at
    /// `close` and falling by one per day into the past.
    pub fn with_candles(self, base: &str, close: Decimal, count: usize) -> Self {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default();
        let candles = (0..count)
            .map(|i| {
                let n = i64::try_from(i).unwrap_or(0);
                let price = close - Decimal::from(n);
                Candle {
                    opened_at_kst: start - Duration::days(n),
                    open: price,
                    high: price,
                    low: price,
                    close: price,
                }
            })
            .collect();
        self.book.write().candles.insert(market("KRW", base), candles);
        self
    }

    /// Total number of requests served or refused.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Size of every ticker request, in order.
    pub fn ticker_batches(&self) -> Vec<usize> {
        self.ticker_batches.lock().clone()
    }

    /// `count` of every candle request, in order.
    pub fn candle_counts(&self) -> Vec<u16> {
        self.candle_counts.lock().clone()
    }

    fn missing(market: &MarketCode) -> MarketDataError {
        MarketDataError::unavailable(Source::Upbit, format!("HTTP 404 Not Found for {market}"))
    }
}

#[async_trait]
impl ExchangeMarketData for StaticExchange {
    async fn list_markets(&self) -> Result<Vec<MarketCode>, MarketDataError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.book.read().markets.clone())
    }

    async fn fetch_tickers(
        &self,
        markets: &[MarketCode],
    ) -> Result<Vec<PriceQuote>, MarketDataError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.ticker_batches.lock().push(markets.len());
        let book = self.book.read();
        markets
            .iter()
            .map(|m| book.tickers.get(m).cloned().ok_or_else(|| Self::missing(m)))
            .collect()
    }

    async fn fetch_orderbook(&self, market: &MarketCode) -> Result<Orderbook, MarketDataError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.book
            .read()
            .orderbooks
            .get(market)
            .cloned()
            .ok_or_else(|| Self::missing(market))
    }

    async fn fetch_candles(
        &self,
        market: &MarketCode,
        _interval: CandleInterval,
        count: u16,
    ) -> Result<Vec<Candle>, MarketDataError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.candle_counts.lock().push(count);
        let book = self.book.read();
        let candles = book.candles.get(market).ok_or_else(|| Self::missing(market))?;
        Ok(candles.iter().take(usize::from(count)).cloned().collect())
    }
}
