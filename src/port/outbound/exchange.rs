//! Exchange market data port: listings, tickers, order books and candles.

use async_trait::async_trait;

use crate::domain::{Candle, CandleInterval, MarketCode, Orderbook, PriceQuote};
use crate::error::MarketDataError;

/// Read-only view of one exchange's public market data (Upbit).
///
/// Like the price sources, each call is a single request with no retry.
#[async_trait]
pub trait ExchangeMarketData: Send + Sync {
    /// Every market the exchange lists, across all quote currencies.
    async fn list_markets(&self) -> Result<Vec<MarketCode>, MarketDataError>;

    /// Tickers with 24h statistics for `markets`, in upstream order.
    ///
    /// Callers keep batches within the exchange's per-request limit.
    async fn fetch_tickers(&self, markets: &[MarketCode])
        -> Result<Vec<PriceQuote>, MarketDataError>;

    async fn fetch_orderbook(&self, market: &MarketCode) -> Result<Orderbook, MarketDataError>;

    /// Most recent `count` candles, newest first.
    async fn fetch_candles(
        &self,
        market: &MarketCode,
        interval: CandleInterval,
        count: u16,
    ) -> Result<Vec<Candle>, MarketDataError>;
}
