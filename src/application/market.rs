//! Exchange market browsing: tickers, listings, order books, candles and
//! the 24h top movers.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    rank_movers, Candle, CandleInterval, Currency, MarketCode, MoverDirection, Orderbook,
    PriceQuote, Symbol, MAX_CANDLES,
};
use crate::error::{Error, Result};
use crate::port::ExchangeMarketData;

/// Most markets Upbit accepts in one ticker request.
pub const TICKER_BATCH: usize = 100;

/// Read-only queries over one exchange's market data.
#[derive(Clone)]
pub struct MarketService {
    exchange: Arc<dyn ExchangeMarketData>,
}

impl MarketService {
    #[must_use]
    pub fn new(exchange: Arc<dyn ExchangeMarketData>) -> Self {
        Self { exchange }
    }

    /// KRW tickers with 24h statistics for `symbols`.
    pub async fn tickers(&self, symbols: &[Symbol]) -> Result<Vec<PriceQuote>> {
        let markets = symbols
            .iter()
            .map(krw_market)
            .collect::<Result<Vec<_>>>()?;

        let mut quotes = Vec::with_capacity(markets.len());
        for batch in markets.chunks(TICKER_BATCH) {
            quotes.extend(self.exchange.fetch_tickers(batch).await?);
        }
        Ok(quotes)
    }

    /// Markets quoted in `quote`, sorted by code.
    pub async fn markets(&self, quote: Currency) -> Result<Vec<MarketCode>> {
        let mut markets: Vec<MarketCode> = self
            .exchange
            .list_markets()
            .await?
            .into_iter()
            .filter(|m| m.quote() == Some(quote))
            .collect();
        markets.sort();
        Ok(markets)
    }

    /// KRW order book for `symbol`, cut to the best `depth` levels.
    pub async fn orderbook(&self, symbol: &Symbol, depth: usize) -> Result<Orderbook> {
        let market = krw_market(symbol)?;
        let mut book = self.exchange.fetch_orderbook(&market).await?;
        book.truncate(depth);
        Ok(book)
    }

    /// Most recent KRW candles for `symbol`, newest first. `count` is
    /// clamped to what the exchange serves in one request.
    pub async fn candles(
        &self,
        symbol: &Symbol,
        interval: CandleInterval,
        count: u16,
    ) -> Result<Vec<Candle>> {
        let market = krw_market(symbol)?;
        let count = count.clamp(1, MAX_CANDLES);
        Ok(self.exchange.fetch_candles(&market, interval, count).await?)
    }

    /// KRW markets with the largest 24h rise or fall.
    ///
    /// Tickers are fetched in batches of [`TICKER_BATCH`], one request at a
    /// time, then ranked by signed change rate.
    pub async fn top_movers(
        &self,
        direction: MoverDirection,
        limit: usize,
    ) -> Result<Vec<PriceQuote>> {
        let markets = self.markets(Currency::Krw).await?;

        let mut quotes = Vec::with_capacity(markets.len());
        for batch in markets.chunks(TICKER_BATCH) {
            quotes.extend(self.exchange.fetch_tickers(batch).await?);
        }
        debug!(markets = markets.len(), tickers = quotes.len(), "Ranking movers");

        Ok(rank_movers(quotes, direction, limit))
    }
}

fn krw_market(symbol: &Symbol) -> Result<MarketCode> {
    if !symbol.is_well_formed() {
        return Err(Error::InvalidSymbol {
            symbol: symbol.clone(),
        });
    }
    Ok(MarketCode::new(Currency::Krw, symbol))
}
