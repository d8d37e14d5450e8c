//! Market data ports: one trait per kind of upstream.
//!
//! Each call maps to exactly one outbound request with a bounded timeout.
//! Implementations never retry; a failure is reported as
//! [`MarketDataError::UpstreamUnavailable`] and the caller decides whether
//! to skip, fall back, or try again on the next tick.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Currency, PriceQuote, ReferenceId, Source, Symbol};
use crate::error::MarketDataError;

/// A KRW spot price source (Upbit, Bithumb).
#[async_trait]
pub trait DomesticPriceSource: Send + Sync {
    /// Fetch the latest KRW price of `symbol`.
    async fn fetch_domestic_price(&self, symbol: &Symbol) -> Result<PriceQuote, MarketDataError>;

    /// Which upstream this source talks to.
    fn source(&self) -> Source;
}

/// Global reference price index (CoinGecko).
#[async_trait]
pub trait ReferencePriceSource: Send + Sync {
    /// Fetch the latest USD price for a reference id.
    async fn fetch_reference_price(
        &self,
        reference_id: &ReferenceId,
    ) -> Result<PriceQuote, MarketDataError>;

    /// Free-text search; results are ordered by upstream relevance.
    async fn search(&self, query: &str) -> Result<Vec<ReferenceId>, MarketDataError>;
}

/// Foreign-exchange rate table.
#[async_trait]
pub trait FxRateSource: Send + Sync {
    /// Units of `quote` per one unit of `base`.
    async fn fetch_fx_rate(&self, base: Currency, quote: Currency)
        -> Result<Decimal, MarketDataError>;
}
