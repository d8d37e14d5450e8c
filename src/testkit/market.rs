//! Scripted market data sources.
//!
//! - [`StaticDomesticSource`] / [`StaticReferenceSource`] / [`StaticFxSource`]
//!   serve fixed values that tests may change between ticks. Clones share
//!   state, so a test can keep a handle after passing one to the calculator.
//! - `Failing*` sources always return `UpstreamUnavailable`.
//! - [`PendingDomesticSource`] never answers, like a hung connection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::application::{PremiumCalculator, PriceSources};
use crate::domain::{Currency, PriceQuote, ReferenceId, Source, Symbol};
use crate::error::MarketDataError;
use crate::port::{DomesticPriceSource, FxRateSource, ReferencePriceSource};

// ---------------------------------------------------------------------------
// Domestic
// ---------------------------------------------------------------------------

/// KRW prices keyed by symbol. Unknown symbols are reported unavailable.
#[derive(Clone)]
pub struct StaticDomesticSource {
    source: Source,
    prices: Arc<RwLock<HashMap<Symbol, Decimal>>>,
    calls: Arc<AtomicUsize>,
}

impl StaticDomesticSource {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            prices: Arc::default(),
            calls: Arc::default(),
        }
    }

    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.set_price(symbol, price);
        self
    }

    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices.write().insert(Symbol::new(symbol), price);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomesticPriceSource for StaticDomesticSource {
    async fn fetch_domestic_price(&self, symbol: &Symbol) -> Result<PriceQuote, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let price = self.prices.read().get(symbol).copied().ok_or_else(|| {
            MarketDataError::unavailable(self.source, format!("no market for {symbol}"))
        })?;
        Ok(PriceQuote::new(
            symbol.as_str(),
            price,
            Currency::Krw,
            self.source,
            Utc::now(),
        ))
    }

    fn source(&self) -> Source {
        self.source
    }
}

/// Domestic source whose every call fails.
pub struct FailingDomesticSource {
    source: Source,
}

impl FailingDomesticSource {
    pub fn new(source: Source) -> Self {
        Self { source }
    }
}

#[async_trait]
impl DomesticPriceSource for FailingDomesticSource {
    async fn fetch_domestic_price(&self, _symbol: &Symbol) -> Result<PriceQuote, MarketDataError> {
        Err(MarketDataError::unavailable(self.source, "connection refused"))
    }

    fn source(&self) -> Source {
        self.source
    }
}

/// Domestic source whose calls never complete.
pub struct PendingDomesticSource {
    source: Source,
    calls: Arc<AtomicUsize>,
}

impl PendingDomesticSource {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomesticPriceSource for PendingDomesticSource {
    async fn fetch_domestic_price(&self, _symbol: &Symbol) -> Result<PriceQuote, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }

    fn source(&self) -> Source {
        self.source
    }
}

// ---------------------------------------------------------------------------
// Reference
// ---------------------------------------------------------------------------

/// USD prices keyed by reference id, plus scripted search results.
#[derive(Clone, Default)]
pub struct StaticReferenceSource {
    prices: Arc<RwLock<HashMap<String, Decimal>>>,
    search_hits: Arc<RwLock<HashMap<String, Vec<ReferenceId>>>>,
    fail_search: bool,
    searches: Arc<AtomicUsize>,
}

impl StaticReferenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, reference_id: &str, price: Decimal) -> Self {
        self.set_price(reference_id, price);
        self
    }

    /// Search for `query` (case-insensitive) returns `ids` in order.
    pub fn with_search_hits(self, query: &str, ids: &[&str]) -> Self {
        self.search_hits.write().insert(
            query.to_ascii_uppercase(),
            ids.iter().copied().map(ReferenceId::from).collect(),
        );
        self
    }

    /// Every search call fails with `UpstreamUnavailable`.
    pub fn with_failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn set_price(&self, reference_id: &str, price: Decimal) {
        self.prices.write().insert(reference_id.to_string(), price);
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferencePriceSource for StaticReferenceSource {
    async fn fetch_reference_price(
        &self,
        reference_id: &ReferenceId,
    ) -> Result<PriceQuote, MarketDataError> {
        let price = self
            .prices
            .read()
            .get(reference_id.as_str())
            .copied()
            .ok_or_else(|| {
                MarketDataError::unavailable(Source::CoinGecko, format!("no price for {reference_id}"))
            })?;
        Ok(PriceQuote::new(
            reference_id.as_str(),
            price,
            Currency::Usd,
            Source::CoinGecko,
            Utc::now(),
        ))
    }

    async fn search(&self, query: &str) -> Result<Vec<ReferenceId>, MarketDataError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(MarketDataError::unavailable(Source::CoinGecko, "rate limited"));
        }
        Ok(self
            .search_hits
            .read()
            .get(&query.to_ascii_uppercase())
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// FX
// ---------------------------------------------------------------------------

/// Fixed USD/KRW rate.
#[derive(Clone)]
pub struct StaticFxSource {
    rate: Arc<RwLock<Decimal>>,
}

impl StaticFxSource {
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate: Arc::new(RwLock::new(rate)),
        }
    }

    pub fn set_rate(&self, rate: Decimal) {
        *self.rate.write() = rate;
    }
}

#[async_trait]
impl FxRateSource for StaticFxSource {
    async fn fetch_fx_rate(
        &self,
        _base: Currency,
        _quote: Currency,
    ) -> Result<Decimal, MarketDataError> {
        Ok(*self.rate.read())
    }
}

/// FX source whose every call fails.
pub struct FailingFxSource;

#[async_trait]
impl FxRateSource for FailingFxSource {
    async fn fetch_fx_rate(
        &self,
        _base: Currency,
        _quote: Currency,
    ) -> Result<Decimal, MarketDataError> {
        Err(MarketDataError::unavailable(Source::ExchangeRate, "timed out"))
    }
}

// ---------------------------------------------------------------------------
// Calculator fixture
// ---------------------------------------------------------------------------

/// Handles to the static sources behind a [`PremiumCalculator`].
#[derive(Clone)]
pub struct StaticMarket {
    pub upbit: StaticDomesticSource,
    pub bithumb: StaticDomesticSource,
    pub reference: StaticReferenceSource,
    pub fx: StaticFxSource,
}

impl StaticMarket {
    /// Empty markets with a USD/KRW rate of 1350.
    pub fn new() -> Self {
        Self {
            upbit: StaticDomesticSource::new(Source::Upbit),
            bithumb: StaticDomesticSource::new(Source::Bithumb),
            reference: StaticReferenceSource::new(),
            fx: StaticFxSource::new(Decimal::from(1350)),
        }
    }

    /// Set the Upbit KRW price and the USD reference price for a mapped coin.
    pub fn set(&self, symbol: &str, reference_id: &str, krw: Decimal, usd: Decimal) {
        self.upbit.set_price(symbol, krw);
        self.reference.set_price(reference_id, usd);
    }

    pub fn calculator(&self) -> PremiumCalculator {
        PremiumCalculator::new(PriceSources {
            domestic: Arc::new(self.upbit.clone()),
            alternate: Arc::new(self.bithumb.clone()),
            reference: Arc::new(self.reference.clone()),
            fx: Arc::new(self.fx.clone()),
        })
    }
}

impl Default for StaticMarket {
    fn default() -> Self {
        Self::new()
    }
}
