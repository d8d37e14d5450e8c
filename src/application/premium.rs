//! Premium calculator.
//!
//! Combines a domestic KRW price, a global USD reference price and the
//! USD/KRW rate into a [`PremiumResult`]. The calculator is stateless apart
//! from its source handles, so the monitor and on-demand commands each hold
//! their own instance.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{
    Currency, ExchangeComparison, FxRate, PremiumError, PremiumResult, ReferenceId, Source,
    Symbol, SymbolMapping, DEFAULT_USD_KRW,
};
use crate::port::{DomesticPriceSource, FxRateSource, ReferencePriceSource};

/// Upstream handles used by the calculator.
#[derive(Clone)]
pub struct PriceSources {
    /// KRW market the premium is computed against (Upbit).
    pub domestic: Arc<dyn DomesticPriceSource>,
    /// Second KRW market, used for exchange comparison (Bithumb).
    pub alternate: Arc<dyn DomesticPriceSource>,
    pub reference: Arc<dyn ReferencePriceSource>,
    pub fx: Arc<dyn FxRateSource>,
}

/// Computes the kimchi premium for a symbol.
#[derive(Clone)]
pub struct PremiumCalculator {
    sources: PriceSources,
    mapping: SymbolMapping,
    fallback_fx: Decimal,
}

impl PremiumCalculator {
    #[must_use]
    pub fn new(sources: PriceSources) -> Self {
        Self {
            sources,
            mapping: SymbolMapping,
            fallback_fx: DEFAULT_USD_KRW,
        }
    }

    /// Override the USD/KRW rate used when the FX source fails.
    #[must_use]
    pub fn with_fallback_fx(mut self, rate: Decimal) -> Self {
        self.fallback_fx = rate;
        self
    }

    /// Compute the premium of `symbol` on the domestic market.
    ///
    /// # Errors
    ///
    /// [`PremiumError::Unresolvable`] when the symbol is malformed or has no
    /// reference id, [`PremiumError::UpstreamUnavailable`] when the domestic
    /// or reference price cannot be fetched or is out of range. FX failures never error; the fallback rate is
    /// used and flagged on the result.
    pub async fn compute_premium(&self, symbol: &Symbol) -> Result<PremiumResult, PremiumError> {
        ensure_well_formed(symbol)?;
        let reference_id = self.resolve(symbol).await?;

        let (domestic, reference) = tokio::try_join!(
            self.sources.domestic.fetch_domestic_price(symbol),
            self.sources.reference.fetch_reference_price(&reference_id),
        )?;

        let fx = self.fx_rate().await;

        let result = PremiumResult::from_prices(
            symbol.clone(),
            domestic.price(),
            reference.price(),
            fx,
            Utc::now(),
        )
        .ok_or_else(|| PremiumError::UpstreamUnavailable {
            upstream: Source::CoinGecko,
            reason: format!("reference price for {reference_id} is out of range"),
        })?;

        debug!(
            symbol = %symbol,
            premium_pct = %result.premium_pct,
            fx_rate = %result.fx_rate,
            fx_fallback = result.fx_fallback,
            "Premium computed"
        );
        Ok(result)
    }

    /// Compare the KRW price of `symbol` on both domestic exchanges.
    ///
    /// # Errors
    ///
    /// [`PremiumError::Unresolvable`] when the symbol is malformed,
    /// [`PremiumError::UpstreamUnavailable`] when either exchange fails or
    /// reports a price the gap cannot be computed from.
    pub async fn compare_exchanges(
        &self,
        symbol: &Symbol,
    ) -> Result<ExchangeComparison, PremiumError> {
        ensure_well_formed(symbol)?;
        let (primary, alternate) = tokio::try_join!(
            self.sources.domestic.fetch_domestic_price(symbol),
            self.sources.alternate.fetch_domestic_price(symbol),
        )?;

        ExchangeComparison::new(
            symbol.clone(),
            primary.price(),
            alternate.price(),
            Utc::now(),
        )
        .ok_or_else(|| PremiumError::UpstreamUnavailable {
            upstream: self.sources.alternate.source(),
            reason: format!("price for {symbol} is out of range"),
        })
    }

    /// Static table first, then the first search hit.
    async fn resolve(&self, symbol: &Symbol) -> Result<ReferenceId, PremiumError> {
        if let Some(id) = self.mapping.reference_id(symbol) {
            return Ok(id);
        }

        let hits = self.sources.reference.search(symbol.as_str()).await?;
        match hits.into_iter().next() {
            Some(id) => {
                debug!(symbol = %symbol, reference_id = %id, "Resolved symbol via search");
                Ok(id)
            }
            None => Err(PremiumError::Unresolvable {
                symbol: symbol.clone(),
            }),
        }
    }

    async fn fx_rate(&self) -> FxRate {
        match self
            .sources
            .fx
            .fetch_fx_rate(Currency::Usd, Currency::Krw)
            .await
        {
            Ok(rate) if rate > Decimal::ZERO => FxRate::live(rate),
            Ok(rate) => {
                warn!(%rate, fallback = %self.fallback_fx, "Non-positive FX rate, using fallback");
                FxRate::fallback(self.fallback_fx)
            }
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback_fx, "FX rate unavailable, using fallback");
                FxRate::fallback(self.fallback_fx)
            }
        }
    }
}

/// Reject symbols that could not name a market before any request is built.
fn ensure_well_formed(symbol: &Symbol) -> Result<(), PremiumError> {
    if symbol.is_well_formed() {
        Ok(())
    } else {
        Err(PremiumError::Unresolvable {
            symbol: symbol.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::market::{
        FailingDomesticSource, FailingFxSource, StaticDomesticSource, StaticFxSource,
        StaticReferenceSource,
    };
    use rust_decimal_macros::dec;

    fn sources(
        domestic: Arc<dyn DomesticPriceSource>,
        reference: StaticReferenceSource,
        fx: Arc<dyn FxRateSource>,
    ) -> PriceSources {
        PriceSources {
            domestic,
            alternate: Arc::new(
                StaticDomesticSource::new(Source::Bithumb).with_price("BTC", dec!(99900000)),
            ),
            reference: Arc::new(reference),
            fx,
        }
    }

    fn btc_sources() -> PriceSources {
        sources(
            Arc::new(StaticDomesticSource::new(Source::Upbit).with_price("BTC", dec!(100000000))),
            StaticReferenceSource::new().with_price("bitcoin", dec!(70000)),
            Arc::new(StaticFxSource::new(dec!(1350))),
        )
    }

    #[tokio::test]
    async fn computes_reference_example() {
        let calc = PremiumCalculator::new(btc_sources());
        let result = calc.compute_premium(&Symbol::new("btc")).await.unwrap();

        assert_eq!(result.reference_price_converted, dec!(94500000));
        assert_eq!(result.premium_pct.round_dp(2), dec!(5.82));
        assert!(!result.fx_fallback);
    }

    #[tokio::test]
    async fn fx_failure_uses_fallback() {
        let mut s = btc_sources();
        s.fx = Arc::new(FailingFxSource);
        let calc = PremiumCalculator::new(s).with_fallback_fx(dec!(1300));

        let result = calc.compute_premium(&Symbol::new("BTC")).await.unwrap();
        assert!(result.fx_fallback);
        assert_eq!(result.fx_rate, dec!(1300));
        assert_eq!(result.reference_price_converted, dec!(91000000));
    }

    #[tokio::test]
    async fn unknown_symbol_without_search_hit_is_unresolvable() {
        let calc = PremiumCalculator::new(btc_sources());
        let err = calc.compute_premium(&Symbol::new("NOPE")).await.unwrap_err();
        assert!(err.is_unresolvable());
    }

    #[tokio::test]
    async fn domestic_failure_is_upstream_unavailable() {
        let mut s = btc_sources();
        s.domestic = Arc::new(FailingDomesticSource::new(Source::Upbit));
        let calc = PremiumCalculator::new(s);

        let err = calc.compute_premium(&Symbol::new("BTC")).await.unwrap_err();
        assert!(matches!(
            err,
            PremiumError::UpstreamUnavailable {
                upstream: Source::Upbit,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn zero_reference_price_is_upstream_unavailable() {
        let s = sources(
            Arc::new(StaticDomesticSource::new(Source::Upbit).with_price("BTC", dec!(100000000))),
            StaticReferenceSource::new().with_price("bitcoin", Decimal::ZERO),
            Arc::new(StaticFxSource::new(dec!(1350))),
        );
        let err = PremiumCalculator::new(s)
            .compute_premium(&Symbol::new("BTC"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PremiumError::UpstreamUnavailable {
                upstream: Source::CoinGecko,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn dust_reference_price_is_upstream_unavailable() {
        let s = sources(
            Arc::new(StaticDomesticSource::new(Source::Upbit).with_price("BTC", dec!(100000000))),
            StaticReferenceSource::new().with_price("bitcoin", Decimal::new(1, 27)),
            Arc::new(StaticFxSource::new(dec!(1350))),
        );
        let err = PremiumCalculator::new(s)
            .compute_premium(&Symbol::new("BTC"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PremiumError::UpstreamUnavailable {
                upstream: Source::CoinGecko,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_symbol_never_reaches_upstream() {
        let upbit = StaticDomesticSource::new(Source::Upbit).with_price("BTC", dec!(100000000));
        let bithumb = StaticDomesticSource::new(Source::Bithumb).with_price("BTC", dec!(99900000));
        let mut s = btc_sources();
        s.domestic = Arc::new(upbit.clone());
        s.alternate = Arc::new(bithumb.clone());
        let calc = PremiumCalculator::new(s);

        let symbol = Symbol::new("BTC/../x");
        assert!(calc.compare_exchanges(&symbol).await.unwrap_err().is_unresolvable());
        assert!(calc.compute_premium(&symbol).await.unwrap_err().is_unresolvable());
        assert_eq!(upbit.calls(), 0);
        assert_eq!(bithumb.calls(), 0);
    }

    #[tokio::test]
    async fn compares_domestic_exchanges() {
        let calc = PremiumCalculator::new(btc_sources());
        let cmp = calc.compare_exchanges(&Symbol::new("BTC")).await.unwrap();
        assert_eq!(cmp.diff, dec!(100000));
        assert_eq!(cmp.cheaper(), Source::Bithumb);
    }
}
