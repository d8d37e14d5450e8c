use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kimchi::application::{PremiumCalculator, PriceSources};
use kimchi::domain::{PremiumBand, PremiumError, Source, Symbol};
use kimchi::testkit::market::{FailingFxSource, StaticMarket};

fn calculator_with_failing_fx(market: &StaticMarket) -> PremiumCalculator {
    PremiumCalculator::new(PriceSources {
        domestic: Arc::new(market.upbit.clone()),
        alternate: Arc::new(market.bithumb.clone()),
        reference: Arc::new(market.reference.clone()),
        fx: Arc::new(FailingFxSource),
    })
}

#[tokio::test]
async fn premium_sign_follows_domestic_vs_converted() {
    let market = StaticMarket::new();
    market.set("BTC", "bitcoin", dec!(100000000), dec!(70000));
    market.set("ETH", "ethereum", dec!(4900000), dec!(3700));
    let calc = market.calculator();

    let btc = calc.compute_premium(&Symbol::new("BTC")).await.unwrap();
    assert!(btc.premium_pct > Decimal::ZERO);
    assert_eq!(btc.band(), PremiumBand::StrongPremium);

    // 3700 * 1350 = 4,995,000 > 4,900,000
    let eth = calc.compute_premium(&Symbol::new("ETH")).await.unwrap();
    assert!(eth.premium_pct < Decimal::ZERO);
    assert_eq!(eth.band(), PremiumBand::Discount);
}

#[tokio::test]
async fn fx_outage_still_yields_result_at_default_rate() {
    let market = StaticMarket::new();
    market.set("BTC", "bitcoin", dec!(100000000), dec!(70000));

    let result = calculator_with_failing_fx(&market)
        .compute_premium(&Symbol::new("BTC"))
        .await
        .unwrap();

    assert!(result.fx_fallback);
    assert_eq!(result.fx_rate, dec!(1350));
    assert_eq!(result.reference_price_converted, dec!(94500000));
    assert_eq!(result.premium_pct.round_dp(2), dec!(5.82));
}

#[tokio::test]
async fn each_computation_reads_the_current_fx_rate() {
    let market = StaticMarket::new();
    market.set("BTC", "bitcoin", dec!(100000000), dec!(70000));
    let calc = market.calculator();

    let before = calc.compute_premium(&Symbol::new("BTC")).await.unwrap();
    market.fx.set_rate(dec!(1450));
    let after = calc.compute_premium(&Symbol::new("BTC")).await.unwrap();

    assert_eq!(before.fx_rate, dec!(1350));
    assert_eq!(after.fx_rate, dec!(1450));
    // 70,000 * 1,450 = 101,500,000 > 100,000,000
    assert!(after.premium_pct < Decimal::ZERO);
    assert!(!after.fx_fallback);
}

#[tokio::test]
async fn unmapped_symbol_resolves_through_first_search_hit() {
    let market = StaticMarket::new();
    market.upbit.set_price("WLD", dec!(3000));
    market.reference.set_price("worldcoin-wld", dec!(2));
    let market = StaticMarket {
        reference: market
            .reference
            .clone()
            .with_search_hits("WLD", &["worldcoin-wld", "worldcoin-old"]),
        ..market
    };

    let result = market
        .calculator()
        .compute_premium(&Symbol::new("wld"))
        .await
        .unwrap();

    assert_eq!(result.reference_price, dec!(2));
    assert_eq!(result.reference_price_converted, dec!(2700));
    assert_eq!(market.reference.searches(), 1);
}

#[tokio::test]
async fn mapped_symbol_never_searches() {
    let market = StaticMarket::new();
    market.set("XRP", "ripple", dec!(3000), dec!(2));

    market
        .calculator()
        .compute_premium(&Symbol::new("XRP"))
        .await
        .unwrap();
    assert_eq!(market.reference.searches(), 0);
}

#[tokio::test]
async fn symbol_without_mapping_or_search_hit_is_unresolvable() {
    let market = StaticMarket::new();

    let err = market
        .calculator()
        .compute_premium(&Symbol::new("NOSUCHCOIN"))
        .await
        .unwrap_err();

    match err {
        PremiumError::Unresolvable { symbol } => assert_eq!(symbol.as_str(), "NOSUCHCOIN"),
        other => panic!("expected Unresolvable, got {other}"),
    }
    assert_eq!(market.upbit.calls(), 0);
}

#[tokio::test]
async fn failed_search_is_upstream_unavailable() {
    let market = StaticMarket::new();
    let market = StaticMarket {
        reference: market.reference.clone().with_failing_search(),
        ..market
    };

    let err = market
        .calculator()
        .compute_premium(&Symbol::new("NOSUCHCOIN"))
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
async fn exchange_comparison_uses_both_domestic_markets() {
    let market = StaticMarket::new();
    market.upbit.set_price("XRP", dec!(990));
    market.bithumb.set_price("XRP", dec!(1000));

    let cmp = market
        .calculator()
        .compare_exchanges(&Symbol::new("xrp"))
        .await
        .unwrap();

    assert_eq!(cmp.diff, dec!(-10));
    assert_eq!(cmp.diff_pct, dec!(-1));
    assert_eq!(cmp.cheaper(), Source::Upbit);
}

#[tokio::test]
async fn exchange_comparison_fails_when_one_market_is_missing() {
    let market = StaticMarket::new();
    market.upbit.set_price("XRP", dec!(990));

    let err = market
        .calculator()
        .compare_exchanges(&Symbol::new("XRP"))
        .await
        .unwrap_err();
    assert!(!err.is_unresolvable());
}
