//! Plain-text rendering of premium results, exchange comparisons, tickers
//! and order books.
//!
//! Rounding happens here and only here; the domain keeps full precision.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{ExchangeComparison, Orderbook, PremiumResult, PriceQuote, Trend};

/// Round to `dp` places and insert `,` thousands separators.
#[must_use]
pub fn group_thousands(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Signed percentage with two decimals, e.g. `+5.82%`.
#[must_use]
pub fn signed_pct(value: Decimal) -> String {
    signed_pct_dp(value, 2)
}

/// Signed percentage with `dp` decimals.
#[must_use]
pub fn signed_pct_dp(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let width = dp as usize;
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{rounded:.width$}%")
    } else {
        format!("+{:.width$}%", rounded.abs())
    }
}

/// Multi-line premium report for terminals.
#[must_use]
pub fn premium_report(result: &PremiumResult) -> String {
    let band = result.band();
    let emoji = result.emoji();
    let fx_note = if result.fx_fallback { " (fallback)" } else { "" };

    format!(
        "{emoji} {symbol} kimchi premium\n\n  \
         Upbit:              {domestic:>18} KRW\n  \
         CoinGecko:          {reference:>18} USD\n  \
         USD/KRW:            {fx:>18}{fx_note}\n  \
         Global in KRW:      {converted:>18} KRW\n  \
         ─────────────────────────────────────────\n  \
         Premium:            {pct:>18}\n\n  \
         {comment}",
        symbol = result.symbol,
        domestic = group_thousands(result.domestic_price, 0),
        reference = group_thousands(result.reference_price, 4),
        fx = group_thousands(result.fx_rate, 2),
        converted = group_thousands(result.reference_price_converted, 0),
        pct = signed_pct(result.premium_pct),
        comment = band.comment(),
    )
}

/// Multi-line Upbit vs Bithumb report for terminals.
#[must_use]
pub fn comparison_report(cmp: &ExchangeComparison) -> String {
    let diff_sign = if cmp.diff > Decimal::ZERO { "+" } else { "" };
    format!(
        "⚖️ {symbol} exchange comparison\n\n  \
         Upbit:    {upbit:>18} KRW\n  \
         Bithumb:  {bithumb:>18} KRW\n  \
         ───────────────────────────────────\n  \
         Diff:     {sign}{diff} KRW ({pct})\n  \
         → {cheaper} is cheaper",
        symbol = cmp.symbol,
        upbit = group_thousands(cmp.upbit_price, 0),
        bithumb = group_thousands(cmp.bithumb_price, 0),
        sign = diff_sign,
        diff = group_thousands(cmp.diff, 0),
        pct = signed_pct_dp(cmp.diff_pct, 3),
        cheaper = cmp.cheaper(),
    )
}

/// Decimal places that keep a KRW price readable: none for large prices,
/// more for coins trading below 100 KRW.
#[must_use]
pub fn price_dp(value: Decimal) -> u32 {
    let abs = value.abs();
    if abs >= Decimal::ONE_HUNDRED {
        0
    } else if abs >= Decimal::ONE {
        2
    } else {
        4
    }
}

/// Large amount in billions with one decimal, e.g. `250.0B`.
#[must_use]
pub fn compact_billions(value: Decimal) -> String {
    let billions = value / Decimal::from(1_000_000_000u64);
    format!("{}B", group_thousands(billions, 1))
}

#[must_use]
pub const fn trend_icon(trend: Trend) -> &'static str {
    match trend {
        Trend::Rise => "🟢",
        Trend::Fall => "🔴",
        Trend::Even => "⚪",
    }
}

/// Multi-line ticker report with 24h statistics when present.
#[must_use]
pub fn ticker_report(quote: &PriceQuote) -> String {
    let currency = quote.currency();
    let price = group_thousands(quote.price(), price_dp(quote.price()));
    let Some(stats) = quote.stats() else {
        return format!(
            "{} {}-{}\n  Price:         {price} {currency}",
            trend_icon(Trend::Even),
            currency,
            quote.symbol(),
        );
    };

    let change_sign = if stats.change_price > Decimal::ZERO { "+" } else { "" };
    format!(
        "{icon} {currency}-{symbol}\n  \
         Price:         {price} {currency}\n  \
         24h change:    {pct} ({sign}{change} {currency})\n  \
         High / Low:    {high} / {low}\n  \
         Turnover 24h:  {turnover} {currency}",
        icon = trend_icon(stats.trend()),
        symbol = quote.symbol(),
        pct = signed_pct(stats.change_pct()),
        sign = change_sign,
        change = group_thousands(stats.change_price, price_dp(stats.change_price)),
        high = group_thousands(stats.high, price_dp(stats.high)),
        low = group_thousands(stats.low, price_dp(stats.low)),
        turnover = compact_billions(stats.turnover_24h),
    )
}

/// Order book ladder: asks above the line (best ask lowest), bids below.
#[must_use]
pub fn orderbook_report(book: &Orderbook) -> String {
    let mut lines = vec![format!("📊 {} order book", book.market), "  asks".to_string()];
    for level in book.levels.iter().rev() {
        lines.push(format!(
            "  {:>18}  |  {:.4}",
            group_thousands(level.ask_price, price_dp(level.ask_price)),
            level.ask_size
        ));
    }
    lines.push("  ─────────────────────────────".to_string());
    for level in &book.levels {
        lines.push(format!(
            "  {:>18}  |  {:.4}",
            group_thousands(level.bid_price, price_dp(level.bid_price)),
            level.bid_size
        ));
    }
    lines.push("  bids".to_string());
    if let Some(spread) = book.spread() {
        lines.push(format!(
            "  spread: {} KRW",
            group_thousands(spread, price_dp(spread))
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::domain::{Currency, FxRate, MarketCode, OrderbookLevel, Source, Symbol, TickerStats};

    #[test]
    fn groups_integer_part() {
        assert_eq!(group_thousands(dec!(100000000), 0), "100,000,000");
        assert_eq!(group_thousands(dec!(999), 0), "999");
        assert_eq!(group_thousands(dec!(1000), 0), "1,000");
        assert_eq!(group_thousands(dec!(1350.256), 2), "1,350.26");
        assert_eq!(group_thousands(dec!(-94500000), 0), "-94,500,000");
        assert_eq!(group_thousands(dec!(0.4), 0), "0");
    }

    #[test]
    fn signed_percentages() {
        assert_eq!(signed_pct(dec!(5.8201058)), "+5.82%");
        assert_eq!(signed_pct(dec!(-1.234)), "-1.23%");
        assert_eq!(signed_pct(Decimal::ZERO), "+0.00%");
        assert_eq!(signed_pct_dp(dec!(0.1), 3), "+0.100%");
        assert_eq!(signed_pct_dp(dec!(-0.0104), 3), "-0.010%");
    }

    #[test]
    fn comparison_gap_has_three_decimals() {
        let cmp = ExchangeComparison::new(
            Symbol::new("BTC"),
            dec!(100012345),
            dec!(100000000),
            Utc::now(),
        )
        .unwrap();
        let text = comparison_report(&cmp);
        assert!(text.contains("+12,345 KRW (+0.012%)"), "{text}");
        assert!(text.contains("Bithumb is cheaper"));
    }

    #[test]
    fn premium_report_mentions_key_figures() {
        let result = PremiumResult::from_prices(
            Symbol::new("BTC"),
            dec!(100000000),
            dec!(70000),
            FxRate::fallback(dec!(1350)),
            Utc::now(),
        )
        .unwrap();
        let text = premium_report(&result);
        assert!(text.contains("BTC kimchi premium"));
        assert!(text.contains("100,000,000"));
        assert!(text.contains("94,500,000"));
        assert!(text.contains("+5.82%"));
        assert!(text.contains("(fallback)"));
        assert!(text.starts_with("🌶️"));
    }

    #[test]
    fn price_precision_follows_magnitude() {
        assert_eq!(price_dp(dec!(100000000)), 0);
        assert_eq!(price_dp(dec!(12.5)), 2);
        assert_eq!(price_dp(dec!(0.0213)), 4);
        assert_eq!(compact_billions(dec!(250000000000.5)), "250.0B");
        assert_eq!(compact_billions(dec!(1234567890123)), "1,234.6B");
    }

    #[test]
    fn ticker_report_shows_daily_stats() {
        let quote = PriceQuote::new("BTC", dec!(100000000), Currency::Krw, Source::Upbit, Utc::now())
            .with_stats(TickerStats {
                change_rate: dec!(-0.0123),
                change_price: dec!(-1245000),
                high: dec!(101000000),
                low: dec!(98000000),
                turnover_24h: dec!(250000000000),
            });
        let text = ticker_report(&quote);

        assert!(text.starts_with("🔴 KRW-BTC"), "{text}");
        assert!(text.contains("100,000,000 KRW"));
        assert!(text.contains("-1.23% (-1,245,000 KRW)"));
        assert!(text.contains("101,000,000 / 98,000,000"));
        assert!(text.contains("250.0B KRW"));
    }

    #[test]
    fn orderbook_ladder_puts_best_prices_at_the_line() {
        let book = Orderbook {
            market: MarketCode::parse("KRW-BTC").unwrap(),
            levels: vec![
                OrderbookLevel {
                    ask_price: dec!(100010000),
                    ask_size: dec!(0.5),
                    bid_price: dec!(100000000),
                    bid_size: dec!(1.25),
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
        let text = orderbook_report(&book);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "📊 KRW-BTC order book");
        assert!(lines[2].contains("100,020,000"));
        assert!(lines[3].contains("100,010,000") && lines[3].ends_with("0.5000"));
        assert!(lines[5].contains("100,000,000") && lines[5].ends_with("1.2500"));
        assert!(text.ends_with("spread: 10,000 KRW"));
    }
}
