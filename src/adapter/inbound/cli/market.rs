//! Handlers for the Upbit market data commands: `price`, `markets`,
//! `orderbook`, `candles` and `movers`.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::adapter::render;
use crate::domain::{Candle, CandleInterval, Currency, MoverDirection, PriceQuote, Symbol};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_market_service;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct MarketRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Coin")]
    base: String,
}

#[derive(Tabled)]
struct CandleRow {
    #[tabled(rename = "Opened (KST)")]
    opened: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
}

impl From<&Candle> for CandleRow {
    fn from(candle: &Candle) -> Self {
        let price = |value: Decimal| render::group_thousands(value, render::price_dp(value));
        Self {
            opened: candle.opened_at_kst.format("%Y-%m-%d %H:%M").to_string(),
            open: price(candle.open),
            high: price(candle.high),
            low: price(candle.low),
            close: price(candle.close),
        }
    }
}

#[derive(Tabled)]
struct MoverRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Coin")]
    symbol: String,
    #[tabled(rename = "Price (KRW)")]
    price: String,
    #[tabled(rename = "24h")]
    change: String,
    #[tabled(rename = "Turnover")]
    turnover: String,
}

fn mover_row(rank: usize, quote: &PriceQuote) -> MoverRow {
    let (change, turnover) = quote.stats().map_or_else(
        || ("-".to_string(), "-".to_string()),
        |s| {
            (
                render::signed_pct(s.change_pct()),
                render::compact_billions(s.turnover_24h),
            )
        },
    );
    MoverRow {
        rank,
        symbol: quote.symbol().to_string(),
        price: render::group_thousands(quote.price(), render::price_dp(quote.price())),
        change,
        turnover,
    }
}

/// Print KRW tickers with 24h statistics.
pub async fn price(raw_symbols: &[String], config: &Config) -> Result<()> {
    let symbols: Vec<Symbol> = raw_symbols.iter().map(|s| Symbol::new(s)).collect();
    let quotes = build_market_service(&config.upstream)
        .tickers(&symbols)
        .await?;

    if output::is_json() {
        output::json_output("tickers", json!({ "tickers": quotes }));
        return Ok(());
    }

    for (i, quote) in quotes.iter().enumerate() {
        if i > 0 {
            output::lines("");
        }
        output::lines(&render::ticker_report(quote));
    }
    Ok(())
}

/// List markets quoted in `quote`.
pub async fn markets(quote: Currency, config: &Config) -> Result<()> {
    let markets = build_market_service(&config.upstream)
        .markets(quote)
        .await?;

    if output::is_json() {
        output::json_output("markets", json!({ "quote": quote, "markets": markets }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("{quote} markets"));
    let rows: Vec<MarketRow> = markets
        .iter()
        .map(|m| MarketRow {
            market: m.to_string(),
            base: m.base().to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::success(&format!("{} markets", markets.len()));
    Ok(())
}

/// Print the KRW order book of one coin.
pub async fn orderbook(raw_symbol: &str, depth: usize, config: &Config) -> Result<()> {
    let book = build_market_service(&config.upstream)
        .orderbook(&Symbol::new(raw_symbol), depth)
        .await?;

    if output::is_json() {
        let mut payload = serde_json::to_value(&book)?;
        if let Some(map) = payload.as_object_mut() {
            map.insert("spread".into(), serde_json::to_value(book.spread())?);
        }
        output::json_output("orderbook", payload);
        return Ok(());
    }

    output::lines(&render::orderbook_report(&book));
    Ok(())
}

/// Print recent KRW candles of one coin, newest first.
pub async fn candles(
    raw_symbol: &str,
    interval: CandleInterval,
    count: u16,
    config: &Config,
) -> Result<()> {
    let symbol = Symbol::new(raw_symbol);
    let candles = build_market_service(&config.upstream)
        .candles(&symbol, interval, count)
        .await?;

    if output::is_json() {
        output::json_output(
            "candles",
            json!({
                "market": format!("KRW-{symbol}"),
                "interval": interval.to_string(),
                "candles": candles,
            }),
        );
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::section(&format!("KRW-{symbol} {interval} candles"));
    let rows: Vec<CandleRow> = candles.iter().map(CandleRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}

/// Print the KRW markets with the largest 24h rise, or fall with `down`.
pub async fn movers(down: bool, limit: usize, config: &Config) -> Result<()> {
    let direction = if down {
        MoverDirection::Down
    } else {
        MoverDirection::Up
    };
    let ranked = build_market_service(&config.upstream)
        .top_movers(direction, limit)
        .await?;

    if output::is_json() {
        output::json_output(
            "movers",
            json!({ "direction": direction, "movers": ranked }),
        );
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    let title = match direction {
        MoverDirection::Up => "Top gainers (24h, KRW)",
        MoverDirection::Down => "Top losers (24h, KRW)",
    };
    output::section(title);
    let rows: Vec<MoverRow> = ranked
        .iter()
        .enumerate()
        .map(|(i, q)| mover_row(i + 1, q))
        .collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
