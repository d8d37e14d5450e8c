//! Kimchi - Korean crypto market monitor.
//!
//! Computes the "kimchi premium" (how far a coin's KRW price on a Korean
//! exchange sits above or below its global USD price converted at the
//! current exchange rate) and alerts when it crosses configured thresholds.
//! Also browses Upbit market data: tickers, listings, order books, candles
//! and the 24h top movers.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Symbols, quotes, markets, premium math and the alert policy. No I/O.
//! - [`port`] - Traits for market data sources and alert notifiers
//! - [`adapter`] - Upbit, Bithumb, CoinGecko and FX clients, notifiers, CLI
//! - [`application`] - `PremiumCalculator`, `MarketService` and the background `Monitor`
//! - [`infrastructure`] - Configuration and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Deliver alerts through a Telegram bot
//! - `testkit` - Scripted sources and a recording notifier for tests
//!
//! # Example
//!
//! ```no_run
//! use kimchi::domain::Symbol;
//! use kimchi::infrastructure::bootstrap::build_calculator;
//! use kimchi::infrastructure::config::Config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_or_default("config.toml")?;
//! let calculator = build_calculator(&config.upstream);
//! let result = calculator.compute_premium(&Symbol::new("BTC")).await?;
//! println!("{}: {:.2}%", result.symbol, result.premium_pct);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
