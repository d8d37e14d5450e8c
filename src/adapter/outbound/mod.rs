//! Outbound adapters (driven side).
//!
//! - [`upbit`] - domestic KRW tickers plus market list, order book, candles
//! - [`bithumb`] - domestic KRW tickers
//! - [`coingecko`] - global USD reference prices and symbol search
//! - [`fx`] - USD/KRW exchange rate
//! - [`notifier`] - alert delivery channels

pub mod bithumb;
pub mod coingecko;
pub mod fx;
pub mod http;
pub mod notifier;
pub mod upbit;
