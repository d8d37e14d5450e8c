//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`exchange`] — [`StaticExchange`](exchange::StaticExchange): listings,
//!   tickers, order books and candles with request recording.
//! - [`market`] — Scripted market data sources: static prices, failures,
//!   and call counters.
//! - [`notifier`] — [`RecordingNotifier`](notifier::RecordingNotifier) that
//!   captures alerts and can be told to reject deliveries.
//! - [`config`] — Canonical monitor configurations with zero delays.

pub mod config;
pub mod exchange;
pub mod market;
pub mod notifier;
