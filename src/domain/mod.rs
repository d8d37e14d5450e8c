//! Exchange-agnostic domain types: quotes, symbols, markets, premiums and
//! alert policy.
//!
//! Nothing in this module performs I/O. Upstream access lives behind the
//! traits in [`crate::port`].

pub mod alert;
pub mod comparison;
pub mod error;
pub mod market;
pub mod premium;
pub mod quote;
pub mod symbol;

pub use alert::{
    evaluate, AlertDecision, AlertDirection, AlertKey, AlertThresholds, CooldownState,
};
pub use comparison::ExchangeComparison;
pub use error::PremiumError;
pub use market::{
    rank_movers, Candle, CandleInterval, MarketCode, MoverDirection, Orderbook, OrderbookLevel,
    MAX_CANDLES,
};
pub use premium::{premium_emoji, premium_pct, FxRate, PremiumBand, PremiumResult, DEFAULT_USD_KRW};
pub use quote::{Currency, PriceQuote, Source, TickerStats, Trend};
pub use symbol::{ReferenceId, Symbol, SymbolMapping};
