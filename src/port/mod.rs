//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Calculator + Monitor   ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │Domestic │            │  Reference  │              │ Notifier  │
//! │ Source  │            │  + FX       │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`DomesticPriceSource`], [`ReferencePriceSource`], [`FxRateSource`] - Market data
//! - [`ExchangeMarketData`] - Market listings, tickers, order books, candles
//! - [`Notifier`] - Alert delivery (Telegram, logging)

pub mod outbound;

pub use outbound::exchange::ExchangeMarketData;
pub use outbound::market_data::{DomesticPriceSource, FxRateSource, ReferencePriceSource};
pub use outbound::notifier::{AlertMessage, Notifier};
