//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.
//!
//! - [`premium`] - premium calculation and exchange comparison
//! - [`market`] - tickers, listings, order books, candles and top movers
//! - [`monitor`] - periodic threshold monitoring and alert dispatch

pub mod market;
pub mod monitor;
pub mod premium;

pub use market::MarketService;
pub use monitor::{Monitor, MonitorConfig, MonitorHandle, MonitorState, MonitorStatus, TickReport};
pub use premium::{PremiumCalculator, PriceSources};
