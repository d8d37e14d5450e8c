//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the upstream
//! market data sources, the exchange market browser and the alert
//! notification channel.

pub mod exchange;
pub mod market_data;
pub mod notifier;
