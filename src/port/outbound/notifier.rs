//! Notifier port for premium alerts.
//!
//! This module defines the message handed to a notification channel and the
//! trait the channel implements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{AlertDirection, AlertKey, PremiumBand, PremiumResult, Symbol};

/// A threshold-crossing alert ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    /// Cooldown key the alert was raised for.
    pub key: AlertKey,
    pub symbol: Symbol,
    pub direction: AlertDirection,
    /// The threshold that was crossed, in percent.
    pub threshold_pct: Decimal,
    pub premium_pct: Decimal,
    pub domestic_price: Decimal,
    pub reference_price: Decimal,
    pub reference_price_converted: Decimal,
    pub fx_rate: Decimal,
    pub fx_fallback: bool,
    pub band: PremiumBand,
    pub computed_at: DateTime<Utc>,
}

impl AlertMessage {
    /// Build a message from a premium result and the decision it triggered.
    #[must_use]
    pub fn new(key: AlertKey, threshold_pct: Decimal, result: &PremiumResult) -> Self {
        Self {
            symbol: key.symbol().clone(),
            direction: key.direction(),
            key,
            threshold_pct,
            premium_pct: result.premium_pct,
            domestic_price: result.domestic_price,
            reference_price: result.reference_price,
            reference_price_converted: result.reference_price_converted,
            fx_rate: result.fx_rate,
            fx_fallback: result.fx_fallback,
            band: result.band(),
            computed_at: result.computed_at,
        }
    }
}

/// A channel alerts are delivered to.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `deliver` must not panic or return an error: any rejection or
///   transport failure is reported as `false`
/// - The caller only starts a cooldown window when `deliver` returns `true`
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one alert. Returns whether the channel confirmed delivery.
    async fn deliver(&self, message: &AlertMessage) -> bool;

    /// Short channel name for logs.
    fn name(&self) -> &'static str;
}
