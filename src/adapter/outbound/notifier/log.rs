//! Notifier that writes alerts to the tracing log.
//!
//! Used for dry runs; delivery always succeeds.

use async_trait::async_trait;
use tracing::info;

use crate::port::{AlertMessage, Notifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, message: &AlertMessage) -> bool {
        info!(
            key = %message.key,
            premium_pct = %message.premium_pct.round_dp(2),
            threshold_pct = %message.threshold_pct,
            domestic_price = %message.domestic_price,
            converted_price = %message.reference_price_converted.round_dp(0),
            fx_rate = %message.fx_rate,
            fx_fallback = message.fx_fallback,
            band = %message.band,
            "PREMIUM ALERT"
        );
        true
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
