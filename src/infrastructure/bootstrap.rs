//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::bithumb::BithumbClient;
use crate::adapter::outbound::coingecko::CoinGeckoClient;
use crate::adapter::outbound::fx::ExchangeRateClient;
use crate::adapter::outbound::http::JsonFetcher;
use crate::adapter::outbound::notifier::LogNotifier;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};
use crate::adapter::outbound::upbit::UpbitClient;
use crate::application::{
    MarketService, Monitor, MonitorConfig, MonitorHandle, PremiumCalculator, PriceSources,
};
use crate::infrastructure::config::{AlertsConfig, Config, UpstreamConfig};
use crate::port::Notifier;

/// Build a premium calculator backed by the live HTTP sources.
///
/// Each call creates its own HTTP client, so the monitor and on-demand
/// commands never share connection state.
#[must_use]
pub fn build_calculator(upstream: &UpstreamConfig) -> PremiumCalculator {
    let fetcher = JsonFetcher::new(upstream.timeout());
    let sources = PriceSources {
        domestic: Arc::new(UpbitClient::new(fetcher.clone(), &upstream.upbit_url)),
        alternate: Arc::new(BithumbClient::new(fetcher.clone(), &upstream.bithumb_url)),
        reference: Arc::new(CoinGeckoClient::new(fetcher.clone(), &upstream.coingecko_url)),
        fx: Arc::new(ExchangeRateClient::new(fetcher, &upstream.fx_url)),
    };
    PremiumCalculator::new(sources).with_fallback_fx(upstream.fallback_fx_rate)
}

/// Build the Upbit market browser used by the market data commands.
#[must_use]
pub fn build_market_service(upstream: &UpstreamConfig) -> MarketService {
    let fetcher = JsonFetcher::new(upstream.timeout());
    MarketService::new(Arc::new(UpbitClient::new(fetcher, &upstream.upbit_url)))
}

/// Monitor parameters derived from the `[alerts]` section.
#[must_use]
pub fn monitor_config(alerts: &AlertsConfig) -> MonitorConfig {
    MonitorConfig {
        symbols: alerts.watched_symbols(),
        thresholds: alerts.thresholds(),
        interval: alerts.interval(),
        initial_delay: alerts.initial_delay(),
    }
}

/// Whether Telegram credentials are present in the environment.
#[cfg(feature = "telegram")]
#[must_use]
pub fn telegram_configured() -> bool {
    TelegramConfig::from_env().is_some()
}

/// Whether Telegram credentials are present in the environment (non-telegram variant).
#[cfg(not(feature = "telegram"))]
#[must_use]
pub fn telegram_configured() -> bool {
    false
}

/// Select the alert channel.
///
/// Dry runs always log. Otherwise Telegram is used when its credentials are
/// set; without them there is no channel and the monitor stays disabled.
#[cfg(feature = "telegram")]
pub(crate) fn build_notifier(dry_run: bool) -> Option<Arc<dyn Notifier>> {
    if dry_run {
        info!("Dry run: alerts will be logged only");
        return Some(Arc::new(LogNotifier));
    }
    match TelegramConfig::from_env() {
        Some(tg_config) => {
            info!("Telegram notifier enabled");
            Some(Arc::new(TelegramNotifier::new(tg_config)))
        }
        None => {
            warn!("TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set; premium alerts disabled");
            None
        }
    }
}

/// Select the alert channel (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub(crate) fn build_notifier(dry_run: bool) -> Option<Arc<dyn Notifier>> {
    if dry_run {
        info!("Dry run: alerts will be logged only");
        Some(Arc::new(LogNotifier))
    } else {
        warn!("Built without the telegram feature; premium alerts disabled");
        None
    }
}

/// Build the monitor handle for `config`. The handle is not started.
#[must_use]
pub fn build_monitor(config: &Config, dry_run: bool) -> MonitorHandle {
    let monitor_config = monitor_config(&config.alerts);
    match build_notifier(dry_run) {
        Some(notifier) => {
            let calculator = build_calculator(&config.upstream);
            MonitorHandle::new(Monitor::new(monitor_config, calculator, notifier))
        }
        None => MonitorHandle::disabled(&monitor_config),
    }
}
