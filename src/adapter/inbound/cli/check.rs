//! Handler for the `check` command.

use serde::Serialize;

use crate::adapter::inbound::cli::output;
use crate::adapter::render::signed_pct;
use crate::infrastructure::bootstrap::telegram_configured;
use crate::infrastructure::config::Config;

/// Effective settings after file, defaults and environment overrides.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub source: String,
    pub high_pct: String,
    pub low_pct: String,
    pub symbols: Vec<String>,
    pub interval_minutes: u64,
    pub cooldown_minutes: u64,
    pub initial_delay_secs: u64,
    pub timeout_secs: u64,
    pub fallback_fx_rate: String,
    pub alerts_enabled: bool,
}

impl CheckReport {
    #[must_use]
    pub fn new(config: &Config, source: &str, alerts_enabled: bool) -> Self {
        let alerts = &config.alerts;
        Self {
            source: source.to_string(),
            high_pct: signed_pct(alerts.high_pct),
            low_pct: signed_pct(alerts.low_pct),
            symbols: alerts
                .watched_symbols()
                .iter()
                .map(ToString::to_string)
                .collect(),
            interval_minutes: alerts.interval_minutes,
            cooldown_minutes: alerts.cooldown_minutes,
            initial_delay_secs: alerts.initial_delay_secs,
            timeout_secs: config.upstream.timeout_secs,
            fallback_fx_rate: config.upstream.fallback_fx_rate.to_string(),
            alerts_enabled,
        }
    }
}

/// Print the validated configuration. Loading already validated it.
pub fn execute(config: &Config, source: &str) {
    let report = CheckReport::new(config, source, telegram_configured());

    if output::is_json() {
        match serde_json::to_value(&report) {
            Ok(payload) => output::json_output("check", payload),
            Err(e) => output::error(&format!("failed to encode report: {e}")),
        }
        return;
    }

    output::section("Configuration Check");
    output::field("Config", &report.source);
    output::success("Configuration is valid");

    output::section("Alerts");
    output::field("High", output::positive(&report.high_pct));
    output::field("Low", output::negative(&report.low_pct));
    output::field("Coins", report.symbols.join(", "));
    output::field("Interval", format!("{} min", report.interval_minutes));
    output::field("Cooldown", format!("{} min", report.cooldown_minutes));
    output::field("First check", format!("after {} s", report.initial_delay_secs));

    output::section("Upstream");
    output::field("Timeout", format!("{} s", report.timeout_secs));
    output::field("Fallback FX", output::muted(&report.fallback_fx_rate));

    if report.alerts_enabled {
        output::success("Telegram credentials detected, alerts enabled");
    } else {
        output::warning("Telegram credentials not set, alerts disabled");
        output::hint("set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID, or use `kimchi run --dry-run`");
    }
}
