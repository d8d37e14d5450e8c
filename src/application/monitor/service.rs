//! One monitor pass over the watched symbols.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{MonitorConfig, MonitorState, MonitorStatus};
use crate::application::premium::PremiumCalculator;
use crate::domain::{evaluate, AlertDecision, CooldownState};
use crate::port::{AlertMessage, Notifier};

/// Counters for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Symbols with a computed premium.
    pub checked: usize,
    /// Symbols skipped because the premium could not be computed.
    pub skipped: usize,
    pub alerts_sent: usize,
    pub alerts_failed: usize,
}

/// Monitor state machine body: calculator, notifier and cooldowns.
pub struct Monitor {
    config: MonitorConfig,
    calculator: PremiumCalculator,
    notifier: Arc<dyn Notifier>,
    cooldowns: CooldownState,
    ticks_completed: u64,
}

impl Monitor {
    #[must_use]
    pub fn new(
        config: MonitorConfig,
        calculator: PremiumCalculator,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            calculator,
            notifier,
            cooldowns: CooldownState::new(),
            ticks_completed: 0,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn cooldowns(&self) -> &CooldownState {
        &self.cooldowns
    }

    pub fn ticks_completed(&self) -> u64 {
        self.ticks_completed
    }

    /// Check every watched symbol once, evaluating alerts as of `now`.
    ///
    /// A symbol whose premium cannot be computed is skipped without
    /// affecting the others. A cooldown entry is only written when the
    /// notifier confirms delivery.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::default();
        let thresholds = &self.config.thresholds;

        for symbol in &self.config.symbols {
            let result = match self.calculator.compute_premium(symbol).await {
                Ok(result) => result,
                Err(e) if e.is_unresolvable() => {
                    debug!(symbol = %symbol, error = %e, "Skipping symbol");
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Premium check failed");
                    report.skipped += 1;
                    continue;
                }
            };
            report.checked += 1;

            let decision = evaluate(
                symbol,
                result.premium_pct,
                thresholds,
                &self.cooldowns,
                now,
            );
            let AlertDecision::AlertDue { direction, key } = decision else {
                continue;
            };

            let message = AlertMessage::new(key.clone(), thresholds.threshold(direction), &result);
            if self.notifier.deliver(&message).await {
                info!(
                    key = %key,
                    premium_pct = %result.premium_pct.round_dp(2),
                    notifier = self.notifier.name(),
                    "Premium alert sent"
                );
                self.cooldowns.record(key, now);
                report.alerts_sent += 1;
            } else {
                warn!(key = %key, notifier = self.notifier.name(), "Premium alert not delivered");
                report.alerts_failed += 1;
            }
        }

        self.ticks_completed += 1;
        debug!(
            tick = self.ticks_completed,
            checked = report.checked,
            skipped = report.skipped,
            alerts = report.alerts_sent,
            "Monitor tick complete"
        );
        report
    }

    /// Snapshot of the monitor with the given lifecycle state.
    #[must_use]
    pub fn status(&self, state: MonitorState) -> MonitorStatus {
        MonitorStatus {
            state,
            last_alerts: self.cooldowns.snapshot(),
            ticks_completed: self.ticks_completed,
            ..MonitorStatus::new(&self.config)
        }
    }
}
