//! Canonical test configurations.

use std::time::Duration;

use crate::application::monitor::MonitorConfig;
use crate::domain::{AlertThresholds, Symbol};

/// Monitor config watching `symbols` with default thresholds, no initial
/// delay and a one-minute interval.
pub fn monitor(symbols: &[&str]) -> MonitorConfig {
    MonitorConfig {
        symbols: symbols.iter().copied().map(Symbol::new).collect(),
        thresholds: AlertThresholds::default(),
        interval: Duration::from_secs(60),
        initial_delay: Duration::ZERO,
    }
}
