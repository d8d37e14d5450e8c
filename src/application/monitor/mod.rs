//! Background premium monitor.
//!
//! A single task walks the watched symbols every interval, evaluates each
//! premium against the alert thresholds and hands due alerts to a
//! [`Notifier`](crate::port::Notifier).
//!
//! # Architecture
//!
//! ```text
//! MonitorHandle --(watch<bool>)--> run loop ---> Monitor::tick()
//!       ^                                            |
//!       |                                            +-- PremiumCalculator
//!       +------------(watch<MonitorStatus>)----------+-- evaluate()
//!                                                    +-- Notifier::deliver()
//! ```
//!
//! The cooldown map is owned by [`Monitor`]; readers only ever see the
//! [`MonitorStatus`] snapshot published after each tick.

mod handle;
mod service;

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{AlertThresholds, Symbol};

pub use handle::MonitorHandle;
pub use service::{Monitor, TickReport};

/// Monitor parameters.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Symbols checked on every tick, in order.
    pub symbols: Vec<Symbol>,
    pub thresholds: AlertThresholds,
    /// Pause between the end of one tick and the start of the next.
    pub interval: Duration,
    /// Pause before the first tick.
    pub initial_delay: Duration,
}

/// Lifecycle state. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorState {
    NotStarted,
    Running,
    Cancelled,
}

impl MonitorState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for MonitorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of the monitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorStatus {
    pub state: MonitorState,
    pub symbols: Vec<Symbol>,
    pub thresholds: AlertThresholds,
    /// Last confirmed delivery per alert key (`BTC_high`, ...).
    pub last_alerts: BTreeMap<String, DateTime<Utc>>,
    pub ticks_completed: u64,
}

impl MonitorStatus {
    #[must_use]
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            state: MonitorState::NotStarted,
            symbols: config.symbols.clone(),
            thresholds: config.thresholds.clone(),
            last_alerts: BTreeMap::new(),
            ticks_completed: 0,
        }
    }
}
