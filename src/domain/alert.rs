//! Threshold alert policy with per-key cooldown suppression.
//!
//! A premium at or above `high_pct` is a high candidate, at or below
//! `low_pct` a low candidate. A candidate only fires when its
//! (symbol, direction) key has not been notified within the cooldown window.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::symbol::Symbol;

/// Which side of the threshold band was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    High,
    Low,
}

impl AlertDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for AlertDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cooldown key: one per (symbol, direction). Displays as `BTC_high`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlertKey {
    symbol: Symbol,
    direction: AlertDirection,
}

impl AlertKey {
    #[must_use]
    pub fn new(symbol: Symbol, direction: AlertDirection) -> Self {
        Self { symbol, direction }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn direction(&self) -> AlertDirection {
        self.direction
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.symbol, self.direction)
    }
}

/// Threshold and cooldown parameters for alert evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertThresholds {
    /// Alert when the premium is at or above this percentage.
    pub high_pct: Decimal,
    /// Alert when the premium is at or below this percentage.
    pub low_pct: Decimal,
    /// Minimum time between two notifications for the same key.
    #[serde(serialize_with = "serialize_minutes")]
    pub cooldown: Duration,
}

fn serialize_minutes<S: serde::Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(value.num_minutes())
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            high_pct: dec!(3.0),
            low_pct: dec!(-1.0),
            cooldown: Duration::minutes(60),
        }
    }
}

impl AlertThresholds {
    /// Threshold value for a direction.
    #[must_use]
    pub fn threshold(&self, direction: AlertDirection) -> Decimal {
        match direction {
            AlertDirection::High => self.high_pct,
            AlertDirection::Low => self.low_pct,
        }
    }
}

/// Outcome of evaluating one premium against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertDecision {
    NoAction,
    AlertDue {
        direction: AlertDirection,
        key: AlertKey,
    },
}

impl AlertDecision {
    #[must_use]
    pub fn is_due(&self) -> bool {
        matches!(self, Self::AlertDue { .. })
    }
}

/// Last successful notification time per alert key.
///
/// Only written after a confirmed delivery, so a failed delivery leaves the
/// key eligible on the next evaluation.
#[derive(Debug, Clone, Default)]
pub struct CooldownState {
    last_sent: HashMap<AlertKey, DateTime<Utc>>,
}

impl CooldownState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn last_sent(&self, key: &AlertKey) -> Option<DateTime<Utc>> {
        self.last_sent.get(key).copied()
    }

    /// Record a confirmed delivery for `key` at `at`.
    pub fn record(&mut self, key: AlertKey, at: DateTime<Utc>) {
        self.last_sent.insert(key, at);
    }

    /// Whether `key` is outside its cooldown window at `now`.
    #[must_use]
    pub fn is_ready(&self, key: &AlertKey, cooldown: Duration, now: DateTime<Utc>) -> bool {
        match self.last_sent.get(key) {
            Some(last) => now.signed_duration_since(*last) >= cooldown,
            None => true,
        }
    }

    /// Sorted `key -> timestamp` view for status reporting.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, DateTime<Utc>> {
        self.last_sent
            .iter()
            .map(|(key, at)| (key.to_string(), *at))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.last_sent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_sent.is_empty()
    }
}

/// Decide whether a premium reading warrants a notification.
///
/// High takes precedence over low, so a single evaluation never yields both.
#[must_use]
pub fn evaluate(
    symbol: &Symbol,
    premium_pct: Decimal,
    thresholds: &AlertThresholds,
    cooldowns: &CooldownState,
    now: DateTime<Utc>,
) -> AlertDecision {
    let direction = if premium_pct >= thresholds.high_pct {
        AlertDirection::High
    } else if premium_pct <= thresholds.low_pct {
        AlertDirection::Low
    } else {
        return AlertDecision::NoAction;
    };

    let key = AlertKey::new(symbol.clone(), direction);
    if cooldowns.is_ready(&key, thresholds.cooldown, now) {
        AlertDecision::AlertDue { direction, key }
    } else {
        AlertDecision::NoAction
    }
}
