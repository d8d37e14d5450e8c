//! Recording notifier for alert assertions.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::port::{AlertMessage, Notifier};

/// Thread-safe alert collector.
///
/// Every call to `deliver` is recorded as an attempt. Delivery outcomes are
/// popped from a scripted queue; once it is empty every delivery succeeds.
/// Only successful deliveries appear in [`RecordingNotifier::delivered`].
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    delivered: Arc<Mutex<Vec<AlertMessage>>>,
    attempts: Arc<Mutex<usize>>,
    outcomes: Arc<Mutex<VecDeque<bool>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue outcomes for the next deliveries, in order.
    pub fn with_outcomes(self, outcomes: &[bool]) -> Self {
        self.outcomes.lock().extend(outcomes.iter().copied());
        self
    }

    /// Reject the next `n` deliveries.
    pub fn fail_next(&self, n: usize) {
        self.outcomes
            .lock()
            .extend(std::iter::repeat(false).take(n));
    }

    pub fn delivered(&self) -> Vec<AlertMessage> {
        self.delivered.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.delivered.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.delivered.lock().is_empty()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, message: &AlertMessage) -> bool {
        *self.attempts.lock() += 1;
        let ok = self.outcomes.lock().pop_front().unwrap_or(true);
        if ok {
            self.delivered.lock().push(message.clone());
        }
        ok
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
