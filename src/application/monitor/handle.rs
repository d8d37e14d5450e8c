//! Lifecycle handle and run loop for the background monitor.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::service::Monitor;
use super::{MonitorConfig, MonitorState, MonitorStatus};

enum Slot {
    /// Built but not spawned. `None` when alerts are disabled.
    Idle(Option<Monitor>),
    Running(JoinHandle<()>),
    Done,
}

/// Controls a single background monitor task.
///
/// The task only runs after [`MonitorHandle::start`]. Dropping the handle
/// closes the shutdown channel, which stops the task as well.
pub struct MonitorHandle {
    slot: Mutex<Slot>,
    shutdown_tx: watch::Sender<bool>,
    status_tx: Arc<watch::Sender<MonitorStatus>>,
    status_rx: watch::Receiver<MonitorStatus>,
}

impl MonitorHandle {
    /// Wrap a monitor that has not been started yet.
    #[must_use]
    pub fn new(monitor: Monitor) -> Self {
        let status = monitor.status(MonitorState::NotStarted);
        Self::with_slot(Slot::Idle(Some(monitor)), status)
    }

    /// A handle that never starts, used when no notification channel is
    /// configured. Its status stays `NotStarted`.
    #[must_use]
    pub fn disabled(config: &MonitorConfig) -> Self {
        Self::with_slot(Slot::Idle(None), MonitorStatus::new(config))
    }

    fn with_slot(slot: Slot, status: MonitorStatus) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        let (status_tx, status_rx) = watch::channel(status);
        Self {
            slot: Mutex::new(slot),
            shutdown_tx,
            status_tx: Arc::new(status_tx),
            status_rx,
        }
    }

    /// Spawn the monitor task. Calling it again, or on a disabled or
    /// cancelled handle, has no effect. Returns the resulting state.
    pub fn start(&self) -> MonitorState {
        let mut slot = self.slot.lock();
        let monitor = match &mut *slot {
            Slot::Idle(monitor) => match monitor.take() {
                Some(monitor) => monitor,
                None => {
                    debug!("Monitor disabled, not starting");
                    return self.status_rx.borrow().state;
                }
            },
            Slot::Running(_) | Slot::Done => return self.status_rx.borrow().state,
        };

        self.status_tx
            .send_modify(|status| status.state = MonitorState::Running);

        let shutdown = self.shutdown_tx.subscribe();
        let status_tx = Arc::clone(&self.status_tx);
        *slot = Slot::Running(tokio::spawn(run(monitor, shutdown, status_tx)));

        info!("Premium monitor started");
        MonitorState::Running
    }

    /// Current status snapshot.
    #[must_use]
    pub fn status(&self) -> MonitorStatus {
        self.status_rx.borrow().clone()
    }

    #[must_use]
    pub fn state(&self) -> MonitorState {
        self.status_rx.borrow().state
    }

    /// Request cancellation. A handle that never ran moves straight to
    /// `Cancelled`; a disabled one stays `NotStarted`.
    pub fn cancel(&self) {
        let mut slot = self.slot.lock();
        if matches!(*slot, Slot::Idle(None)) {
            return;
        }
        if matches!(*slot, Slot::Idle(Some(_))) {
            *slot = Slot::Done;
        }
        self.shutdown_tx.send_replace(true);
        self.status_tx
            .send_modify(|status| status.state = MonitorState::Cancelled);
    }

    /// Wait for the task to finish. Returns immediately if it never ran.
    pub async fn join(&self) {
        let task = {
            let mut slot = self.slot.lock();
            match std::mem::replace(&mut *slot, Slot::Done) {
                Slot::Running(task) => task,
                other => {
                    *slot = other;
                    return;
                }
            }
        };
        if let Err(e) = task.await {
            warn!(error = %e, "Monitor task ended abnormally");
        }
    }
}

/// Run loop: initial delay, then tick and sleep until shutdown.
async fn run(
    mut monitor: Monitor,
    mut shutdown: watch::Receiver<bool>,
    status_tx: Arc<watch::Sender<MonitorStatus>>,
) {
    let _stopped = StopGuard(Arc::clone(&status_tx));
    let initial_delay = monitor.config().initial_delay;
    let interval = monitor.config().interval;
    info!(
        symbols = monitor.config().symbols.len(),
        interval_secs = interval.as_secs(),
        "Premium monitor running"
    );

    tokio::select! {
        () = tokio::time::sleep(initial_delay) => {}
        () = shutdown_requested(&mut shutdown) => return,
    }

    loop {
        let report = tokio::select! {
            report = monitor.tick(Utc::now()) => report,
            () = shutdown_requested(&mut shutdown) => break,
        };

        let snapshot = monitor.status(MonitorState::Running);
        status_tx.send_modify(|status| {
            status.last_alerts = snapshot.last_alerts;
            status.ticks_completed = snapshot.ticks_completed;
        });
        debug!(?report, "Tick published");

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = shutdown_requested(&mut shutdown) => break,
        }
    }
}

/// Marks the monitor `Cancelled` when the run loop exits, including by panic.
struct StopGuard(Arc<watch::Sender<MonitorStatus>>);

impl Drop for StopGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            error!("Premium monitor task panicked");
        }
        self.0
            .send_modify(|status| status.state = MonitorState::Cancelled);
        info!("Premium monitor stopped");
    }
}

/// Resolves once shutdown is signalled or the handle is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            info!("Shutdown channel closed");
            return;
        }
    }
}
