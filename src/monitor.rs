//! Model monitoring page
//!
//! The page compares the last N predictions against the whole history and
//! refreshes on a fixed interval. [`MonitorPoller`] runs that refresh loop in
//! the background and publishes every outcome on a `watch` channel.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::defaults::monitoring as limits;
use crate::error::{ClientError, Result};
use crate::traits::HistoryCapability;
use crate::types::MonitoringReport;

/// Number of recent predictions compared against the history.
///
/// Always a multiple of 50 between 50 and 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecentWindow(u32);

impl RecentWindow {
    pub const MIN: Self = Self(limits::RECENT_LIMIT_MIN);
    pub const MAX: Self = Self(limits::RECENT_LIMIT_MAX);

    pub fn new(limit: u32) -> Result<Self> {
        if !(limits::RECENT_LIMIT_MIN..=limits::RECENT_LIMIT_MAX).contains(&limit)
            || limit % limits::RECENT_LIMIT_STEP != 0
        {
            return Err(ClientError::InvalidInput(format!(
                "Recent window must be a multiple of {} between {} and {}, got {limit}",
                limits::RECENT_LIMIT_STEP,
                limits::RECENT_LIMIT_MIN,
                limits::RECENT_LIMIT_MAX
            )));
        }
        Ok(Self(limit))
    }

    /// Nearest valid window, the way the slider snaps.
    pub fn snapped(limit: u32) -> Self {
        let step = limits::RECENT_LIMIT_STEP;
        let rounded = limit
            .min(limits::RECENT_LIMIT_MAX)
            .saturating_add(step / 2)
            / step
            * step;
        Self(rounded.clamp(limits::RECENT_LIMIT_MIN, limits::RECENT_LIMIT_MAX))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Every selectable window, smallest first.
    pub fn options() -> impl Iterator<Item = Self> {
        (limits::RECENT_LIMIT_MIN..=limits::RECENT_LIMIT_MAX)
            .step_by(limits::RECENT_LIMIT_STEP as usize)
            .map(Self)
    }
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self(limits::RECENT_LIMIT)
    }
}

impl fmt::Display for RecentWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One refresh of the monitoring page
#[derive(Debug, Clone)]
pub struct MonitorSnapshot {
    pub window: RecentWindow,
    pub fetched_at: DateTime<Local>,
    pub outcome: std::result::Result<MonitoringReport, ClientError>,
}

impl MonitorSnapshot {
    pub fn report(&self) -> Option<&MonitoringReport> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.outcome.as_ref().err()
    }
}

/// Fetch the report once.
pub async fn fetch_snapshot<H>(history: &H, window: RecentWindow) -> MonitorSnapshot
where
    H: HistoryCapability + ?Sized,
{
    let outcome = history.get_monitoring(window.get()).await;
    match &outcome {
        Ok(report) => tracing::debug!(
            window = window.get(),
            status = ?report.status,
            drop_pct = report.comparison.confidence_drop_percentage,
            "monitoring report refreshed"
        ),
        Err(err) => tracing::warn!(window = window.get(), error = %err, "monitoring refresh failed"),
    }
    MonitorSnapshot {
        window,
        fetched_at: Local::now(),
        outcome,
    }
}

/// Periodically refreshes the monitoring report
pub struct MonitorPoller<H: ?Sized> {
    history: Arc<H>,
    window: RecentWindow,
    interval: Duration,
}

impl<H> MonitorPoller<H>
where
    H: HistoryCapability + ?Sized + 'static,
{
    pub fn new(history: Arc<H>) -> Self {
        Self {
            history,
            window: RecentWindow::default(),
            interval: limits::REFRESH_INTERVAL,
        }
    }

    pub fn with_window(mut self, window: RecentWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling. The first refresh happens immediately.
    pub fn spawn(self) -> MonitorHandle {
        let (updates_tx, updates_rx) = watch::channel(None);
        let (window_tx, mut window_rx) = watch::channel(self.window);
        let history = self.history;
        let period = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = window_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        // Window changed: refresh now, then restart the period.
                        ticker.reset();
                    }
                }

                let window = *window_rx.borrow_and_update();
                let snapshot = fetch_snapshot(history.as_ref(), window).await;
                if updates_tx.send(Some(snapshot)).is_err() {
                    break;
                }
            }
            tracing::debug!("monitor poller stopped");
        });

        MonitorHandle {
            updates: updates_rx,
            window: window_tx,
            task,
        }
    }
}

/// Control side of a running [`MonitorPoller`]. Dropping it stops the poller.
pub struct MonitorHandle {
    updates: watch::Receiver<Option<MonitorSnapshot>>,
    window: watch::Sender<RecentWindow>,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Wait for the next refresh. `None` once the poller has stopped.
    pub async fn next(&mut self) -> Option<MonitorSnapshot> {
        self.updates.changed().await.ok()?;
        self.updates.borrow_and_update().clone()
    }

    /// Most recent refresh, if any.
    pub fn latest(&self) -> Option<MonitorSnapshot> {
        self.updates.borrow().clone()
    }

    pub fn window(&self) -> RecentWindow {
        *self.window.borrow()
    }

    /// Change the window; triggers an immediate refresh.
    pub fn set_window(&self, window: RecentWindow) {
        self.window.send_if_modified(|current| {
            let changed = *current != window;
            *current = window;
            changed
        });
    }

    pub fn stop(self) {}
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
