//! Background reconciliation of row statuses

use crate::dashboard::WeakDashboard;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Handle to the running poller
///
/// The poller re-fetches the full collection every interval and patches the
/// rows whose status changed. Failed polls are logged and skipped. Dropping
/// the handle stops the poller, abandoning any poll still in flight.
#[derive(Debug)]
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Spawn the poller; the first poll happens one `period` from now
    pub(crate) fn spawn(dashboard: WeakDashboard, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_ms = period.as_millis(), "Status poller started");

            loop {
                tokio::select! {
                    () = token.cancelled() => {
                        debug!("Status poller cancelled");
                        break;
                    }
                    _ = ticks.tick() => {
                        let Some(dashboard) = dashboard.upgrade() else {
                            debug!("Dashboard gone, status poller exiting");
                            break;
                        };
                        let result = tokio::select! {
                            () = token.cancelled() => {
                                debug!("Status poller cancelled mid-poll");
                                break;
                            }
                            result = dashboard.poll_once() => result,
                        };
                        match result {
                            Ok(0) => {}
                            Ok(patched) => debug!(patched, "Applied status changes"),
                            Err(e) => warn!(error = %e, "Status poll failed"),
                        }
                    }
                }
            }
        });

        Self { cancel, task }
    }

    /// Stop polling; an in-flight poll is abandoned
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the poller is still scheduled
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && !self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
