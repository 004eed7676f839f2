//! Live elapsed-time counters for rows whose call is in progress
//!
//! Each [`DisplayTimer`] owns a tokio task that rewrites a shared
//! [`TimerLabel`] once per tick. Dropping the timer aborts the task, so
//! removing a timer from the [`TimerRegistry`] is enough to stop it.

use interview_core::InterviewId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

/// Format an elapsed duration the way the action cell shows it
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {:02}s", secs / 60, secs % 60)
}

/// Text of a live timer cell, shared between the row and its ticking task
#[derive(Clone)]
pub struct TimerLabel(Arc<Mutex<String>>);

impl TimerLabel {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(format_elapsed(Duration::ZERO))))
    }

    /// Current text of the label
    #[must_use]
    pub fn text(&self) -> String {
        self.0.lock().clone()
    }

    /// Whether both labels are backed by the same timer
    #[must_use]
    pub fn same_timer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn set(&self, text: String) {
        *self.0.lock() = text;
    }
}

impl PartialEq for TimerLabel {
    fn eq(&self, other: &Self) -> bool {
        self.same_timer(other) || self.text() == other.text()
    }
}

impl Eq for TimerLabel {}

impl fmt::Debug for TimerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimerLabel").field(&self.text()).finish()
    }
}

/// A running display timer; the ticking task lives as long as this value
pub struct DisplayTimer {
    label: TimerLabel,
    task: JoinHandle<()>,
}

impl DisplayTimer {
    /// Start a timer that refreshes its label every `tick`
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(tick: Duration) -> Self {
        let label = TimerLabel::new();
        let task_label = label.clone();
        let started = Instant::now();

        let task = tokio::spawn(async move {
            let mut ticks = interval_at(started + tick, tick);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                task_label.set(format_elapsed(started.elapsed()));
            }
        });

        Self { label, task }
    }

    /// Label this timer writes into
    #[must_use]
    pub fn label(&self) -> TimerLabel {
        self.label.clone()
    }
}

impl Drop for DisplayTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl fmt::Debug for DisplayTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayTimer")
            .field("label", &self.label)
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

/// At most one [`DisplayTimer`] per interview
#[derive(Debug)]
pub struct TimerRegistry {
    tick: Duration,
    timers: HashMap<InterviewId, DisplayTimer>,
}

impl TimerRegistry {
    /// Create an empty registry whose timers tick every `tick`
    #[must_use]
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            timers: HashMap::new(),
        }
    }

    /// Start the timer for `id`, or return the label of the one already running
    pub fn start(&mut self, id: InterviewId) -> TimerLabel {
        let tick = self.tick;
        self.timers
            .entry(id)
            .or_insert_with(|| {
                debug!(interview_id = %id, "Starting display timer");
                DisplayTimer::start(tick)
            })
            .label()
    }

    /// Stop and forget the timer for `id`; returns whether one was running
    pub fn stop(&mut self, id: InterviewId) -> bool {
        let stopped = self.timers.remove(&id).is_some();
        if stopped {
            debug!(interview_id = %id, "Stopped display timer");
        }
        stopped
    }

    /// Stop every timer whose id does not satisfy `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(InterviewId) -> bool) {
        self.timers.retain(|id, _| {
            let kept = keep(*id);
            if !kept {
                debug!(interview_id = %id, "Released display timer of removed row");
            }
            kept
        });
    }

    /// Stop every timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Whether a timer is running for `id`
    #[must_use]
    pub fn is_running(&self, id: InterviewId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Ids with a running timer, sorted
    #[must_use]
    pub fn running(&self) -> Vec<InterviewId> {
        let mut ids: Vec<_> = self.timers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of running timers
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timer is running
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
