//! View model of the dashboard
//!
//! Everything the user can see lives in [`DashboardState`]: the table rows,
//! the empty-state placeholder, the inline load error, the creation form,
//! the report overlay and the last alert. The display timers backing
//! `calling` rows are owned here too, so they are released together with
//! the rows that show them.

use crate::components::{
    ActionCell, FormState, OverlayTarget, ReportView, Row, TimerRegistry,
    row::{self, STARTING_LABEL},
};
use interview_core::{Interview, InterviewId, InterviewStatus};
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// Inline message shown in place of the table when the list cannot be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load interviews.";

/// Complete view model of the dashboard
#[derive(Debug)]
pub struct DashboardState {
    rows: Vec<Row>,
    empty_state_visible: bool,
    load_error: Option<String>,
    form: FormState,
    detail: Option<ReportView>,
    alert: Option<String>,
    timers: TimerRegistry,
    torn_down: bool,
}

impl DashboardState {
    /// Create an empty view whose display timers tick every `timer_tick`
    #[must_use]
    pub fn new(timer_tick: Duration) -> Self {
        Self {
            rows: Vec::new(),
            empty_state_visible: false,
            load_error: None,
            form: FormState::default(),
            detail: None,
            alert: None,
            timers: TimerRegistry::new(timer_tick),
            torn_down: false,
        }
    }

    /// Rebuild the table body from a freshly fetched collection
    ///
    /// Timers of rows that are gone, or no longer `calling`, are released.
    /// Ignored once the view is torn down.
    pub fn replace_rows(&mut self, interviews: &[Interview]) {
        if self.torn_down {
            debug!("View torn down, ignoring list");
            return;
        }
        self.load_error = None;
        self.rows = interviews
            .iter()
            .map(|interview| row::render_row(interview, &mut self.timers))
            .collect();
        self.empty_state_visible = self.rows.is_empty();

        let calling: HashSet<InterviewId> = interviews
            .iter()
            .filter(|interview| interview.status == InterviewStatus::Calling)
            .map(|interview| interview.id)
            .collect();
        self.timers.retain(|id| calling.contains(&id));
    }

    /// Replace the table body with an inline error message
    pub fn show_load_error(&mut self, message: impl Into<String>) {
        self.rows.clear();
        self.timers.clear();
        self.load_error = Some(message.into());
    }

    /// Render `interview` as a new first row
    pub fn prepend(&mut self, interview: &Interview) {
        if self.torn_down {
            return;
        }
        let row = row::render_row(interview, &mut self.timers);
        self.rows.insert(0, row);
        self.empty_state_visible = false;
    }

    /// Replace the status and action cells of the row for `interview`
    ///
    /// Returns `false`, changing nothing, when no such row is shown or the
    /// view is torn down.
    pub fn patch(&mut self, interview: &Interview) -> bool {
        if self.torn_down {
            debug!(interview_id = %interview.id, "View torn down, ignoring patch");
            return false;
        }
        let Some(row) = self.rows.iter_mut().find(|row| row.id == interview.id) else {
            debug!(interview_id = %interview.id, "No row to patch");
            return false;
        };
        row::patch_row(row, interview, &mut self.timers);
        debug!(interview_id = %interview.id, status = %interview.status, "Patched row");
        true
    }

    /// Whether a row for `interview` is shown with a different status text
    #[must_use]
    pub fn is_stale(&self, interview: &Interview) -> bool {
        self.row(interview.id)
            .is_some_and(|row| row.status_text() != interview.status.as_str())
    }

    /// Put the "Start Call" button of `id` into its in-flight state
    ///
    /// Returns `false` when the row has no enabled "Start Call" button.
    pub fn begin_start_call(&mut self, id: InterviewId) -> bool {
        match self.row_mut(id).map(|row| &mut row.action) {
            Some(ActionCell::StartCall { disabled, label }) if !*disabled => {
                *disabled = true;
                *label = STARTING_LABEL.to_string();
                true
            }
            _ => false,
        }
    }

    /// Return an in-flight "Start Call" button of `id` to its ready state
    ///
    /// Rows patched in the meantime are left alone.
    pub fn restore_start_call(&mut self, id: InterviewId) -> bool {
        match self.row_mut(id) {
            Some(row) if matches!(row.action, ActionCell::StartCall { disabled: true, .. }) => {
                row.action = ActionCell::start_call();
                true
            }
            _ => false,
        }
    }

    /// Open the report overlay
    pub fn open_detail(&mut self, report: ReportView) {
        self.detail = Some(report);
    }

    /// Close the report overlay
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Handle an activation on the overlay; only the background closes it
    pub fn click_overlay(&mut self, target: OverlayTarget) {
        if target == OverlayTarget::Background {
            self.close_detail();
        }
    }

    /// Raise a blocking alert
    pub fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    /// Take the pending alert, acknowledging it
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Release every timer and close the overlay
    ///
    /// Later row updates are ignored, so no timer can start again.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.timers.clear();
        self.detail = None;
    }

    /// Whether [`DashboardState::teardown`] has run
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Rows in display order
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row for `id`
    #[must_use]
    pub fn row(&self, id: InterviewId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    fn row_mut(&mut self, id: InterviewId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|row| row.id == id)
    }

    /// Whether the empty-state placeholder is shown
    #[must_use]
    pub const fn empty_state_visible(&self) -> bool {
        self.empty_state_visible
    }

    /// Inline load error, if the last list fetch failed
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Creation form
    #[must_use]
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Creation form, mutably
    pub const fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Open report overlay
    #[must_use]
    pub const fn detail(&self) -> Option<&ReportView> {
        self.detail.as_ref()
    }

    /// Pending alert, without acknowledging it
    #[must_use]
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Display timers backing `calling` rows
    #[must_use]
    pub const fn timers(&self) -> &TimerRegistry {
        &self.timers
    }
}
