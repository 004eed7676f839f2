//! Dashboard controller
//!
//! [`Dashboard`] ties the view model to the backend: it renders the list,
//! handles the creation form, dispatches row actions, opens reports and
//! runs the reconciling poller. Cloning a `Dashboard` yields another handle
//! to the same view. The view-model lock is never held across an await, so
//! responses apply to the view in the order they arrive.

use crate::api_client::InterviewApi;
use crate::components::{ActionCell, OverlayTarget, ReportView, Row, form::CREATE_FAILED_MESSAGE};
use crate::error::{DashboardError, Result};
use crate::poller::PollerHandle;
use crate::state::{DashboardState, LOAD_FAILED_MESSAGE};
use interview_core::{DashboardConfig, Interview, InterviewId, NewInterview};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Alert text when a call cannot be started and the backend gives no reason
pub const START_CALL_FAILED_MESSAGE: &str = "Failed to start call.";
/// Alert text when a report cannot be fetched and the backend gives no reason
pub const REPORT_FAILED_MESSAGE: &str = "Failed to load report.";

/// Row control activated by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// "Start Call" button of a pending row
    StartCall(InterviewId),
    /// "View Report" button of a completed or failed row
    ViewReport(InterviewId),
}

struct Inner {
    api: Arc<dyn InterviewApi>,
    state: Mutex<DashboardState>,
    poll_interval: Duration,
    poller: Mutex<Option<PollerHandle>>,
}

/// Handle to a dashboard view and its background work
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

/// Non-owning handle held by the poller so it never keeps the view alive
#[derive(Clone)]
pub(crate) struct WeakDashboard(Weak<Inner>);

impl WeakDashboard {
    pub(crate) fn upgrade(&self) -> Option<Dashboard> {
        self.0.upgrade().map(|inner| Dashboard { inner })
    }
}

/// Returns the form to its ready state however the submission ends
struct SubmitGuard<'a> {
    state: &'a Mutex<DashboardState>,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().form_mut().finish_submit();
    }
}

impl Dashboard {
    /// Create a dashboard backed by `api`
    pub fn new(api: Arc<dyn InterviewApi>, config: &DashboardConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(DashboardState::new(config.timer_tick())),
                poll_interval: config.poll_interval(),
                poller: Mutex::new(None),
            }),
        }
    }

    /// Fetch the full collection and rebuild the table
    ///
    /// On failure the table is replaced by an inline error message; there is
    /// no retry.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after the view has been updated.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize> {
        match self.inner.api.list_interviews().await {
            Ok(interviews) => {
                self.inner.state.lock().replace_rows(&interviews);
                info!(count = interviews.len(), "Rendered interview list");
                Ok(interviews.len())
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch interviews");
                self.inner.state.lock().show_load_error(LOAD_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    /// Replace the status and action cells of the row for `interview`
    ///
    /// Returns `false` when no row for it is shown.
    pub fn patch(&self, interview: &Interview) -> bool {
        self.inner.state.lock().patch(interview)
    }

    /// Replace the creation form's field values
    pub fn fill_form(&self, fields: NewInterview) {
        self.inner.state.lock().form_mut().fields = fields;
    }

    /// Submit the creation form
    ///
    /// The submit control is disabled for the duration of the request and
    /// re-enabled afterwards, even if this future is dropped early.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::SubmitInProgress`] if a submission is
    /// already in flight, or the creation error after it has been shown in
    /// the banner.
    pub async fn submit(&self) -> Result<Interview> {
        self.submit_with(None).await
    }

    /// Fill the creation form with `fields` and submit it
    ///
    /// The form is left untouched if a submission is already in flight.
    ///
    /// # Errors
    ///
    /// Same as [`Dashboard::submit`].
    pub async fn submit_form(&self, fields: NewInterview) -> Result<Interview> {
        self.submit_with(Some(fields)).await
    }

    /// Whether a form submission is in flight
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.with_state(|state| state.form().submitting)
    }

    #[instrument(skip_all)]
    async fn submit_with(&self, fields: Option<NewInterview>) -> Result<Interview> {
        let (fields, _guard) = {
            let mut state = self.inner.state.lock();
            if state.form().submitting {
                return Err(DashboardError::SubmitInProgress);
            }
            if let Some(fields) = fields {
                state.form_mut().fields = fields;
            }
            state.form_mut().begin_submit();
            let guard = SubmitGuard {
                state: &self.inner.state,
            };
            (state.form().fields.clone(), guard)
        };

        match self.inner.api.create_interview(&fields).await {
            Ok(interview) => {
                let mut state = self.inner.state.lock();
                state.prepend(&interview);
                state.form_mut().reset();
                info!(interview_id = %interview.id, "Created interview");
                Ok(interview)
            }
            Err(e) => {
                warn!(error = %e, "Failed to create interview");
                self.inner
                    .state
                    .lock()
                    .form_mut()
                    .show_error(e.user_message(CREATE_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Hide the form's error banner
    pub fn dismiss_banner(&self) {
        self.inner.state.lock().form_mut().dismiss();
    }

    /// Activate whatever control the row for `id` currently shows
    ///
    /// Disabled buttons, timers, labels and placeholders do nothing.
    ///
    /// # Errors
    ///
    /// Returns the error of the dispatched action, if any.
    pub async fn activate(&self, id: InterviewId) -> Result<Option<Action>> {
        let action = {
            let mut state = self.inner.state.lock();
            let action = state.row(id).and_then(|row| match row.action {
                ActionCell::StartCall {
                    disabled: false, ..
                } => Some(Action::StartCall(id)),
                ActionCell::ViewReport => Some(Action::ViewReport(id)),
                _ => None,
            });
            // Disable the button under the same lock that saw it enabled
            if action == Some(Action::StartCall(id)) {
                state.begin_start_call(id);
            }
            action
        };

        match action {
            Some(Action::StartCall(id)) => {
                self.request_start_call(id).await?;
                Ok(action)
            }
            Some(Action::ViewReport(id)) => {
                self.open_report(id).await?;
                Ok(action)
            }
            None => {
                debug!(interview_id = %id, "Nothing to activate");
                Ok(None)
            }
        }
    }

    /// Start the call for `id`
    ///
    /// The row's button shows "Starting..." while the request is in flight.
    /// On failure the button is restored and an alert raised.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::ActionUnavailable`] if the row has no
    /// enabled "Start Call" button, or the call-start error after it has
    /// been surfaced.
    #[instrument(skip(self))]
    pub async fn start_call(&self, id: InterviewId) -> Result<Interview> {
        if !self.inner.state.lock().begin_start_call(id) {
            debug!(interview_id = %id, "No enabled Start Call button");
            return Err(DashboardError::ActionUnavailable(id));
        }
        self.request_start_call(id).await
    }

    /// Send the call-start request for a row already showing "Starting..."
    async fn request_start_call(&self, id: InterviewId) -> Result<Interview> {
        match self.inner.api.start_call(id).await {
            Ok(interview) => {
                self.patch(&interview);
                info!(interview_id = %id, status = %interview.status, "Call started");
                Ok(interview)
            }
            Err(e) => {
                error!(interview_id = %id, error = %e, "Failed to start call");
                let mut state = self.inner.state.lock();
                state.restore_start_call(id);
                state.raise_alert(e.user_message(START_CALL_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Fetch `id` fresh and open its report
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the overlay stays closed and an alert is raised.
    #[instrument(skip(self))]
    pub async fn open_report(&self, id: InterviewId) -> Result<()> {
        match self.inner.api.get_interview(id).await {
            Ok(interview) => {
                self.inner
                    .state
                    .lock()
                    .open_detail(ReportView::from(&interview));
                debug!(interview_id = %id, "Opened report");
                Ok(())
            }
            Err(e) => {
                error!(interview_id = %id, error = %e, "Failed to load report");
                self.inner
                    .state
                    .lock()
                    .raise_alert(e.user_message(REPORT_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// Close the report overlay
    pub fn close_report(&self) {
        self.inner.state.lock().close_detail();
    }

    /// Handle an activation on the report overlay
    pub fn click_overlay(&self, target: OverlayTarget) {
        self.inner.state.lock().click_overlay(target);
    }

    /// Take the pending alert, acknowledging it
    pub fn take_alert(&self) -> Option<String> {
        self.inner.state.lock().take_alert()
    }

    /// Re-fetch the collection and patch every row whose status changed
    ///
    /// Records without a row are ignored.
    ///
    /// # Errors
    ///
    /// Returns the fetch error; the view is left untouched.
    pub async fn poll_once(&self) -> Result<usize> {
        let interviews = self.inner.api.list_interviews().await?;

        let mut state = self.inner.state.lock();
        let mut patched = 0;
        for interview in &interviews {
            if state.is_stale(interview) && state.patch(interview) {
                patched += 1;
            }
        }
        Ok(patched)
    }

    /// Start the reconciling poller; does nothing if it is already running
    pub fn start_polling(&self) {
        if self.inner.state.lock().is_torn_down() {
            debug!("Dashboard torn down, not polling");
            return;
        }
        let mut poller = self.inner.poller.lock();
        if poller.as_ref().is_some_and(PollerHandle::is_running) {
            return;
        }
        *poller = Some(PollerHandle::spawn(
            WeakDashboard(Arc::downgrade(&self.inner)),
            self.inner.poll_interval,
        ));
    }

    /// Stop the reconciling poller
    pub fn stop_polling(&self) {
        if let Some(poller) = self.inner.poller.lock().take() {
            poller.stop();
        }
    }

    /// Whether the reconciling poller is running
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.inner
            .poller
            .lock()
            .as_ref()
            .is_some_and(PollerHandle::is_running)
    }

    /// Stop the poller, release every display timer and close the overlay
    pub fn teardown(&self) {
        self.stop_polling();
        self.inner.state.lock().teardown();
        info!("Dashboard torn down");
    }

    /// Read the view model
    pub fn with_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.inner.state.lock())
    }

    /// Snapshot of the table rows
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.with_state(|state| state.rows().to_vec())
    }

    /// Snapshot of the row for `id`
    #[must_use]
    pub fn row(&self, id: InterviewId) -> Option<Row> {
        self.with_state(|state| state.row(id).cloned())
    }
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("poll_interval", &self.inner.poll_interval)
            .field("polling", &self.is_polling())
            .finish_non_exhaustive()
    }
}
