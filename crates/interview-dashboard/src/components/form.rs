//! Creation form state

use interview_core::NewInterview;

/// Fallback banner text when the backend gives no reason
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create interview.";

/// State of the "new interview" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Current field values
    pub fields: NewInterview,
    /// Whether a submission is in flight (control disabled, busy indicator shown)
    pub submitting: bool,
    /// Dismissable error banner
    pub banner: Option<String>,
}

impl FormState {
    /// Put the form into its busy state, hiding any previous banner
    pub fn begin_submit(&mut self) {
        self.submitting = true;
        self.banner = None;
    }

    /// Return the control to its ready state
    pub const fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Clear every field
    pub fn reset(&mut self) {
        self.fields = NewInterview::default();
    }

    /// Show `message` in the banner
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    /// Hide the banner
    pub fn dismiss(&mut self) {
        self.banner = None;
    }
}
