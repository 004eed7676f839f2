//! Table rows for the interview list

use crate::components::timer::{TimerLabel, TimerRegistry};
use interview_core::{Interview, InterviewId, InterviewStatus};

/// Label of the call button in its ready state
pub const START_CALL_LABEL: &str = "Start Call";
/// Label of the call button while the request is in flight
pub const STARTING_LABEL: &str = "Starting...";
/// Label shown while the backend analyzes a finished call
pub const ANALYZING_LABEL: &str = "Analyzing...";
/// Label of the report button
pub const VIEW_REPORT_LABEL: &str = "View Report";
/// Placeholder for missing values
pub const PLACEHOLDER: &str = "--";

/// Contents of a row's action cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionCell {
    /// "Start Call" button
    StartCall {
        /// Whether the button accepts activation
        disabled: bool,
        /// Button text
        label: String,
    },
    /// Live elapsed-time counter
    Timer(TimerLabel),
    /// Static "Analyzing..." label
    Analyzing,
    /// "View Report" button
    ViewReport,
    /// Placeholder for statuses without an action
    Placeholder,
}

impl ActionCell {
    /// A ready "Start Call" button
    #[must_use]
    pub fn start_call() -> Self {
        Self::StartCall {
            disabled: false,
            label: START_CALL_LABEL.to_string(),
        }
    }

    /// Text the cell shows
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::StartCall { label, .. } => label.clone(),
            Self::Timer(label) => label.text(),
            Self::Analyzing => ANALYZING_LABEL.to_string(),
            Self::ViewReport => VIEW_REPORT_LABEL.to_string(),
            Self::Placeholder => PLACEHOLDER.to_string(),
        }
    }
}

/// One row of the interview table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Interview the row shows
    pub id: InterviewId,
    /// Identity cell, first line
    pub candidate_name: String,
    /// Identity cell, second line
    pub job_position: String,
    /// Skills cell
    pub skills: String,
    /// Status badge
    pub status: InterviewStatus,
    /// Action cell
    pub action: ActionCell,
}

impl Row {
    /// Text of the status badge
    #[must_use]
    pub fn status_text(&self) -> &str {
        self.status.as_str()
    }
}

/// Render the action cell for `interview`, starting or stopping its timer
///
/// A `calling` record gets a live timer (reusing the running one); any other
/// status releases the timer for that id, if there is one.
pub fn render_action(interview: &Interview, timers: &mut TimerRegistry) -> ActionCell {
    if interview.status == InterviewStatus::Calling {
        return ActionCell::Timer(timers.start(interview.id));
    }

    timers.stop(interview.id);
    match &interview.status {
        InterviewStatus::Pending => ActionCell::start_call(),
        InterviewStatus::Analyzing => ActionCell::Analyzing,
        InterviewStatus::Completed | InterviewStatus::Error => ActionCell::ViewReport,
        InterviewStatus::Calling | InterviewStatus::Unknown(_) => ActionCell::Placeholder,
    }
}

/// Render a full row for `interview`
pub fn render_row(interview: &Interview, timers: &mut TimerRegistry) -> Row {
    Row {
        id: interview.id,
        candidate_name: interview.candidate_name.clone(),
        job_position: interview.job_position.clone(),
        skills: interview.skills().unwrap_or(PLACEHOLDER).to_string(),
        status: interview.status.clone(),
        action: render_action(interview, timers),
    }
}

/// Replace the status and action cells of `row` with those for `interview`
///
/// The identity and skills cells are left untouched.
pub fn patch_row(row: &mut Row, interview: &Interview, timers: &mut TimerRegistry) {
    row.status = interview.status.clone();
    row.action = render_action(interview, timers);
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use interview_core::NewInterview;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::time::Duration;

    fn interview(id: i64, status: &str) -> Interview {
        let request = NewInterview {
            candidate_name: format!("Candidate {id}"),
            phone_number: "+15550100".to_string(),
            job_position: "Engineer".to_string(),
            job_description: "Writes code".to_string(),
            skills_to_assess: "Rust, SQL".to_string(),
        };
        let mut interview = Interview::from_request(InterviewId(id), &request);
        interview.status = InterviewStatus::from(status);
        interview
    }

    #[rstest]
    #[case("pending", "Start Call")]
    #[case("analyzing", "Analyzing...")]
    #[case("completed", "View Report")]
    #[case("error", "View Report")]
    #[case("archived", "--")]
    #[tokio::test]
    async fn test_action_cell_by_status(#[case] status: &str, #[case] expected: &str) {
        let mut timers = TimerRegistry::new(Duration::from_secs(1));
        let row = render_row(&interview(1, status), &mut timers);

        assert_eq!(row.action.text(), expected);
        assert_eq!(row.status_text(), status);
        assert!(timers.is_empty());
    }

    #[tokio::test]
    async fn test_calling_row_starts_one_timer() {
        let mut timers = TimerRegistry::new(Duration::from_secs(1));
        let first = render_row(&interview(4, "calling"), &mut timers);
        let second = render_row(&interview(4, "calling"), &mut timers);

        assert_eq!(timers.running(), vec![InterviewId(4)]);
        match (&first.action, &second.action) {
            (ActionCell::Timer(a), ActionCell::Timer(b)) => assert!(a.same_timer(b)),
            other => panic!("Expected timer cells, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_leaving_calling_stops_timer() {
        let mut timers = TimerRegistry::new(Duration::from_secs(1));
        let mut row = render_row(&interview(2, "calling"), &mut timers);
        assert!(timers.is_running(InterviewId(2)));

        patch_row(&mut row, &interview(2, "analyzing"), &mut timers);

        assert!(!timers.is_running(InterviewId(2)));
        assert_eq!(row.action, ActionCell::Analyzing);
    }

    #[tokio::test]
    async fn test_patch_keeps_identity_cells() {
        let mut timers = TimerRegistry::new(Duration::from_secs(1));
        let mut row = render_row(&interview(3, "pending"), &mut timers);

        let mut updated = interview(3, "completed");
        updated.candidate_name = "Renamed".to_string();
        patch_row(&mut row, &updated, &mut timers);

        assert_eq!(row.candidate_name, "Candidate 3");
        assert_eq!(row.status, InterviewStatus::Completed);
        assert_eq!(row.action, ActionCell::ViewReport);
    }

    #[tokio::test]
    async fn test_blank_skills_show_placeholder() {
        let mut timers = TimerRegistry::new(Duration::from_secs(1));
        let mut record = interview(5, "pending");
        record.skills_to_assess = Some(String::new());

        assert_eq!(render_row(&record, &mut timers).skills, "--");
        assert_eq!(render_row(&interview(6, "pending"), &mut timers).skills, "Rust, SQL");
    }
}
