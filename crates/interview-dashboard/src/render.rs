//! Plain-text rendering of the dashboard for the terminal front end

use crate::components::{ActionCell, ReportView, Row};
use crate::state::DashboardState;

const ID_WIDTH: usize = 6;
const CANDIDATE_WIDTH: usize = 28;
const SKILLS_WIDTH: usize = 24;
const STATUS_WIDTH: usize = 11;

/// Text shown when the collection is empty
pub const EMPTY_STATE_TEXT: &str = "No interviews yet. Create one with `new`.";

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

fn action_text(action: &ActionCell) -> String {
    match action {
        ActionCell::StartCall {
            disabled: false,
            label,
        } => format!("[{label}]"),
        ActionCell::StartCall {
            disabled: true,
            label,
        } => format!("({label})"),
        ActionCell::ViewReport => format!("[{}]", action.text()),
        ActionCell::Timer(_) | ActionCell::Analyzing | ActionCell::Placeholder => action.text(),
    }
}

fn render_row(row: &Row) -> String {
    format!(
        "{:<ID_WIDTH$} {:<CANDIDATE_WIDTH$} {:<SKILLS_WIDTH$} {:<STATUS_WIDTH$} {}\n{:<ID_WIDTH$} {}\n",
        row.id.to_string(),
        truncate(&row.candidate_name, CANDIDATE_WIDTH),
        truncate(&row.skills, SKILLS_WIDTH),
        row.status_text(),
        action_text(&row.action),
        "",
        truncate(&row.job_position, CANDIDATE_WIDTH),
    )
}

/// Render the report overlay
#[must_use]
pub fn render_report(report: &ReportView) -> String {
    let mut out = format!("=== Report: {} ===\n", report.candidate_name);
    out.push_str(&format!("Recording:      {}\n", report.recording_text()));
    if let Some(summary) = &report.summary {
        out.push_str(&format!("Summary:        {summary}\n"));
    }
    if let Some(duration) = &report.duration {
        out.push_str(&format!("Duration:       {duration}\n"));
    }
    out.push_str(&format!("Assessment:     {}\n", report.assessment));
    out.push_str(&format!("Strengths:\n{}\n", report.strengths));
    out.push_str(&format!("Concerns:\n{}\n", report.concerns));
    out.push_str(&format!("Score:          {}\n", report.score));
    out.push_str(&format!("Recommendation: {}\n", report.recommendation));
    out.push_str("(`close` to dismiss)\n");
    out
}

/// Render the whole view: form status, table, overlay and pending alert
#[must_use]
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();

    let form = state.form();
    if form.submitting {
        out.push_str("Creating interview...\n");
    }
    if let Some(banner) = &form.banner {
        out.push_str(&format!("! {banner} (`dismiss` to hide)\n"));
    }

    out.push_str(&format!(
        "{:<ID_WIDTH$} {:<CANDIDATE_WIDTH$} {:<SKILLS_WIDTH$} {:<STATUS_WIDTH$} {}\n",
        "ID", "CANDIDATE", "SKILLS", "STATUS", "ACTION"
    ));

    if let Some(error) = state.load_error() {
        out.push_str(&format!("{error}\n"));
    } else if state.empty_state_visible() {
        out.push_str(&format!("{EMPTY_STATE_TEXT}\n"));
    }
    for row in state.rows() {
        out.push_str(&render_row(row));
    }

    if let Some(report) = state.detail() {
        out.push('\n');
        out.push_str(&render_report(report));
    }
    if let Some(alert) = state.alert() {
        out.push_str(&format!("\nALERT: {alert}\n"));
    }
    out
}
