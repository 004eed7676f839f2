//! Report overlay for a single interview

use crate::components::timer::format_elapsed;
use interview_core::{Interview, InterviewId};
use std::time::Duration;

/// Where an activation on the open overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    /// The dimmed background outside the content region
    Background,
    /// Anywhere inside the content region
    Content,
}

/// Data shown by the report overlay, built from one freshly fetched record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    /// Interview the report belongs to
    pub interview_id: InterviewId,
    /// Overlay title
    pub candidate_name: String,
    /// Link to the call recording
    pub recording_url: Option<String>,
    /// Analysis summary, omitted when absent
    pub summary: Option<String>,
    /// Formatted call duration, omitted when absent
    pub duration: Option<String>,
    /// Assessment section
    pub assessment: String,
    /// Strengths section
    pub strengths: String,
    /// Concerns / follow-up section
    pub concerns: String,
    /// Overall score section, e.g. `87 / 100`
    pub score: String,
    /// Hiring recommendation section
    pub recommendation: String,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

impl From<&Interview> for ReportView {
    fn from(interview: &Interview) -> Self {
        // Zero is a real score and is shown as such; only a missing score reads `--`
        let score = interview
            .score
            .map_or_else(|| "--".to_string(), |score| score.to_string());

        Self {
            interview_id: interview.id,
            candidate_name: interview.candidate_name.clone(),
            recording_url: non_empty(interview.recording_url.as_ref()),
            summary: non_empty(interview.analysis_summary.as_ref()),
            duration: interview
                .duration_in_seconds
                .map(|secs| format_elapsed(Duration::from_secs(u64::from(secs)))),
            assessment: non_empty(interview.assessment.as_ref())
                .unwrap_or_else(|| "No assessment generated.".to_string()),
            strengths: non_empty(interview.analysis_strengths.as_ref())
                .unwrap_or_else(|| "Not analyzed.".to_string()),
            concerns: non_empty(interview.analysis_concerns.as_ref())
                .unwrap_or_else(|| "Not analyzed.".to_string()),
            score: format!("{score} / 100"),
            recommendation: non_empty(interview.recommendation.as_ref())
                .unwrap_or_else(|| "No recommendation.".to_string()),
        }
    }
}

impl ReportView {
    /// Recording section text
    #[must_use]
    pub fn recording_text(&self) -> &str {
        self.recording_url.as_deref().unwrap_or("Not available.")
    }
}
