//! Domain types exchanged with the interview backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accept any JSON number for a duration; anything else decodes as `None`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.round().min(f64::from(u32::MAX)) as u32))
}

/// Identifier of an interview record
///
/// Assigned by the backend and stable for the lifetime of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterviewId(pub i64);

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InterviewId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<i64> for InterviewId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Processing status of an interview, as reported by the backend
///
/// The backend drives every transition; the client only reacts to the value
/// it last observed. Values outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterviewStatus {
    /// Created, call not started yet
    Pending,
    /// Phone call in progress
    Calling,
    /// Call finished, transcript being analyzed
    Analyzing,
    /// Report available
    Completed,
    /// Call or analysis failed
    Error,
    /// Any status string this client does not know about
    Unknown(String),
}

impl InterviewStatus {
    /// Wire representation of the status
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Calling => "calling",
            Self::Analyzing => "analyzing",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Unknown(other) => other,
        }
    }

    /// Whether a report can be shown for this status
    #[must_use]
    pub const fn has_report(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl From<String> for InterviewStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "calling" => Self::Calling,
            "analyzing" => Self::Analyzing,
            "completed" => Self::Completed,
            "error" => Self::Error,
            _ => Self::Unknown(value),
        }
    }
}

impl From<&str> for InterviewStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<InterviewStatus> for String {
    fn from(status: InterviewStatus) -> Self {
        match status {
            InterviewStatus::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interview record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    /// Record identifier
    pub id: InterviewId,

    /// Candidate's display name
    pub candidate_name: String,

    /// Candidate's phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Position being interviewed for
    pub job_position: String,

    /// Full job description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,

    /// Comma separated skills the call should probe
    #[serde(default)]
    pub skills_to_assess: Option<String>,

    /// Current processing status
    pub status: InterviewStatus,

    /// Call transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    /// Call duration, rounded to whole seconds
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration_in_seconds: Option<u32>,

    /// Link to the call recording
    #[serde(default)]
    pub recording_url: Option<String>,

    /// Short summary of the call
    #[serde(default)]
    pub analysis_summary: Option<String>,

    /// Strengths identified during analysis
    #[serde(default)]
    pub analysis_strengths: Option<String>,

    /// Concerns or follow-up points
    #[serde(default)]
    pub analysis_concerns: Option<String>,

    /// Evaluation of the candidate's answers
    #[serde(default)]
    pub assessment: Option<String>,

    /// Overall score out of 100
    #[serde(default)]
    pub score: Option<i64>,

    /// Hiring recommendation
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl Interview {
    /// Build a freshly created, pending record from a creation request
    #[must_use]
    pub fn from_request(id: InterviewId, request: &NewInterview) -> Self {
        Self {
            id,
            candidate_name: request.candidate_name.clone(),
            phone_number: Some(request.phone_number.clone()),
            job_position: request.job_position.clone(),
            job_description: Some(request.job_description.clone()),
            skills_to_assess: Some(request.skills_to_assess.clone()),
            status: InterviewStatus::Pending,
            transcript: None,
            duration_in_seconds: None,
            recording_url: None,
            analysis_summary: None,
            analysis_strengths: None,
            analysis_concerns: None,
            assessment: None,
            score: None,
            recommendation: None,
        }
    }

    /// Skills to display, `None` when absent or blank
    #[must_use]
    pub fn skills(&self) -> Option<&str> {
        self.skills_to_assess
            .as_deref()
            .filter(|skills| !skills.trim().is_empty())
    }
}

/// Request body for creating an interview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInterview {
    /// Candidate's display name
    pub candidate_name: String,
    /// Candidate's phone number
    pub phone_number: String,
    /// Position being interviewed for
    pub job_position: String,
    /// Full job description
    pub job_description: String,
    /// Skills the call should probe
    pub skills_to_assess: String,
}

/// Error body returned by the backend with non-2xx statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human readable error message
    #[serde(default)]
    pub error: Option<String>,
}
